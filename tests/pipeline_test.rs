use std::io::Cursor;

use egg_counter::{
    AnnotationWriter, CounterConfig, CountingPipeline, Direction, JsonLinesSource, PipelineConfig,
};

const STREAM: &str = r#"{"frame": 0, "detections": [[300, 80, 340, 120, 0.92], [500, 80, 540, 120, 0.30]]}
{"frame": 1, "detections": [[270.4, 81.0, 310.9, 121.0, 0.88]]}
{"frame": 2, "detections": [[250, 80, 290, 120, 0.91]]}
this line is broken
{"frame": 4, "detections": [[230, 80, 270, 120, 0.90], [600, 200, 640, 240, 0.95]]}
{"frame": 5, "detections": [[575, 200, 615, 240, 0.95]]}
"#;

#[test]
fn test_jsonl_stream_end_to_end() {
    let source = JsonLinesSource::new(Cursor::new(STREAM));
    let mut pipeline = CountingPipeline::new(
        source,
        CounterConfig {
            line_position: 300,
            direction: Direction::RightToLeft,
        },
        PipelineConfig::default(),
    );

    let mut writer = AnnotationWriter::new(Vec::new());
    let summary = pipeline
        .run(|frame, update| writer.write_frame(frame, update))
        .unwrap();

    assert_eq!(summary.total_count, 1);
    assert_eq!(summary.frames_processed, 5);
    assert_eq!(summary.frames_skipped, 1);
    assert_eq!(summary.detections_filtered, 1);

    let out = String::from_utf8(writer.into_inner()).unwrap();
    let records: Vec<serde_json::Value> = out
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 5);

    // Frame 1 carries the crossing of id 1 (320 -> 290)
    assert_eq!(records[1]["frame"], 1);
    assert_eq!(records[1]["crossings"][0], 1);
    // The broken line (frame 3) is absent; frame 4 still matches id 1
    assert_eq!(records[3]["frame"], 4);
    assert_eq!(records[3]["objects"][0]["id"], 1);
    assert_eq!(records[3]["objects"][1]["id"], 2);
    assert_eq!(records[4]["count"], 1);
}

#[test]
fn test_export_after_run() {
    let source = JsonLinesSource::new(Cursor::new(STREAM));
    let mut pipeline = CountingPipeline::with_default_config(source);
    pipeline.run(|_, _| Ok::<_, ()>(())).unwrap();

    let mut sink = Vec::new();
    pipeline.counter().export_count(&mut sink).unwrap();
    assert_eq!(String::from_utf8(sink).unwrap(), "Toplam sayılan yumurta: 1");
}

#[test]
fn test_save_count_to_file() {
    let source = JsonLinesSource::new(Cursor::new(STREAM));
    let mut pipeline = CountingPipeline::with_default_config(source);
    pipeline.run(|_, _| Ok::<_, ()>(())).unwrap();

    let path = std::env::temp_dir().join(format!("egg_counter_result_{}.txt", std::process::id()));
    let message = egg_counter::CountMessage::new("Total eggs counted: {count}");
    pipeline.counter().save_count_to_file(&path, &message).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(text, "Total eggs counted: 1");
}
