use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use egg_counter::{AppConfig, AnnotationWriter, CountMessage, CountingPipeline, Direction, JsonLinesSource};

#[derive(Parser, Debug)]
#[command(name = "egg-counter", about = "Count eggs crossing a line from per-frame detections")]
struct Args {
    /// JSON Lines file with one frame of detections per line
    #[arg(long, value_name = "PATH")]
    input: PathBuf,
    /// JSON config file; command-line flags override its values
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// x coordinate of the counting line
    #[arg(long)]
    line_position: Option<i32>,
    /// right_to_left or left_to_right
    #[arg(long)]
    direction: Option<Direction>,
    /// Detections at or below this confidence are ignored
    #[arg(long)]
    confidence: Option<f32>,
    /// File receiving the final count
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// Result message template, `{count}` is replaced by the count
    #[arg(long)]
    message: Option<String>,
    /// Write per-frame annotations as JSON Lines
    #[arg(long, value_name = "PATH")]
    annotations: Option<PathBuf>,
}

impl Args {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(line_position) = self.line_position {
            config.counter.line_position = line_position;
        }
        if let Some(direction) = self.direction {
            config.counter.direction = direction;
        }
        if let Some(confidence) = self.confidence {
            config.pipeline.confidence_threshold = confidence;
        }
        if let Some(output) = &self.output {
            config.output.result_path = output.clone();
        }
        if let Some(message) = &self.message {
            config.output.message = CountMessage::new(message.clone());
        }
        if let Some(annotations) = &self.annotations {
            config.output.annotations_path = Some(annotations.clone());
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("egg_counter=info")),
        )
        .with_target(false)
        .init();
    let args = Args::parse();
    run(args)
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AppConfig::default(),
    };
    args.apply(&mut config);

    info!(
        line_position = config.counter.line_position,
        direction = %config.counter.direction,
        confidence = config.pipeline.confidence_threshold,
        "starting egg counter"
    );

    let source = JsonLinesSource::open(&args.input)
        .with_context(|| format!("Failed to open detection stream {}", args.input.display()))?;

    let mut annotations = match &config.output.annotations_path {
        Some(path) => Some(
            AnnotationWriter::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => None,
    };

    let mut pipeline = CountingPipeline::new(source, config.counter, config.pipeline);
    let summary = pipeline
        .run(|frame, update| match annotations.as_mut() {
            Some(writer) => writer.write_frame(frame, update),
            None => Ok(()),
        })
        .context("Failed to write annotations")?;

    if let Some(writer) = annotations.as_mut() {
        writer.flush().context("Failed to flush annotations")?;
    }

    if summary.frames_skipped > 0 {
        warn!(
            skipped = summary.frames_skipped,
            "frames were skipped, objects crossing during them may be missed or recounted"
        );
    }

    println!("{}", config.output.message.render(summary.total_count));

    let result_path = &config.output.result_path;
    pipeline
        .counter()
        .save_count_to_file(result_path, &config.output.message)
        .with_context(|| format!("Failed to write {}", result_path.display()))?;
    info!(path = %result_path.display(), count = summary.total_count, "result saved");

    Ok(())
}
