//! JSON Lines writer for per-frame annotations, consumed by overlay renderers.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::counter::{Annotation, FrameUpdate};

#[derive(Serialize)]
struct FrameRecord<'a> {
    frame: u64,
    count: u64,
    objects: &'a [Annotation],
    crossings: &'a [u64],
}

pub struct AnnotationWriter<W: Write> {
    writer: W,
}

impl AnnotationWriter<BufWriter<File>> {
    pub fn create(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = File::create(path.as_ref())?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> AnnotationWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_frame(&mut self, frame: u64, update: &FrameUpdate) -> std::io::Result<()> {
        let record = FrameRecord {
            frame,
            count: update.count,
            objects: &update.annotations,
            crossings: &update.crossings,
        };
        serde_json::to_writer(&mut self.writer, &record)?;
        self.writer.write_all(b"\n")
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::BBox;

    #[test]
    fn test_write_frame() {
        let update = FrameUpdate {
            count: 1,
            annotations: vec![Annotation {
                id: 3,
                bbox: BBox::new(1, 2, 3, 4),
            }],
            crossings: vec![3],
        };
        let mut writer = AnnotationWriter::new(Vec::new());
        writer.write_frame(7, &update).unwrap();

        let out = String::from_utf8(writer.into_inner()).unwrap();
        let value: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
        assert_eq!(value["frame"], 7);
        assert_eq!(value["count"], 1);
        assert_eq!(value["objects"][0]["id"], 3);
        assert_eq!(value["objects"][0]["box"]["x2"], 3);
        assert_eq!(value["crossings"][0], 3);
        assert!(out.ends_with('\n'));
    }
}
