//! Detection source reading recorded detector output in JSON Lines form.
//!
//! Each non-blank line holds one frame:
//!
//! ```text
//! {"frame": 0, "detections": [[412.3, 80.0, 455.9, 121.4, 0.91], [120, 75, 160, 118, 0.42]]}
//! ```
//!
//! Every detection is `[x1, y1, x2, y2, confidence]`. Extra fields such as
//! `frame` are ignored; a missing `detections` field means an empty frame.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use serde::Deserialize;

use super::{DetectionBuilder, DetectionSource};
use crate::counter::Detection;
use crate::error::SourceError;

#[derive(Debug, Deserialize)]
struct FrameRecord {
    #[serde(default)]
    detections: Vec<[f32; 5]>,
}

/// Reads one frame of detections per line.
pub struct JsonLinesSource<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl JsonLinesSource<BufReader<File>> {
    /// Open a detection log. Failing here means counting never starts.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    /// Line number of the most recently read line (1-based).
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    fn parse(&self, line: &str) -> Result<Vec<Detection>, SourceError> {
        let record: FrameRecord =
            serde_json::from_str(line).map_err(|source| SourceError::Parse {
                line: self.line_no,
                source,
            })?;

        record
            .detections
            .iter()
            .map(|&[x1, y1, x2, y2, score]| {
                DetectionBuilder::new()
                    .tlbr(x1, y1, x2, y2)
                    .score(score)
                    .build()
                    .map_err(|source| SourceError::Detection {
                        line: self.line_no,
                        source,
                    })
            })
            .collect()
    }
}

impl<R: BufRead> DetectionSource for JsonLinesSource<R> {
    type Error = SourceError;

    fn next_frame(&mut self) -> Option<Result<Vec<Detection>, Self::Error>> {
        loop {
            let line = self.lines.next()?;
            self.line_no += 1;
            match line {
                Err(e) => return Some(Err(SourceError::Io(e))),
                Ok(l) if l.trim().is_empty() => continue,
                Ok(l) => return Some(self.parse(&l)),
            }
        }
    }
}
