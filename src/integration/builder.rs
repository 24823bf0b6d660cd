//! Builder for creating Detection objects from floating-point detector output.

use crate::counter::{BBox, Detection};
use crate::error::CounterError;

/// Builder for creating `Detection` objects from various input formats.
///
/// Detectors usually report boxes as floats; coordinates are truncated toward
/// zero into integer pixel space when the detection is built.
#[derive(Debug, Clone, Default)]
pub struct DetectionBuilder {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    score: f32,
}

impl DetectionBuilder {
    /// Create a new detection builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bounding box in TLBR format (x1, y1, x2, y2).
    pub fn tlbr(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.x1 = x1;
        self.y1 = y1;
        self.x2 = x2;
        self.y2 = y2;
        self
    }

    /// Set bounding box in XYWH format (center_x, center_y, width, height).
    pub fn xywh(mut self, cx: f32, cy: f32, w: f32, h: f32) -> Self {
        self.x1 = cx - w / 2.0;
        self.y1 = cy - h / 2.0;
        self.x2 = cx + w / 2.0;
        self.y2 = cy + h / 2.0;
        self
    }

    /// Set bounding box in TLWH format (left, top, width, height).
    pub fn tlwh(mut self, l: f32, t: f32, w: f32, h: f32) -> Self {
        self.x1 = l;
        self.y1 = t;
        self.x2 = l + w;
        self.y2 = t + h;
        self
    }

    /// Set the confidence score.
    pub fn score(mut self, score: f32) -> Self {
        self.score = score;
        self
    }

    /// Build the final `Detection`, rejecting non-finite or out-of-range input.
    pub fn build(self) -> Result<Detection, CounterError> {
        let coords = [self.x1, self.y1, self.x2, self.y2];
        if let Some(bad) = coords.iter().find(|c| !c.is_finite()) {
            return Err(CounterError::InvalidDetection {
                index: 0,
                reason: format!("non-finite coordinate {bad}"),
            });
        }

        let detection = Detection::from_bbox(
            BBox::new(
                self.x1 as i32,
                self.y1 as i32,
                self.x2 as i32,
                self.y2 as i32,
            ),
            self.score,
        );
        detection.validate(0)?;
        Ok(detection)
    }
}
