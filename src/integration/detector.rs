//! Trait for per-frame detection producers.

use crate::counter::Detection;

/// Trait for anything that yields one frame of detections at a time.
///
/// Implement this trait to connect a detection model (or a recorded
/// detection log) to the counter. Frames must be yielded in video order.
///
/// # Example
///
/// ```ignore
/// use egg_counter::{DetectionSource, Detection};
///
/// struct MyDetector {
///     // Your model and video capture here
/// }
///
/// impl DetectionSource for MyDetector {
///     type Error = std::io::Error;
///
///     fn next_frame(&mut self) -> Option<Result<Vec<Detection>, Self::Error>> {
///         // Grab a frame, run inference, return detections.
///         // Return None once the stream has ended.
///         None
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error;

    /// Detections for the next frame.
    ///
    /// Returns `None` at end of stream. An `Err` affects only the current
    /// frame; the caller may keep pulling frames afterwards.
    fn next_frame(&mut self) -> Option<Result<Vec<Detection>, Self::Error>>;
}

/// Helper trait for converting model-specific outputs to `Detection`.
///
/// Implement this for your model's output format to enable easy conversion.
pub trait IntoDetections {
    /// Convert the output into a vector of detections.
    fn into_detections(self) -> Vec<Detection>;
}

impl IntoDetections for Vec<Detection> {
    fn into_detections(self) -> Vec<Detection> {
        self
    }
}

impl IntoDetections for Vec<(i32, i32, i32, i32, f32)> {
    fn into_detections(self) -> Vec<Detection> {
        self.into_iter()
            .map(|(x1, y1, x2, y2, score)| Detection::new(x1, y1, x2, y2, score))
            .collect()
    }
}

/// Filters detections below a confidence threshold before they reach the counter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceFilter {
    threshold: f32,
}

impl Default for ConfidenceFilter {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl ConfidenceFilter {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Keep detections with a score strictly above the threshold.
    /// Returns the kept detections and the number dropped.
    pub fn apply(&self, detections: Vec<Detection>) -> (Vec<Detection>, usize) {
        let total = detections.len();
        let kept: Vec<Detection> = detections
            .into_iter()
            .filter(|d| d.score > self.threshold)
            .collect();
        let dropped = total - kept.len();
        (kept, dropped)
    }
}
