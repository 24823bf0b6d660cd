//! CountingPipeline for combining a detection source with the counter.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{ConfidenceFilter, DetectionSource};
use crate::counter::{CounterConfig, EggCounter, FrameUpdate};

/// Driver-side settings that never reach the counter itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Detections with a score at or below this value are discarded.
    pub confidence_threshold: f32,
    /// Log progress every N frames; 0 disables progress logging.
    pub progress_interval: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.5,
            progress_interval: 30,
        }
    }
}

/// What happened to a single frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    Counted(FrameUpdate),
    /// The frame was dropped without touching the counter.
    Skipped,
}

/// Totals reported once the stream ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub frames_processed: u64,
    pub frames_skipped: u64,
    pub detections_filtered: usize,
    pub total_count: u64,
}

/// Pulls frames from a `DetectionSource`, filters them by confidence and
/// feeds them to an `EggCounter`.
///
/// A frame whose detection fails, or whose detections are rejected by the
/// counter, is skipped and logged; counting continues with the next frame.
pub struct CountingPipeline<D: DetectionSource> {
    source: D,
    counter: EggCounter,
    filter: ConfidenceFilter,
    progress_interval: u64,
    frames_read: u64,
    frames_skipped: u64,
    detections_filtered: usize,
}

impl<D> CountingPipeline<D>
where
    D: DetectionSource,
    D::Error: Display,
{
    /// Create a new pipeline with the given source and configuration.
    pub fn new(source: D, counter: CounterConfig, config: PipelineConfig) -> Self {
        Self {
            source,
            counter: EggCounter::new(counter),
            filter: ConfidenceFilter::new(config.confidence_threshold),
            progress_interval: config.progress_interval,
            frames_read: 0,
            frames_skipped: 0,
            detections_filtered: 0,
        }
    }

    /// Create a new pipeline with default counter and pipeline configuration.
    pub fn with_default_config(source: D) -> Self {
        Self::new(source, CounterConfig::default(), PipelineConfig::default())
    }

    /// Pull and process a single frame.
    ///
    /// Returns `None` once the source is exhausted.
    pub fn process_next_frame(&mut self) -> Option<FrameOutcome> {
        let frame = self.source.next_frame()?;
        self.frames_read += 1;

        let outcome = match frame {
            Err(e) => {
                warn!(frame = self.frames_read - 1, error = %e, "detection failed, skipping frame");
                self.frames_skipped += 1;
                FrameOutcome::Skipped
            }
            Ok(detections) => {
                let (kept, dropped) = self.filter.apply(detections);
                self.detections_filtered += dropped;
                match self.counter.update(&kept) {
                    Ok(update) => FrameOutcome::Counted(update),
                    Err(e) => {
                        warn!(frame = self.frames_read - 1, error = %e, "frame rejected, skipping");
                        self.frames_skipped += 1;
                        FrameOutcome::Skipped
                    }
                }
            }
        };

        if self.progress_interval > 0 && self.frames_read % self.progress_interval == 0 {
            info!(
                frames = self.frames_read,
                count = self.counter.get_total_count(),
                "processing"
            );
        }

        Some(outcome)
    }

    /// Drive the source to the end of the stream.
    ///
    /// `on_frame` receives the zero-based frame index and the update for
    /// every frame that was counted; its first error stops the run.
    pub fn run<F, E>(&mut self, mut on_frame: F) -> Result<RunSummary, E>
    where
        F: FnMut(u64, &FrameUpdate) -> Result<(), E>,
    {
        while let Some(outcome) = self.process_next_frame() {
            if let FrameOutcome::Counted(update) = outcome {
                on_frame(self.frames_read - 1, &update)?;
            }
        }

        let summary = self.summary();
        info!(
            frames = summary.frames_processed,
            skipped = summary.frames_skipped,
            count = summary.total_count,
            "stream finished"
        );
        Ok(summary)
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            frames_processed: self.frames_read - self.frames_skipped,
            frames_skipped: self.frames_skipped,
            detections_filtered: self.detections_filtered,
            total_count: self.counter.get_total_count(),
        }
    }

    /// Get a reference to the underlying source.
    pub fn source(&self) -> &D {
        &self.source
    }

    /// Get a mutable reference to the underlying source.
    pub fn source_mut(&mut self) -> &mut D {
        &mut self.source
    }

    /// Get a reference to the underlying counter.
    pub fn counter(&self) -> &EggCounter {
        &self.counter
    }

    pub fn into_counter(self) -> EggCounter {
        self.counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::Detection;
    use std::collections::VecDeque;

    struct MockSource {
        frames: VecDeque<Result<Vec<Detection>, String>>,
    }

    impl DetectionSource for MockSource {
        type Error = String;

        fn next_frame(&mut self) -> Option<Result<Vec<Detection>, Self::Error>> {
            self.frames.pop_front()
        }
    }

    fn det_at(cx: i32, score: f32) -> Detection {
        Detection::new(cx - 20, 80, cx + 20, 120, score)
    }

    #[test]
    fn test_counting_pipeline() {
        let source = MockSource {
            frames: VecDeque::from(vec![
                Ok(vec![det_at(320, 0.9)]),
                Ok(vec![det_at(280, 0.9)]),
                Ok(vec![det_at(260, 0.9)]),
            ]),
        };

        let mut pipeline = CountingPipeline::with_default_config(source);
        let mut counts = Vec::new();
        let summary = pipeline
            .run(|_, update| {
                counts.push(update.count);
                Ok::<_, ()>(())
            })
            .unwrap();

        assert_eq!(counts, vec![0, 1, 1]);
        assert_eq!(summary.total_count, 1);
        assert_eq!(summary.frames_processed, 3);
        assert_eq!(summary.frames_skipped, 0);
    }

    #[test]
    fn test_low_confidence_never_reaches_counter() {
        let source = MockSource {
            frames: VecDeque::from(vec![
                Ok(vec![det_at(320, 0.9)]),
                Ok(vec![det_at(280, 0.5)]),
            ]),
        };

        let mut pipeline = CountingPipeline::with_default_config(source);
        let summary = pipeline.run(|_, _| Ok::<_, ()>(())).unwrap();

        assert_eq!(summary.total_count, 0);
        assert_eq!(summary.detections_filtered, 1);
        assert_eq!(pipeline.counter().tracked_objects().count(), 0);
    }

    #[test]
    fn test_failed_frame_is_skipped() {
        let source = MockSource {
            frames: VecDeque::from(vec![
                Ok(vec![det_at(320, 0.9)]),
                Err("inference crashed".to_string()),
                Ok(vec![det_at(290, 0.9)]),
            ]),
        };

        let mut pipeline = CountingPipeline::with_default_config(source);
        let mut seen = Vec::new();
        let summary = pipeline
            .run(|frame, _| {
                seen.push(frame);
                Ok::<_, ()>(())
            })
            .unwrap();

        // The skipped frame never reached the counter, so the track survives.
        assert_eq!(seen, vec![0, 2]);
        assert_eq!(summary.frames_skipped, 1);
        assert_eq!(summary.frames_processed, 2);
        assert_eq!(summary.total_count, 1);
    }

    #[test]
    fn test_rejected_frame_is_skipped() {
        let source = MockSource {
            frames: VecDeque::from(vec![Ok(vec![Detection::new(50, 0, 10, 10, 0.9)])]),
        };

        let mut pipeline = CountingPipeline::with_default_config(source);
        assert_eq!(pipeline.process_next_frame(), Some(FrameOutcome::Skipped));
        assert_eq!(pipeline.process_next_frame(), None);
        assert_eq!(pipeline.summary().frames_skipped, 1);
        assert_eq!(pipeline.counter().frames_processed(), 0);
    }

    #[test]
    fn test_callback_error_stops_run() {
        let source = MockSource {
            frames: VecDeque::from(vec![Ok(vec![]), Ok(vec![])]),
        };

        let mut pipeline = CountingPipeline::with_default_config(source);
        let result = pipeline.run(|_, _| Err("sink closed"));
        assert_eq!(result, Err("sink closed"));
        assert_eq!(pipeline.source().frames.len(), 1);
    }
}
