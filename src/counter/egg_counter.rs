//! Main line-crossing counter implementation.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::counter::association::{self, Detection, MATCH_DISTANCE_GATE};
use crate::counter::bbox::Point;
use crate::counter::direction::Direction;
use crate::counter::export::CountMessage;
use crate::counter::tracked_object::{Annotation, TrackedObject};
use crate::error::CounterError;

/// Configuration for the EggCounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    /// x coordinate of the vertical counting line
    pub line_position: i32,
    pub direction: Direction,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            line_position: 300,
            direction: Direction::RightToLeft,
        }
    }
}

/// Result of feeding one frame to the counter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameUpdate {
    /// Cumulative count after this frame
    pub count: u64,
    /// One entry per input detection, in input order
    pub annotations: Vec<Annotation>,
    /// Ids credited to the count during this frame
    pub crossings: Vec<u64>,
}

/// Counts objects crossing a vertical line, each id at most once.
///
/// Identity is kept by matching every detection to the nearest centroid
/// from the previous frame. Objects missing for a single frame are dropped.
#[derive(Debug, Clone)]
pub struct EggCounter {
    config: CounterConfig,
    count: u64,
    next_id: u64,
    frame_id: u64,
    tracked: BTreeMap<u64, TrackedObject>,
    counted: BTreeSet<u64>,
}

impl Default for EggCounter {
    fn default() -> Self {
        Self::new(CounterConfig::default())
    }
}

impl EggCounter {
    pub fn new(config: CounterConfig) -> Self {
        Self {
            config,
            count: 0,
            next_id: 0,
            frame_id: 0,
            tracked: BTreeMap::new(),
            counted: BTreeSet::new(),
        }
    }

    pub fn with_line(line_position: i32, direction: Direction) -> Self {
        Self::new(CounterConfig {
            line_position,
            direction,
        })
    }

    /// Process one frame of detections.
    ///
    /// Detections must already be confidence-filtered. The whole frame is
    /// validated before any state changes, so a rejected frame leaves the
    /// counter untouched.
    pub fn update(&mut self, detections: &[Detection]) -> Result<FrameUpdate, CounterError> {
        for (index, det) in detections.iter().enumerate() {
            det.validate(index)?;
        }

        self.frame_id += 1;

        // Candidates come from the previous frame only, ordered by id.
        let previous: Vec<TrackedObject> = self.tracked.values().copied().collect();
        let track_centers: Vec<Point> = previous.iter().map(|t| t.center).collect();
        let det_centers: Vec<Point> = detections.iter().map(|d| d.center()).collect();
        let dists = association::centroid_distance(&track_centers, &det_centers);
        let nearest = association::nearest_within(&dists, MATCH_DISTANCE_GATE);

        let mut updated = BTreeMap::new();
        let mut annotations = Vec::with_capacity(detections.len());
        let mut crossings = Vec::new();
        let line = self.config.line_position;

        for (det, matched) in detections.iter().zip(nearest) {
            let id = match matched {
                Some(row) => {
                    let prev = previous[row];
                    let current = prev.moved_to(det.bbox);
                    trace!(
                        id = prev.id,
                        from = ?prev.center,
                        to = ?current.center,
                        "detection matched"
                    );

                    if self
                        .config
                        .direction
                        .crosses(prev.center.x, current.center.x, line)
                        && self.counted.insert(prev.id)
                    {
                        self.count += 1;
                        crossings.push(prev.id);
                        debug!(
                            id = prev.id,
                            frame = self.frame_id,
                            count = self.count,
                            "object crossed counting line"
                        );
                    }

                    updated.insert(prev.id, current);
                    prev.id
                }
                None => {
                    self.next_id += 1;
                    let id = self.next_id;
                    updated.insert(id, TrackedObject::new(id, det.bbox));
                    debug!(id, frame = self.frame_id, center = ?det.center(), "new object");
                    id
                }
            };

            annotations.push(Annotation { id, bbox: det.bbox });
        }

        let dropped = self
            .tracked
            .keys()
            .filter(|id| !updated.contains_key(*id))
            .count();
        if dropped > 0 {
            trace!(dropped, frame = self.frame_id, "objects lost");
        }

        self.tracked = updated;
        debug_assert_eq!(self.count as usize, self.counted.len());

        Ok(FrameUpdate {
            count: self.count,
            annotations,
            crossings,
        })
    }

    pub fn get_total_count(&self) -> u64 {
        self.count
    }

    /// Write the default summary line to `sink`.
    pub fn export_count<W: Write>(&self, sink: &mut W) -> Result<(), CounterError> {
        self.export_count_with(sink, &CountMessage::default())
    }

    /// Write the summary line rendered from `message` to `sink`.
    pub fn export_count_with<W: Write>(
        &self,
        sink: &mut W,
        message: &CountMessage,
    ) -> Result<(), CounterError> {
        sink.write_all(message.render(self.count).as_bytes())?;
        Ok(())
    }

    /// Create (or truncate) `path` and write the summary line into it.
    pub fn save_count_to_file(
        &self,
        path: impl AsRef<Path>,
        message: &CountMessage,
    ) -> Result<(), CounterError> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        self.export_count_with(&mut writer, message)?;
        writer.flush()?;
        Ok(())
    }

    pub fn config(&self) -> &CounterConfig {
        &self.config
    }

    pub fn line_position(&self) -> i32 {
        self.config.line_position
    }

    pub fn direction(&self) -> Direction {
        self.config.direction
    }

    /// Objects visible in the last processed frame, ordered by id.
    pub fn tracked_objects(&self) -> impl Iterator<Item = &TrackedObject> {
        self.tracked.values()
    }

    /// Ids already credited to the count, ascending.
    pub fn counted_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.counted.iter().copied()
    }

    pub fn frames_processed(&self) -> u64 {
        self.frame_id
    }
}
