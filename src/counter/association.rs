//! Nearest-centroid association between tracked objects and detections.

use ndarray::Array2;

use crate::counter::bbox::{BBox, Point};
use crate::error::CounterError;

/// Detections at or beyond this centroid distance never match a track.
pub const MATCH_DISTANCE_GATE: f64 = 50.0;

/// Detection input for the counter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    /// Bounding box in TLBR format (x1, y1, x2, y2)
    pub bbox: BBox,
    /// Detection confidence score
    pub score: f32,
}

impl Detection {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32, score: f32) -> Self {
        Self {
            bbox: BBox::new(x1, y1, x2, y2),
            score,
        }
    }

    pub fn from_bbox(bbox: BBox, score: f32) -> Self {
        Self { bbox, score }
    }

    #[inline]
    pub fn center(&self) -> Point {
        self.bbox.center()
    }

    /// Check the detection against the input contract.
    ///
    /// `index` is the detection's position within its frame and is only used
    /// for the error report.
    pub fn validate(&self, index: usize) -> Result<(), CounterError> {
        if !self.bbox.is_well_formed() {
            return Err(CounterError::InvalidDetection {
                index,
                reason: format!("inverted box {:?}", self.bbox.to_tlbr()),
            });
        }
        if !self.score.is_finite() || !(0.0..=1.0).contains(&self.score) {
            return Err(CounterError::InvalidDetection {
                index,
                reason: format!("confidence {} outside [0, 1]", self.score),
            });
        }
        Ok(())
    }
}

/// Compute the centroid distance matrix between tracks (rows) and detections (columns).
pub fn centroid_distance(track_centers: &[Point], det_centers: &[Point]) -> Array2<f64> {
    let mut dists = Array2::zeros((track_centers.len(), det_centers.len()));
    for (i, t) in track_centers.iter().enumerate() {
        for (j, d) in det_centers.iter().enumerate() {
            dists[[i, j]] = t.distance(d);
        }
    }
    dists
}

/// For every detection column, pick the row with the smallest distance below `gate`.
///
/// Rows are scanned in order and only a strictly smaller distance replaces the
/// current best, so on equal distances the earliest row wins. A row may be
/// chosen by several columns.
pub fn nearest_within(dists: &Array2<f64>, gate: f64) -> Vec<Option<usize>> {
    let (num_rows, num_cols) = dists.dim();
    let mut nearest = Vec::with_capacity(num_cols);

    for j in 0..num_cols {
        let mut best: Option<(usize, f64)> = None;
        for i in 0..num_rows {
            let d = dists[[i, j]];
            if d >= gate {
                continue;
            }
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((i, d)),
            }
        }
        nearest.push(best.map(|(i, _)| i));
    }

    nearest
}
