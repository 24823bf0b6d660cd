//! A single object followed across consecutive frames.

use crate::counter::bbox::{BBox, Point};

/// Object seen in the previous frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedObject {
    /// Unique object identifier, never reused
    pub id: u64,
    /// Centroid of the most recent matched box
    pub center: Point,
    /// Most recent matched box
    pub bbox: BBox,
}

impl TrackedObject {
    pub fn new(id: u64, bbox: BBox) -> Self {
        Self {
            id,
            center: bbox.center(),
            bbox,
        }
    }

    /// Same object observed at a new box.
    pub fn moved_to(&self, bbox: BBox) -> Self {
        Self::new(self.id, bbox)
    }
}

/// Per-detection result handed to the rendering side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Annotation {
    pub id: u64,
    #[serde(rename = "box")]
    pub bbox: BBox,
}
