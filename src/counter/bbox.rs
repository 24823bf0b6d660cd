/// Axis-aligned bounding box in integer pixel coordinates.
///
/// Stored in TLBR format: top-left `(x1, y1)` and bottom-right `(x2, y2)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct BBox {
    /// Top-left x coordinate
    pub x1: i32,
    /// Top-left y coordinate
    pub y1: i32,
    /// Bottom-right x coordinate
    pub x2: i32,
    /// Bottom-right y coordinate
    pub y2: i32,
}

/// Integer point in pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        nalgebra::distance(&self.to_point2(), &other.to_point2())
    }

    #[inline]
    fn to_point2(self) -> nalgebra::Point2<f64> {
        nalgebra::Point2::new(self.x as f64, self.y as f64)
    }
}

impl BBox {
    /// Create a new BBox from TLBR coordinates.
    #[inline]
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [i32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    /// Centroid of the box, using truncating integer division.
    #[inline]
    pub fn center(&self) -> Point {
        let cx = (self.x1 as i64 + self.x2 as i64) / 2;
        let cy = (self.y1 as i64 + self.y2 as i64) / 2;
        Point::new(cx as i32, cy as i32)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    /// A box is well formed when its corners are not inverted.
    /// Zero-width or zero-height boxes are accepted.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.x2 >= self.x1 && self.y2 >= self.y1
    }
}
