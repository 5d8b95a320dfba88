//! Geometry: points and client rects in CSS pixels.
//!
//! Coordinates are relative to the top-left corner of the document and
//! rounded to whole pixels by the layout engine.

// ---------------------------------------------------------------------------
// Offset
// ---------------------------------------------------------------------------

/// A point on the page, as passed to `element_from_point`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// The border box of an element, the equivalent of a client bounding rect.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Top-left corner.
    #[inline]
    pub const fn offset(self) -> Offset {
        Offset::new(self.x, self.y)
    }

    /// Whether the box generates any area. Collapsed boxes are never hit.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Half-open containment: the left and top edges are inside, the right
    /// and bottom edges are not.
    #[inline]
    pub const fn contains(self, point: Offset) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}
