//! Axis-aligned rectangles and the small set of transforms fighters need.
//!
//! All fighter boxes are authored relative to the fighter's ground-contact
//! point while facing +x. They are mirrored for left-facing fighters and
//! translated by the fighter position before any overlap test.

use serde::{Deserialize, Serialize};

pub use glam::Vec2;

/// Axis-aligned box given by its bottom-left origin and extents.
///
/// A rect with zero width or height is inactive and never overlaps anything.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Bottom edge
    pub y: f32,
    /// Horizontal extent
    pub width: f32,
    /// Vertical extent
    pub height: f32,
}

impl Rect {
    /// The inactive rect.
    pub const EMPTY: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a new rect.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Left edge.
    #[must_use]
    pub fn x_min(&self) -> f32 {
        self.x
    }

    /// Right edge.
    #[must_use]
    pub fn x_max(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn y_min(&self) -> f32 {
        self.y
    }

    /// Top edge.
    #[must_use]
    pub fn y_max(&self) -> f32 {
        self.y + self.height
    }

    /// Horizontal center.
    #[must_use]
    pub fn center_x(&self) -> f32 {
        self.x + self.width * 0.5
    }

    /// Whether this rect takes part in overlap tests.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Checks if this rect overlaps another. Touching edges do not overlap,
    /// and inactive rects overlap nothing.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.is_active()
            && other.is_active()
            && self.x_min() < other.x_max()
            && self.x_max() > other.x_min()
            && self.y_min() < other.y_max()
            && self.y_max() > other.y_min()
    }
}

/// Shifts a rect by an offset.
#[must_use]
pub fn translate(rect: Rect, offset: Vec2) -> Rect {
    Rect::new(rect.x + offset.x, rect.y + offset.y, rect.width, rect.height)
}

/// Reflects a rect horizontally about x = 0.
#[must_use]
pub fn mirror_rect(rect: Rect) -> Rect {
    Rect::new(-rect.x - rect.width, rect.y, rect.width, rect.height)
}

/// Builds a collision box whose bottom-center sits on the origin.
#[must_use]
pub fn collision_box_rect(width: f32, height: f32) -> Rect {
    Rect::new(-width * 0.5, 0.0, width, height)
}
