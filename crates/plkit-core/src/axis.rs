//! Axis-agnostic accessors.
//!
//! Layout code is written once against a main and a cross axis; these helpers
//! map main/cross values onto x/y and width/height.

use crate::geometry::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Orientation of a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Children flow left to right
    #[default]
    Horizontal,
    /// Children flow top to bottom
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Extent of `size` along this axis.
    #[must_use]
    pub const fn main_of(self, size: Size) -> f32 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// Extent of `size` across this axis.
    #[must_use]
    pub const fn cross_of(self, size: Size) -> f32 {
        self.cross().main_of(size)
    }

    /// Build a size from main/cross extents.
    #[must_use]
    pub const fn size(self, main: f32, cross: f32) -> Size {
        match self {
            Self::Horizontal => Size::new(main, cross),
            Self::Vertical => Size::new(cross, main),
        }
    }

    /// Build a point from main/cross coordinates.
    #[must_use]
    pub const fn point(self, main: f32, cross: f32) -> Point {
        match self {
            Self::Horizontal => Point::new(main, cross),
            Self::Vertical => Point::new(cross, main),
        }
    }

    /// Build a rect from main/cross spans.
    #[must_use]
    pub const fn rect(self, main_start: f32, cross_start: f32, main_len: f32, cross_len: f32) -> Rect {
        let origin = self.point(main_start, cross_start);
        let size = self.size(main_len, cross_len);
        Rect::from_origin_size(origin, size)
    }

    /// Leading coordinate of `rect` along this axis.
    #[must_use]
    pub const fn start_of(self, rect: Rect) -> f32 {
        match self {
            Self::Horizontal => rect.x,
            Self::Vertical => rect.y,
        }
    }
}
