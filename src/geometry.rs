//! Geometry primitives shared by every dimension: points, rectangles, spacing
//! and the CSS-style box model.
//!
//! All values are in CSS pixels. Rectangles are stored as edges rather than
//! origin + size so that shifting by a scroll offset is a pure translation.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};

/// A point or offset in either client or page space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin `(0, 0)`.
    #[must_use]
    pub fn origin() -> Self {
        Self::default()
    }
}

impl Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self { x: self.x + other.x, y: self.y + other.y }
    }
}

impl Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self { x: self.x - other.x, y: self.y - other.y }
    }
}

impl Neg for Position {
    type Output = Self;

    fn neg(self) -> Self {
        Self { x: -self.x, y: -self.y }
    }
}

/// Edge offsets around a box (margin, padding or border widths).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Spacing {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Spacing {
    /// The same value on all four edges.
    #[must_use]
    pub fn uniform(value: f64) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }
}

/// An axis-aligned rectangle described by its four edges.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Rect {
    /// Build a rectangle from its top-left corner and size.
    #[must_use]
    pub fn from_origin(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { top: y, right: x + width, bottom: y + height, left: x }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    #[must_use]
    pub fn center(&self) -> Position {
        Position { x: (self.left + self.right) / 2.0, y: (self.top + self.bottom) / 2.0 }
    }

    /// Translate the rectangle by `offset`.
    #[must_use]
    pub fn shift(&self, offset: Position) -> Self {
        Self {
            top: self.top + offset.y,
            right: self.right + offset.x,
            bottom: self.bottom + offset.y,
            left: self.left + offset.x,
        }
    }

    /// Grow the rectangle outward by `spacing`.
    #[must_use]
    pub fn expand(&self, spacing: Spacing) -> Self {
        Self {
            top: self.top - spacing.top,
            right: self.right + spacing.right,
            bottom: self.bottom + spacing.bottom,
            left: self.left - spacing.left,
        }
    }

    /// Shrink the rectangle inward by `spacing`.
    #[must_use]
    pub fn contract(&self, spacing: Spacing) -> Self {
        Self {
            top: self.top + spacing.top,
            right: self.right - spacing.right,
            bottom: self.bottom - spacing.bottom,
            left: self.left + spacing.left,
        }
    }
}

/// CSS box model of a measured element.
///
/// Only the border box is stored; the margin, padding and content boxes are
/// derived from it on demand.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxModel {
    pub border_box: Rect,
    #[serde(default)]
    pub margin: Spacing,
    #[serde(default)]
    pub padding: Spacing,
    #[serde(default)]
    pub border: Spacing,
}

impl BoxModel {
    /// A box with no margin, padding or border.
    #[must_use]
    pub fn from_border_box(border_box: Rect) -> Self {
        Self { border_box, ..Self::default() }
    }

    #[must_use]
    pub fn margin_box(&self) -> Rect {
        self.border_box.expand(self.margin)
    }

    #[must_use]
    pub fn padding_box(&self) -> Rect {
        self.border_box.contract(self.border)
    }

    #[must_use]
    pub fn content_box(&self) -> Rect {
        self.padding_box().contract(self.padding)
    }

    /// The same box translated by `offset` (client space to page space).
    #[must_use]
    pub fn shift(&self, offset: Position) -> Self {
        Self { border_box: self.border_box.shift(offset), ..*self }
    }
}
