//! Axis-aligned boxes.

use ndarray::{s, ArrayView2};

use super::RegionOfInterest;
use crate::draw::{draw_rectangle, DrawStyle, Rgb, RgbImage};
use crate::error::{CenfindError, Result};
use crate::types::Position;

/// Axis-aligned box with an exclusive bottom-right corner.
#[derive(Debug, Clone, PartialEq)]
pub struct BBox {
    pub top_left: Position,
    pub bottom_right: Position,
    pub index: usize,
    pub label: String,
    pub confidence: f64,
}

impl BBox {
    /// Create a box from two opposite corners.
    ///
    /// The corners are reordered if needed so height and width are never negative.
    pub fn new(a: Position, b: Position, index: usize, label: impl Into<String>) -> Self {
        Self {
            top_left: Position::new(a.row.min(b.row), a.col.min(b.col)),
            bottom_right: Position::new(a.row.max(b.row), a.col.max(b.col)),
            index,
            label: label.into(),
            confidence: 0.0,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn height(&self) -> i32 {
        self.bottom_right.row - self.top_left.row
    }

    pub fn width(&self) -> i32 {
        self.bottom_right.col - self.top_left.col
    }

    /// `(height, width)`.
    pub fn dims(&self) -> (i32, i32) {
        (self.height(), self.width())
    }

    /// Whether a position falls inside the half-open box.
    pub fn contains(&self, p: Position) -> bool {
        p.row >= self.top_left.row
            && p.row < self.bottom_right.row
            && p.col >= self.top_left.col
            && p.col < self.bottom_right.col
    }

    /// Restrict the box to a plane of `(rows, cols)`.
    pub fn clip(&self, shape: (usize, usize)) -> BBox {
        let rows = i32::try_from(shape.0).unwrap_or(i32::MAX);
        let cols = i32::try_from(shape.1).unwrap_or(i32::MAX);
        let clamp = |p: Position| Position::new(p.row.clamp(0, rows), p.col.clamp(0, cols));
        BBox {
            top_left: clamp(self.top_left),
            bottom_right: clamp(self.bottom_right),
            index: self.index,
            label: self.label.clone(),
            confidence: self.confidence,
        }
    }
}

impl RegionOfInterest for BBox {
    /// Midpoint of the corners, rounded down.
    fn centre(&self) -> Position {
        Position::new(
            (self.top_left.row + self.bottom_right.row).div_euclid(2),
            (self.top_left.col + self.bottom_right.col).div_euclid(2),
        )
    }

    fn bbox(&self) -> BBox {
        self.clone()
    }

    fn draw_onto(&self, image: &mut RgbImage, color: Rgb<u8>, style: &DrawStyle) {
        draw_rectangle(image, self.top_left, self.bottom_right, color, style.thickness);
    }

    fn extract<'a, T>(&self, plane: ArrayView2<'a, T>) -> Result<ArrayView2<'a, T>> {
        let (rows, cols) = plane.dim();
        let (r0, c0) = (self.top_left.row, self.top_left.col);
        let (r1, c1) = (self.bottom_right.row, self.bottom_right.col);
        if r0 < 0 || c0 < 0 || r1 as i64 > rows as i64 || c1 as i64 > cols as i64 {
            return Err(CenfindError::OutOfBounds(format!(
                "box {} -> {} exceeds plane of {}x{}",
                self.top_left, self.bottom_right, rows, cols
            )));
        }
        Ok(plane.slice_move(s![r0 as usize..r1 as usize, c0 as usize..c1 as usize]))
    }
}
