//! Point regions and their synthetic boxes.

use super::{BBox, RegionOfInterest};
use crate::draw::{draw_marker, DrawStyle, Rgb, RgbImage};
use crate::types::Position;

/// Half side of the square box synthesised around a point.
pub const CENTRE_BOX_HALF_SIDE: i32 = 32;

/// A point-like region such as a centriole focus.
#[derive(Debug, Clone, PartialEq)]
pub struct Centre {
    pub position: Position,
    pub index: usize,
    pub label: String,
    /// Detection confidence; `-1` when the detector does not report one.
    pub confidence: f64,
    /// Coarser locus this point belongs to, e.g. the centrosome that merges
    /// neighbouring foci.
    pub parent: Option<Box<Centre>>,
}

impl Centre {
    pub fn new(position: Position, index: usize, label: impl Into<String>) -> Self {
        Self {
            position,
            index,
            label: label.into(),
            confidence: 0.0,
            parent: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn with_parent(mut self, parent: Centre) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    pub fn row(&self) -> i32 {
        self.position.row
    }

    pub fn col(&self) -> i32 {
        self.position.col
    }
}

impl RegionOfInterest for Centre {
    fn centre(&self) -> Position {
        self.position
    }

    /// 64x64 square centred on the point.
    fn bbox(&self) -> BBox {
        let half = CENTRE_BOX_HALF_SIDE;
        BBox::new(
            Position::new(self.position.row - half, self.position.col - half),
            Position::new(self.position.row + half, self.position.col + half),
            self.index,
            self.label.clone(),
        )
        .with_confidence(self.confidence)
    }

    fn draw_onto(&self, image: &mut RgbImage, color: Rgb<u8>, style: &DrawStyle) {
        draw_marker(image, self.position, color, style.marker_size);
    }
}
