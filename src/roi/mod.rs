//! Regions of interest: points, polygonal blobs and boxes.
//!
//! Every variant answers the same questions (centre, bounding box, drawing,
//! sub-region extraction) through [`RegionOfInterest`]. Detectors return the
//! tagged [`Roi`] so callers can match exhaustively on the variant.

pub mod bbox;
pub mod centre;
pub mod contour;

pub use bbox::BBox;
pub use centre::Centre;
pub use contour::Contour;

use ndarray::ArrayView2;

use crate::draw::{DrawStyle, Rgb, RgbImage};
use crate::error::Result;
use crate::types::Position;

/// Capabilities shared by all region variants.
pub trait RegionOfInterest {
    /// Representative point of the region.
    fn centre(&self) -> Position;

    /// Axis-aligned rectangle enclosing the region.
    fn bbox(&self) -> BBox;

    /// Overlay the region onto an RGB buffer.
    fn draw_onto(&self, image: &mut RgbImage, color: Rgb<u8>, style: &DrawStyle);

    /// Crop the region's bounding box out of a plane.
    ///
    /// Fails with `OutOfBounds` when the box leaves the plane; clip with
    /// [`BBox::clip`] first when that can happen.
    fn extract<'a, T>(&self, plane: ArrayView2<'a, T>) -> Result<ArrayView2<'a, T>> {
        self.bbox().extract(plane)
    }
}

/// A region of interest of any variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Roi {
    Centre(Centre),
    Contour(Contour),
    BBox(BBox),
}

impl Roi {
    pub fn label(&self) -> &str {
        match self {
            Roi::Centre(c) => &c.label,
            Roi::Contour(c) => &c.label,
            Roi::BBox(b) => &b.label,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Roi::Centre(c) => c.index,
            Roi::Contour(c) => c.index,
            Roi::BBox(b) => b.index,
        }
    }

    pub fn into_centre(self) -> Option<Centre> {
        match self {
            Roi::Centre(c) => Some(c),
            _ => None,
        }
    }

    pub fn into_contour(self) -> Option<Contour> {
        match self {
            Roi::Contour(c) => Some(c),
            _ => None,
        }
    }
}

impl RegionOfInterest for Roi {
    fn centre(&self) -> Position {
        match self {
            Roi::Centre(c) => c.centre(),
            Roi::Contour(c) => c.centre(),
            Roi::BBox(b) => b.centre(),
        }
    }

    fn bbox(&self) -> BBox {
        match self {
            Roi::Centre(c) => c.bbox(),
            Roi::Contour(c) => c.bbox(),
            Roi::BBox(b) => b.clone(),
        }
    }

    fn draw_onto(&self, image: &mut RgbImage, color: Rgb<u8>, style: &DrawStyle) {
        match self {
            Roi::Centre(c) => c.draw_onto(image, color, style),
            Roi::Contour(c) => c.draw_onto(image, color, style),
            Roi::BBox(b) => b.draw_onto(image, color, style),
        }
    }
}

impl From<Centre> for Roi {
    fn from(value: Centre) -> Self {
        Roi::Centre(value)
    }
}

impl From<Contour> for Roi {
    fn from(value: Contour) -> Self {
        Roi::Contour(value)
    }
}

impl From<BBox> for Roi {
    fn from(value: BBox) -> Self {
        Roi::BBox(value)
    }
}

/// Split a detector result into point and polygon regions, dropping boxes.
pub fn partition(rois: Vec<Roi>) -> (Vec<Centre>, Vec<Contour>) {
    let mut centres = Vec::new();
    let mut contours = Vec::new();
    for roi in rois {
        match roi {
            Roi::Centre(c) => centres.push(c),
            Roi::Contour(c) => contours.push(c),
            Roi::BBox(_) => {}
        }
    }
    (centres, contours)
}
