//! Polygonal regions traced around blobs.

use super::{BBox, Centre, RegionOfInterest};
use crate::draw::{draw_marker, draw_polygon, DrawStyle, Rgb, RgbImage};
use crate::geometry::{bounding_rect, polygon_centroid, polygon_moments, signed_distance};
use crate::types::Position;

/// A closed polygon traced around a blob such as a nucleus.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    /// Boundary vertices in tracing order.
    pub points: Vec<Position>,
    pub index: usize,
    pub label: String,
    pub confidence: f64,
    /// Points assigned to this blob.
    pub children: Vec<Centre>,
}

impl Contour {
    pub fn new(points: Vec<Position>, index: usize, label: impl Into<String>) -> Self {
        Self {
            points,
            index,
            label: label.into(),
            confidence: 0.0,
            children: Vec::new(),
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn area(&self) -> f64 {
        polygon_moments(&self.points).m00
    }

    /// Signed distance from a point to the boundary, positive inside.
    pub fn signed_distance(&self, point: Position) -> f64 {
        signed_distance(point, &self.points)
    }

    /// The centre as a labelled point carrying this contour's identity.
    pub fn centre_roi(&self) -> Centre {
        Centre::new(self.centre(), self.index, self.label.clone()).with_confidence(self.confidence)
    }

    pub fn add_child(&mut self, centre: Centre) {
        self.children.push(centre);
    }
}

impl RegionOfInterest for Contour {
    /// Area-weighted centroid, clamped into the bounding box.
    fn centre(&self) -> Position {
        let centroid = polygon_centroid(&self.points);
        let (tl, br) = bounding_rect(&self.points);
        Position::new(
            centroid.row.clamp(tl.row, (br.row - 1).max(tl.row)),
            centroid.col.clamp(tl.col, (br.col - 1).max(tl.col)),
        )
    }

    fn bbox(&self) -> BBox {
        let (tl, br) = bounding_rect(&self.points);
        BBox::new(tl, br, self.index, self.label.clone()).with_confidence(self.confidence)
    }

    fn draw_onto(&self, image: &mut RgbImage, color: Rgb<u8>, style: &DrawStyle) {
        draw_polygon(image, &self.points, color, style.thickness.max(2));
        draw_marker(image, self.centre(), color, style.marker_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn square(side: i32) -> Contour {
        Contour::new(
            vec![
                Position::new(0, 0),
                Position::new(0, side),
                Position::new(side, side),
                Position::new(side, 0),
            ],
            0,
            "Nucleus",
        )
    }

    #[test]
    fn test_centre_and_bbox() {
        let contour = square(20);
        assert_eq!(contour.centre(), Position::new(10, 10));
        let bbox = contour.bbox();
        assert_eq!(bbox.dims(), (21, 21));
        assert!(bbox.contains(contour.centre()));
    }

    #[test]
    fn test_area() {
        assert!((square(20).area() - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_centre_roi_keeps_identity() {
        let mut contour = square(10);
        contour.index = 4;
        let centre = contour.centre_roi();
        assert_eq!(centre.index, 4);
        assert_eq!(centre.label, "Nucleus");
        assert_eq!(centre.position, Position::new(5, 5));
    }

    #[test]
    fn test_extract_uses_bbox() {
        let plane = Array2::<f32>::ones((50, 50));
        let crop = square(20).extract(plane.view()).unwrap();
        assert_eq!(crop.dim(), (21, 21));
    }

    #[test]
    fn test_draw_keeps_shape() {
        let mut image = RgbImage::new(30, 30);
        square(20).draw_onto(&mut image, Rgb([0, 255, 0]), &DrawStyle::default());
        assert_eq!(image.dimensions(), (30, 30));
        assert_eq!(image.get_pixel(0, 0)[1], 255);
    }
}
