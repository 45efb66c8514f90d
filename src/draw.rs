//! Overlay primitives on RGB images.
//!
//! Positions are `(row, col)` while `imageproc` works in `(x, y)`, so the
//! axes are swapped here and nowhere else. Everything drawn outside the
//! image is clipped.

pub use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

use crate::types::Position;

pub const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
pub const RED: Rgb<u8> = Rgb([255, 0, 0]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Marker and stroke settings shared by all ROI variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawStyle {
    /// Diameter of the dot drawn for point ROIs.
    pub marker_size: usize,
    /// Stroke width for outlines and lines.
    pub thickness: usize,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            marker_size: 8,
            thickness: 1,
        }
    }
}

/// Offsets of the parallel strokes that make up a line of `thickness`.
fn stroke_offsets(thickness: usize) -> std::ops::RangeInclusive<i32> {
    let thickness = thickness.max(1) as i32;
    let half = (thickness - 1) / 2;
    -half..=thickness - 1 - half
}

#[inline]
fn to_xy(p: Position, dr: i32, dc: i32) -> (f32, f32) {
    ((p.col + dc) as f32, (p.row + dr) as f32)
}

/// Line segment between two positions.
pub fn draw_line(image: &mut RgbImage, from: Position, to: Position, color: Rgb<u8>, thickness: usize) {
    for offset in stroke_offsets(thickness) {
        draw_line_segment_mut(image, to_xy(from, offset, 0), to_xy(to, offset, 0), color);
        if offset != 0 {
            draw_line_segment_mut(image, to_xy(from, 0, offset), to_xy(to, 0, offset), color);
        }
    }
}

/// Outline of a closed polygon.
pub fn draw_polygon(image: &mut RgbImage, points: &[Position], color: Rgb<u8>, thickness: usize) {
    let n = points.len();
    for i in 0..n {
        draw_line(image, points[i], points[(i + 1) % n], color, thickness);
    }
}

/// Outline of an axis-aligned rectangle with an exclusive bottom-right corner.
///
/// Thicker strokes grow inwards. Empty rectangles draw nothing.
pub fn draw_rectangle(
    image: &mut RgbImage,
    top_left: Position,
    bottom_right: Position,
    color: Rgb<u8>,
    thickness: usize,
) {
    for inset in 0..thickness.max(1) as i32 {
        let width = bottom_right.col - top_left.col - 2 * inset;
        let height = bottom_right.row - top_left.row - 2 * inset;
        if width <= 0 || height <= 0 {
            break;
        }
        let rect = Rect::at(top_left.col + inset, top_left.row + inset).of_size(width as u32, height as u32);
        draw_hollow_rect_mut(image, rect, color);
    }
}

/// Filled dot of diameter `size` centred on a position.
pub fn draw_marker(image: &mut RgbImage, centre: Position, color: Rgb<u8>, size: usize) {
    let radius = i32::try_from(size / 2).unwrap_or(i32::MAX);
    draw_filled_circle_mut(image, (centre.col, centre.row), radius, color);
}
