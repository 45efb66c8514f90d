//! Raster helpers used by the detectors.
//!
//! Planes are `ndarray` 2D arrays indexed `[row, col]`. Resampling, disk
//! drawing, component labelling and border following are done by `image`
//! and `imageproc`; the functions here convert between the two layouts.

use std::collections::BTreeMap;

use image::imageops::{self, FilterType};
use image::{GrayImage, ImageBuffer, Luma, Pixel, Primitive};
use imageproc::contours::{find_contours, BorderType};
use imageproc::drawing::draw_filled_circle_mut;
use imageproc::region_labelling::{connected_components, Connectivity};
use ndarray::{Array2, ArrayView2};

use crate::types::Position;

const FOREGROUND: Luma<u8> = Luma([255]);

/// Value at the given percentile (0..=100) with linear interpolation.
fn percentile(sorted: &[f32], p: f64) -> f32 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = (p / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = (rank - lo as f64) as f32;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Percentile-based contrast normalisation.
///
/// Maps the `pmin` percentile to 0 and the `pmax` percentile to 1 without
/// clipping.
pub fn normalize_percentile(plane: ArrayView2<f32>, pmin: f64, pmax: f64) -> Array2<f32> {
    let mut values: Vec<f32> = plane.iter().copied().filter(|v| v.is_finite()).collect();
    values.sort_by(f32::total_cmp);
    let lo = percentile(&values, pmin);
    let hi = percentile(&values, pmax);
    let scale = hi - lo + 1e-20;
    plane.mapv(|v| (v - lo) / scale)
}

/// Binary mask as a grayscale image: `true` becomes 255.
pub fn mask_image(mask: ArrayView2<bool>) -> GrayImage {
    let (rows, cols) = mask.dim();
    GrayImage::from_fn(cols as u32, rows as u32, |x, y| {
        if mask[[y as usize, x as usize]] {
            FOREGROUND
        } else {
            Luma([0])
        }
    })
}

fn luma_image<T>(plane: ArrayView2<T>) -> ImageBuffer<Luma<T>, Vec<T>>
where
    T: Primitive + 'static,
    Luma<T>: Pixel<Subpixel = T>,
{
    let (rows, cols) = plane.dim();
    ImageBuffer::from_fn(cols as u32, rows as u32, |x, y| Luma([plane[[y as usize, x as usize]]]))
}

fn luma_array<T>(image: &ImageBuffer<Luma<T>, Vec<T>>) -> Array2<T>
where
    T: Primitive + 'static,
    Luma<T>: Pixel<Subpixel = T>,
{
    let (width, height) = image.dimensions();
    Array2::from_shape_fn((height as usize, width as usize), |(r, c)| {
        image.get_pixel(c as u32, r as u32)[0]
    })
}

fn resize_luma<T>(plane: ArrayView2<T>, shape: (usize, usize)) -> Array2<T>
where
    T: Primitive + 'static,
    Luma<T>: Pixel<Subpixel = T>,
{
    if plane.is_empty() {
        return Array2::from_elem(shape, T::DEFAULT_MIN_VALUE);
    }
    let resized = imageops::resize(
        &luma_image(plane),
        shape.1 as u32,
        shape.0 as u32,
        FilterType::Nearest,
    );
    luma_array(&resized)
}

/// Nearest-neighbour resampling of a label map to `(rows, cols)`.
pub fn resize_labels(labels: ArrayView2<u32>, shape: (usize, usize)) -> Array2<u32> {
    resize_luma(labels, shape)
}

/// Nearest-neighbour resampling of an intensity plane to `(rows, cols)`.
///
/// `image` clamps float pixels to `[0, 1]`, so the plane is mapped onto that
/// range for the resize and mapped back afterwards.
pub fn resize_plane(plane: ArrayView2<f32>, shape: (usize, usize)) -> Array2<f32> {
    let (lo, hi) = plane
        .iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f32, f32)>, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .unwrap_or((0.0, 0.0));
    let span = hi - lo;
    if span <= 0.0 {
        return Array2::from_elem(shape, lo);
    }
    let unit = plane.mapv(|v| (v - lo) / span);
    resize_luma(unit.view(), shape).mapv(|v| v * span + lo)
}

/// Mask of `(rows, cols)` with a filled disk of `radius` around each
/// position.
///
/// Disks are clipped to the plane. A radius of 0 draws nothing.
pub fn rasterize_disks(shape: (usize, usize), centres: &[Position], radius: usize) -> GrayImage {
    let mut mask = GrayImage::new(shape.1 as u32, shape.0 as u32);
    if radius == 0 {
        return mask;
    }
    let radius = i32::try_from(radius).unwrap_or(i32::MAX);
    for centre in centres {
        draw_filled_circle_mut(&mut mask, (centre.col, centre.row), radius, FOREGROUND);
    }
    mask
}

/// 8-connected labelling of the non-zero pixels of `mask`.
///
/// Returns the label map (0 is background) and the number of components.
pub fn label_components(mask: &GrayImage) -> (Array2<u32>, usize) {
    let labels = connected_components(mask, Connectivity::Eight, Luma([0u8]));
    let count = labels.pixels().map(|p| p[0]).max().unwrap_or(0) as usize;
    (luma_array(&labels), count)
}

/// Mean pixel coordinate of each component, indexed by `label - 1`.
pub fn component_centroids(labels: ArrayView2<u32>, count: usize) -> Vec<(f64, f64)> {
    let mut sums = vec![(0.0f64, 0.0f64, 0usize); count];
    for ((r, c), &label) in labels.indexed_iter() {
        if label == 0 || label as usize > count {
            continue;
        }
        let entry = &mut sums[label as usize - 1];
        entry.0 += r as f64;
        entry.1 += c as f64;
        entry.2 += 1;
    }
    sums.into_iter()
        .map(|(sr, sc, n)| {
            if n == 0 {
                (0.0, 0.0)
            } else {
                (sr / n as f64, sc / n as f64)
            }
        })
        .collect()
}

/// Outer border of every non-zero label, keyed by label.
///
/// Each label is cut out of the map with a one-pixel margin and passed to
/// `find_contours` on its own, so touching instances keep separate borders.
/// A label split into several pieces yields the border of the piece that
/// comes first in raster order.
pub fn label_contours(labels: ArrayView2<u32>) -> BTreeMap<u32, Vec<Position>> {
    let mut extents: BTreeMap<u32, (usize, usize, usize, usize)> = BTreeMap::new();
    for ((r, c), &label) in labels.indexed_iter() {
        if label == 0 {
            continue;
        }
        let e = extents.entry(label).or_insert((r, c, r, c));
        e.0 = e.0.min(r);
        e.1 = e.1.min(c);
        e.2 = e.2.max(r);
        e.3 = e.3.max(c);
    }

    extents
        .into_iter()
        .filter_map(|(label, (r0, c0, r1, c1))| {
            let crop = GrayImage::from_fn((c1 - c0 + 3) as u32, (r1 - r0 + 3) as u32, |x, y| {
                let row = (y as usize + r0).checked_sub(1);
                let col = (x as usize + c0).checked_sub(1);
                match (row, col) {
                    (Some(r), Some(c)) if r <= r1 && c <= c1 && labels[[r, c]] == label => FOREGROUND,
                    _ => Luma([0]),
                }
            });
            let border = find_contours::<i32>(&crop)
                .into_iter()
                .find(|contour| matches!(contour.border_type, BorderType::Outer))?;
            let (dr, dc) = (r0 as i32 - 1, c0 as i32 - 1);
            let points = border
                .points
                .into_iter()
                .map(|p| Position::new(p.y + dr, p.x + dc))
                .collect();
            Some((label, points))
        })
        .collect()
}

/// Keep only the vertices where the chain direction changes.
pub fn compress_chain(points: &[Position]) -> Vec<Position> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }
    let step = |a: Position, b: Position| ((b.row - a.row).signum(), (b.col - a.col).signum());
    (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let here = points[i];
            let next = points[(i + 1) % n];
            step(prev, here) != step(here, next)
        })
        .map(|i| points[i])
        .collect()
}
