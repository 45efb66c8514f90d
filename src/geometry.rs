//! Polygon geometry on integer row/column contours.
//!
//! Contours are closed polygons given as ordered vertices; the last vertex
//! connects back to the first.

use crate::types::Position;

/// Added to the zeroth moment before dividing, so near-zero-area contours
/// degrade to a finite centroid instead of failing.
pub const MOMENT_EPSILON: f64 = 1e-5;

/// Spatial moments of a polygon up to first order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Moments {
    /// Area.
    pub m00: f64,
    /// First moment along columns.
    pub m10: f64,
    /// First moment along rows.
    pub m01: f64,
}

/// Compute the polygon moments with Green's theorem.
///
/// The result does not depend on vertex orientation.
pub fn polygon_moments(points: &[Position]) -> Moments {
    let n = points.len();
    if n < 3 {
        return Moments::default();
    }

    let mut m00 = 0.0;
    let mut m10 = 0.0;
    let mut m01 = 0.0;
    for i in 0..n {
        let (x0, y0) = (f64::from(points[i].col), f64::from(points[i].row));
        let j = (i + 1) % n;
        let (x1, y1) = (f64::from(points[j].col), f64::from(points[j].row));
        let cross = x0 * y1 - x1 * y0;
        m00 += cross;
        m10 += (x0 + x1) * cross;
        m01 += (y0 + y1) * cross;
    }

    let mut moments = Moments {
        m00: m00 / 2.0,
        m10: m10 / 6.0,
        m01: m01 / 6.0,
    };
    if moments.m00 < 0.0 {
        moments.m00 = -moments.m00;
        moments.m10 = -moments.m10;
        moments.m01 = -moments.m01;
    }
    moments
}

/// Area-weighted centroid of a polygon.
///
/// Contours whose area is below [`MOMENT_EPSILON`] (a single pixel, a straight
/// run along the frame edge) fall back to the mean of their vertices so the
/// centre still lies on the contour.
pub fn polygon_centroid(points: &[Position]) -> Position {
    if points.is_empty() {
        return Position::default();
    }

    let moments = polygon_moments(points);
    if moments.m00 < MOMENT_EPSILON {
        let n = points.len() as f64;
        let row = points.iter().map(|p| f64::from(p.row)).sum::<f64>() / n;
        let col = points.iter().map(|p| f64::from(p.col)).sum::<f64>() / n;
        return Position::new(row.round() as i32, col.round() as i32);
    }

    let col = moments.m10 / (moments.m00 + MOMENT_EPSILON);
    let row = moments.m01 / (moments.m00 + MOMENT_EPSILON);
    Position::new(row.round() as i32, col.round() as i32)
}

/// Smallest enclosing rectangle as `(top_left, bottom_right)`.
///
/// The bottom-right corner is exclusive so that the rectangle covers every
/// contour pixel when used as a slice.
pub fn bounding_rect(points: &[Position]) -> (Position, Position) {
    let Some(first) = points.first() else {
        return (Position::default(), Position::default());
    };

    let mut min = *first;
    let mut max = *first;
    for p in &points[1..] {
        min.row = min.row.min(p.row);
        min.col = min.col.min(p.col);
        max.row = max.row.max(p.row);
        max.col = max.col.max(p.col);
    }
    (min, Position::new(max.row + 1, max.col + 1))
}

/// Distance from a point to the segment `[a, b]`.
fn segment_distance(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return (p.0 - a.0).hypot(p.1 - a.1);
    }
    let t = (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len2).clamp(0.0, 1.0);
    let (px, py) = (a.0 + t * dx, a.1 + t * dy);
    (p.0 - px).hypot(p.1 - py)
}

/// Signed distance from a point to a closed polygon.
///
/// Positive inside, negative outside, zero on the boundary; the magnitude is
/// the distance to the nearest edge.
pub fn signed_distance(point: Position, polygon: &[Position]) -> f64 {
    let n = polygon.len();
    if n == 0 {
        return f64::NEG_INFINITY;
    }

    let p = (f64::from(point.row), f64::from(point.col));
    let vertex = |i: usize| (f64::from(polygon[i].row), f64::from(polygon[i].col));

    let mut min_dist = f64::INFINITY;
    let mut inside = false;
    for i in 0..n {
        let a = vertex(i);
        let b = vertex((i + 1) % n);
        min_dist = min_dist.min(segment_distance(p, a, b));

        // Crossing number along the column axis.
        if (a.0 > p.0) != (b.0 > p.0) {
            let col_at = a.1 + (p.0 - a.0) * (b.1 - a.1) / (b.0 - a.0);
            if p.1 < col_at {
                inside = !inside;
            }
        }
    }

    if min_dist == 0.0 {
        0.0
    } else if inside {
        min_dist
    } else {
        -min_dist
    }
}
