//! Core value types shared by the geometry, assignment and metrics code.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A pixel coordinate in row/column order.
///
/// All geometry, assignment and metrics code works in `(row, col)`. The
/// `(x, y)` convention only appears at the drawing and export boundary via
/// [`Position::to_xy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    /// Create a new position.
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Euclidean distance to another position, in pixels.
    pub fn distance(&self, other: &Position) -> f64 {
        let dr = f64::from(self.row - other.row);
        let dc = f64::from(self.col - other.col);
        dr.hypot(dc)
    }

    /// Convert to the plotting convention `(x, y) = (col, row)`.
    pub fn to_xy(&self) -> (i32, i32) {
        (self.col, self.row)
    }

    /// Build from the plotting convention `(x, y)`.
    pub fn from_xy(x: i32, y: i32) -> Self {
        Self { row: y, col: x }
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One nucleus and the number of foci assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub field: String,
    pub channel: usize,
    pub nucleus_centre: Position,
    /// Number of foci assigned to the nucleus.
    pub score: usize,
    /// Whether the nucleus centre lies clear of every frame edge.
    pub is_full: bool,
}

/// Accuracy of predicted foci against annotation for one field and channel.
///
/// Ratios are rounded to three decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub dataset: String,
    pub field: String,
    pub channel: usize,
    pub n_actual: usize,
    pub n_preds: usize,
    pub tolerance: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Round a ratio to three decimals for reporting.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Position::new(0, 0);
        let b = Position::new(3, 4);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_xy_round_trip_swaps_axes() {
        let p = Position::new(10, 20);
        assert_eq!(p.to_xy(), (20, 10));
        assert_eq!(Position::from_xy(20, 10), p);
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(2.0 / 3.0), 0.667);
        assert_eq!(round3(0.5), 0.5);
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(4, 7).to_string(), "(4, 7)");
    }
}
