//! Per-nucleus score records.

use crate::assignment::Assignment;
use crate::roi::RegionOfInterest;
use crate::types::{Position, ScoreRecord};

/// Whether a position lies clear of every frame edge.
///
/// The margin on each axis is `floor(fraction * dimension)` pixels and the
/// comparison is strict, so a centre exactly on the margin is not full.
///
/// # Example
///
/// ```
/// use cenfind::metrics::scoring::is_full_in_frame;
/// use cenfind::types::Position;
///
/// assert!(is_full_in_frame(Position::new(50, 50), (100, 100), 0.05));
/// assert!(!is_full_in_frame(Position::new(5, 50), (100, 100), 0.05));
/// ```
pub fn is_full_in_frame(position: Position, shape: (usize, usize), fraction: f64) -> bool {
    let (rows, cols) = shape;
    within_margin(position.row, rows, fraction) && within_margin(position.col, cols, fraction)
}

fn within_margin(coord: i32, dim: usize, fraction: f64) -> bool {
    let pad = (fraction * dim as f64).floor() as i64;
    let coord = i64::from(coord);
    pad < coord && coord < dim as i64 - pad
}

/// One [`ScoreRecord`] per assignment, in assignment order.
///
/// # Arguments
///
/// * `field` - Name of the field of view
/// * `channel` - Channel the foci were detected in
/// * `assignments` - Output of [`crate::assignment::assign`]
/// * `shape` - `(rows, cols)` of the plane, for the frame test
/// * `fraction` - Frame margin as a fraction of each dimension
pub fn score_records(
    field: &str,
    channel: usize,
    assignments: &[Assignment],
    shape: (usize, usize),
    fraction: f64,
) -> Vec<ScoreRecord> {
    assignments
        .iter()
        .map(|assignment| {
            let nucleus_centre = assignment.nucleus.centre();
            ScoreRecord {
                field: field.to_string(),
                channel,
                nucleus_centre,
                score: assignment.score(),
                is_full: is_full_in_frame(nucleus_centre, shape, fraction),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::{assign, AssignmentPolicy, InsideMargin};
    use crate::roi::{Centre, Contour};

    fn square(origin: (i32, i32), side: i32, index: usize) -> Contour {
        let (r, c) = origin;
        Contour::new(
            vec![
                Position::new(r, c),
                Position::new(r, c + side),
                Position::new(r + side, c + side),
                Position::new(r + side, c),
            ],
            index,
            "Nucleus",
        )
    }

    #[test]
    fn test_margin_is_strict() {
        // 5% of 100 is 5 px.
        assert!(!is_full_in_frame(Position::new(5, 50), (100, 100), 0.05));
        assert!(is_full_in_frame(Position::new(6, 50), (100, 100), 0.05));
        assert!(!is_full_in_frame(Position::new(95, 50), (100, 100), 0.05));
        assert!(is_full_in_frame(Position::new(94, 94), (100, 100), 0.05));
        assert!(!is_full_in_frame(Position::new(50, -1), (100, 100), 0.0));
    }

    #[test]
    fn test_records_follow_assignments() {
        let nuclei = vec![square((40, 40), 20, 0), square((0, 0), 6, 1)];
        let foci = vec![
            Centre::new(Position::new(50, 50), 0, "Centriole"),
            Centre::new(Position::new(52, 48), 1, "Centriole"),
        ];
        let pairs = assign(&foci, &nuclei, InsideMargin(0.0), AssignmentPolicy::NearestWithinMargin).unwrap();
        let records = score_records("field_1", 2, &pairs, (100, 100), 0.05);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].score, 2);
        assert_eq!(records[0].nucleus_centre, Position::new(50, 50));
        assert!(records[0].is_full);
        assert_eq!(records[1].score, 0);
        assert!(!records[1].is_full);
        assert_eq!(records[1].channel, 2);
        assert_eq!(records[1].field, "field_1");
    }
}
