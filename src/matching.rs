//! Point matching between annotated and predicted foci.

use crate::error::{CenfindError, Result};
use crate::types::Position;
use std::collections::HashSet;

/// An annotated point paired with a predicted point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointMatch {
    pub annotation_idx: usize,
    pub prediction_idx: usize,
    pub distance: f64,
}

/// Greedily match predicted points to annotated points.
///
/// All pairs within `cutoff` are ranked by distance and taken closest
/// first; each point is used at most once. Ties are broken by annotation
/// index, then prediction index, so the result never depends on input
/// hashing.
///
/// # Arguments
///
/// * `annotation` - Ground-truth positions
/// * `predictions` - Detected positions
/// * `cutoff` - Maximum distance, in pixels, for a pair to count as a match
///
/// # Returns
///
/// Returns the accepted pairs in the order they were taken.
///
/// # Example
///
/// ```
/// use cenfind::matching::match_points;
/// use cenfind::types::Position;
///
/// let annotation = vec![Position::new(10, 10), Position::new(50, 50)];
/// let predictions = vec![Position::new(10, 12)];
/// let matches = match_points(&annotation, &predictions, 5.0).unwrap();
/// assert_eq!(matches.len(), 1);
/// assert_eq!(matches[0].annotation_idx, 0);
/// ```
pub fn match_points(
    annotation: &[Position],
    predictions: &[Position],
    cutoff: f64,
) -> Result<Vec<PointMatch>> {
    validate_tolerance(cutoff)?;

    let mut candidates: Vec<PointMatch> = Vec::new();
    for (annotation_idx, a) in annotation.iter().enumerate() {
        for (prediction_idx, p) in predictions.iter().enumerate() {
            let distance = a.distance(p);
            if distance <= cutoff {
                candidates.push(PointMatch {
                    annotation_idx,
                    prediction_idx,
                    distance,
                });
            }
        }
    }

    candidates.sort_by(|a, b| {
        a.distance
            .total_cmp(&b.distance)
            .then(a.annotation_idx.cmp(&b.annotation_idx))
            .then(a.prediction_idx.cmp(&b.prediction_idx))
    });

    let mut used_annotation: HashSet<usize> = HashSet::new();
    let mut used_prediction: HashSet<usize> = HashSet::new();
    let mut matches = Vec::new();

    for candidate in candidates {
        if used_annotation.contains(&candidate.annotation_idx)
            || used_prediction.contains(&candidate.prediction_idx)
        {
            continue;
        }
        used_annotation.insert(candidate.annotation_idx);
        used_prediction.insert(candidate.prediction_idx);
        matches.push(candidate);
    }

    Ok(matches)
}

/// Check that a matching tolerance is a finite, non-negative distance.
pub fn validate_tolerance(tolerance: f64) -> Result<()> {
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(CenfindError::InvalidTolerance(format!(
            "tolerance must be a non-negative number of pixels, got {tolerance}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(coords: &[(i32, i32)]) -> Vec<Position> {
        coords.iter().map(|&(r, c)| Position::new(r, c)).collect()
    }

    #[test]
    fn test_perfect_match() {
        let a = points(&[(10, 10)]);
        let matches = match_points(&a, &a, 0.0).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].distance, 0.0);
    }

    #[test]
    fn test_no_match_beyond_cutoff() {
        let a = points(&[(10, 10)]);
        let p = points(&[(200, 200)]);
        assert!(match_points(&a, &p, 5.0).unwrap().is_empty());
    }

    #[test]
    fn test_closest_pair_taken_first() {
        // Prediction 0 is 2px from annotation 1 and 3px from annotation 0.
        let a = points(&[(0, 0), (0, 5)]);
        let p = points(&[(0, 3), (0, 1)]);
        let matches = match_points(&a, &p, 5.0).unwrap();

        assert_eq!(matches.len(), 2);
        assert_eq!((matches[0].annotation_idx, matches[0].prediction_idx), (0, 1));
        assert_eq!((matches[1].annotation_idx, matches[1].prediction_idx), (1, 0));
    }

    #[test]
    fn test_each_point_used_once() {
        let a = points(&[(10, 10)]);
        let p = points(&[(10, 11), (10, 9), (11, 10)]);
        let matches = match_points(&a, &p, 5.0).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].prediction_idx, 0);
    }

    #[test]
    fn test_invalid_tolerance() {
        let a = points(&[(10, 10)]);
        assert!(matches!(
            match_points(&a, &a, -1.0),
            Err(CenfindError::InvalidTolerance(_))
        ));
        assert!(match_points(&a, &a, f64::NAN).is_err());
    }
}
