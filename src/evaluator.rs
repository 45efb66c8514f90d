//! Accuracy evaluation of detected foci against annotated positions.

use crate::detector::Detector;
use crate::error::Result;
use crate::field::Field;
use crate::matching::{match_points, validate_tolerance};
use crate::metrics::accuracy::MatchCounts;
use crate::roi::RegionOfInterest;
use crate::stats::RunStats;
use crate::types::{round3, MetricRecord, Position};

/// Annotated and predicted foci for one field and channel.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSample {
    pub field: String,
    pub channel: usize,
    pub annotation: Vec<Position>,
    pub predictions: Vec<Position>,
}

/// A field with ground-truth foci for one of its channels.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedField {
    pub field: Field,
    pub channel: usize,
    pub annotation: Vec<Position>,
}

/// Metrics of a detect-and-evaluate run with its field counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    pub records: Vec<MetricRecord>,
    pub stats: RunStats,
}

/// Evaluate predicted foci against annotation for one field and channel.
///
/// Points are paired with [`match_points`] under `tolerance`. When either
/// set is empty, precision, recall and F1 are all 0. Ratios are rounded to
/// three decimals.
///
/// # Arguments
///
/// * `dataset` - Dataset name reported in the record
/// * `field` - Field name
/// * `channel` - Channel index
/// * `annotation` - Ground-truth positions
/// * `predictions` - Detected positions
/// * `tolerance` - Matching cutoff in pixels
///
/// # Example
///
/// ```
/// use cenfind::evaluator::evaluate_field;
/// use cenfind::types::Position;
///
/// let annotation = [Position::new(10, 10), Position::new(50, 50)];
/// let predictions = [Position::new(10, 12)];
/// let record = evaluate_field("ds", "f1", 1, &annotation, &predictions, 5.0).unwrap();
/// assert_eq!(record.precision, 1.0);
/// assert_eq!(record.recall, 0.5);
/// assert_eq!(record.f1, 0.667);
/// ```
pub fn evaluate_field(
    dataset: &str,
    field: &str,
    channel: usize,
    annotation: &[Position],
    predictions: &[Position],
    tolerance: f64,
) -> Result<MetricRecord> {
    validate_tolerance(tolerance)?;

    let mut record = MetricRecord {
        dataset: dataset.to_string(),
        field: field.to_string(),
        channel,
        n_actual: annotation.len(),
        n_preds: predictions.len(),
        tolerance,
        precision: 0.0,
        recall: 0.0,
        f1: 0.0,
    };

    if annotation.is_empty() || predictions.is_empty() {
        log::warn!(
            "{field} channel {channel}: {} annotated, {} predicted; metrics set to 0",
            annotation.len(),
            predictions.len()
        );
        return Ok(record);
    }

    let matched = match_points(annotation, predictions, tolerance)?.len();
    let counts = MatchCounts::new(annotation.len(), predictions.len(), matched);
    record.precision = round3(counts.precision());
    record.recall = round3(counts.recall());
    record.f1 = round3(counts.f1());

    log::debug!(
        "{field} channel {channel} @ {tolerance}px: {matched}/{} matched",
        annotation.len()
    );
    Ok(record)
}

/// Evaluate every sample at every tolerance.
///
/// Records are ordered by tolerance, then by sample.
pub fn evaluate_dataset(
    dataset: &str,
    samples: &[FieldSample],
    tolerances: &[f64],
) -> Result<Vec<MetricRecord>> {
    for &tolerance in tolerances {
        validate_tolerance(tolerance)?;
    }

    let mut records = Vec::with_capacity(samples.len() * tolerances.len());
    for &tolerance in tolerances {
        for sample in samples {
            records.push(evaluate_field(
                dataset,
                &sample.field,
                sample.channel,
                &sample.annotation,
                &sample.predictions,
                tolerance,
            )?);
        }
    }

    log::info!(
        "{dataset}: {} fields evaluated at {} tolerance(s)",
        samples.len(),
        tolerances.len()
    );
    Ok(records)
}

/// Run a detector on each annotated field and evaluate its output.
///
/// The detector runs once per field; the centre of every returned region
/// is taken as a predicted focus. Fields whose detection fails with a
/// field-scoped error are logged, left out of the records and counted as
/// skipped in [`Evaluation::stats`]; other errors abort.
pub fn detect_and_evaluate(
    dataset: &str,
    fields: &[AnnotatedField],
    detector: &dyn Detector,
    tolerances: &[f64],
) -> Result<Evaluation> {
    let mut stats = RunStats::new();
    let mut samples = Vec::with_capacity(fields.len());
    for annotated in fields {
        let detected = annotated
            .field
            .channel(annotated.channel)
            .and_then(|plane| detector.detect(plane));
        let rois = match detected {
            Ok(rois) => rois,
            Err(e) if e.is_field_scoped() => {
                log::warn!("Skipping field {}: {}", annotated.field.name, e);
                stats.skip_field();
                continue;
            }
            Err(e) => return Err(e),
        };

        stats.add_field(rois.len(), 0);
        samples.push(FieldSample {
            field: annotated.field.name.clone(),
            channel: annotated.channel,
            annotation: annotated.annotation.clone(),
            predictions: rois.iter().map(|roi| roi.centre()).collect(),
        });
    }

    let records = evaluate_dataset(dataset, &samples, tolerances)?;
    log::info!("{dataset}: {}", stats.summary_string());
    Ok(Evaluation { records, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::DetectorRole;
    use crate::error::CenfindError;
    use crate::roi::{Centre, Roi};
    use ndarray::{Array3, ArrayView2};

    /// Finds one focus per field; planes of the wrong size are rejected.
    struct SizedDetector(usize);

    impl Detector for SizedDetector {
        fn role(&self) -> DetectorRole {
            DetectorRole::Point
        }

        fn detect(&self, plane: ArrayView2<f32>) -> Result<Vec<Roi>> {
            if plane.nrows() != self.0 {
                return Err(CenfindError::ShapeMismatch(format!("{} rows", plane.nrows())));
            }
            Ok(vec![Roi::Centre(Centre::new(Position::new(4, 4), 0, "Centriole"))])
        }

        fn name(&self) -> &str {
            "sized"
        }
    }

    fn annotated(name: &str, size: usize) -> AnnotatedField {
        AnnotatedField {
            field: Field::from_stack(name, Array3::zeros((1, size, size))),
            channel: 0,
            annotation: points(&[(4, 4)]),
        }
    }

    fn points(coords: &[(i32, i32)]) -> Vec<Position> {
        coords.iter().map(|&(r, c)| Position::new(r, c)).collect()
    }

    #[test]
    fn test_exact_match() {
        let a = points(&[(10, 10)]);
        let record = evaluate_field("ds", "f", 0, &a, &a, 5.0).unwrap();
        assert_eq!((record.precision, record.recall, record.f1), (1.0, 1.0, 1.0));
        assert_eq!(record.n_actual, 1);
        assert_eq!(record.n_preds, 1);
    }

    #[test]
    fn test_empty_sets_give_zeros() {
        let a = points(&[(10, 10)]);
        let record = evaluate_field("ds", "f", 0, &a, &[], 5.0).unwrap();
        assert_eq!((record.precision, record.recall, record.f1), (0.0, 0.0, 0.0));
        let record = evaluate_field("ds", "f", 0, &[], &a, 5.0).unwrap();
        assert_eq!((record.precision, record.recall, record.f1), (0.0, 0.0, 0.0));
        assert_eq!(record.n_preds, 1);
    }

    #[test]
    fn test_dataset_over_tolerances() {
        let samples = vec![
            FieldSample {
                field: "f1".to_string(),
                channel: 1,
                annotation: points(&[(10, 10)]),
                predictions: points(&[(10, 14)]),
            },
            FieldSample {
                field: "f2".to_string(),
                channel: 1,
                annotation: points(&[(30, 30)]),
                predictions: points(&[(30, 30)]),
            },
        ];
        let records = evaluate_dataset("ds", &samples, &[3.0, 5.0]).unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(records[0].tolerance, 3.0);
        assert_eq!(records[0].field, "f1");
        assert_eq!(records[0].f1, 0.0);
        assert_eq!(records[2].tolerance, 5.0);
        assert_eq!(records[2].f1, 1.0);
        assert_eq!(records[3].field, "f2");
    }

    #[test]
    fn test_detect_and_evaluate_counts_skipped_fields() {
        let fields = vec![annotated("good", 16), annotated("odd", 9), annotated("also_good", 16)];
        let evaluation = detect_and_evaluate("ds", &fields, &SizedDetector(16), &[3.0]).unwrap();

        assert_eq!(evaluation.records.len(), 2);
        assert_eq!(evaluation.records[0].field, "good");
        assert_eq!(evaluation.records[1].field, "also_good");
        assert_eq!(evaluation.records[1].f1, 1.0);
        assert_eq!(evaluation.stats.processed_fields, 2);
        assert_eq!(evaluation.stats.skipped_fields, 1);
        assert_eq!(evaluation.stats.total_foci, 2);
    }

    #[test]
    fn test_detect_and_evaluate_missing_channel_is_skipped() {
        let mut field = annotated("f", 16);
        field.channel = 3;
        let evaluation = detect_and_evaluate("ds", &[field], &SizedDetector(16), &[3.0]).unwrap();
        assert!(evaluation.records.is_empty());
        assert_eq!(evaluation.stats.skipped_fields, 1);
    }

    #[test]
    fn test_invalid_tolerance_rejected_up_front() {
        let result = evaluate_dataset("ds", &[], &[3.0, -2.0]);
        assert!(matches!(result, Err(CenfindError::InvalidTolerance(_))));
    }
}
