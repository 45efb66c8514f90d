//! Field and dataset scoring: detect, assign, score.
//!
//! Nuclei are detected once per field and reused for every foci channel.
//! Field-scoped errors skip the (field, channel) and are counted in
//! [`RunStats`]; any other error aborts the run.

use std::collections::BTreeMap;

use crate::assignment::{assign, Assignment};
use crate::config::ScoringConfig;
use crate::detector::{Detector, DetectorRole};
use crate::draw::{DrawStyle, RgbImage, GREEN, WHITE};
use crate::error::{CenfindError, Result};
use crate::field::Field;
use crate::metrics::frequency::{frequency_table, full_in_frame_only, FrequencyTable};
use crate::metrics::scoring::score_records;
use crate::roi::{partition, Centre, Contour};
use crate::stats::RunStats;
use crate::types::ScoreRecord;

/// Result of scoring one channel of one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldScore {
    pub foci: Vec<Centre>,
    pub assignments: Vec<Assignment>,
    pub records: Vec<ScoreRecord>,
}

impl FieldScore {
    /// Overlay nuclei, foci and their links onto an RGB buffer.
    pub fn draw_onto(&self, image: &mut RgbImage, style: &DrawStyle) {
        for assignment in &self.assignments {
            assignment.draw_onto(image, WHITE, GREEN, style);
        }
    }
}

/// Result of scoring a dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetScores {
    pub records: Vec<ScoreRecord>,
    /// Detected foci per `(field, channel)`.
    pub foci: BTreeMap<(String, usize), Vec<Centre>>,
    pub stats: RunStats,
}

impl DatasetScores {
    /// Score frequencies of nuclei lying fully inside their frame.
    pub fn frequency(&self) -> FrequencyTable {
        frequency_table(&full_in_frame_only(&self.records))
    }
}

fn check_role(detector: &dyn Detector, expected: DetectorRole) -> Result<()> {
    if detector.role() != expected {
        return Err(CenfindError::InvalidConfig(format!(
            "detector {} has role {:?}, expected {:?}",
            detector.name(),
            detector.role(),
            expected
        )));
    }
    Ok(())
}

fn detect_nuclei(field: &Field, nuclei_channel: usize, detector: &dyn Detector) -> Result<Vec<Contour>> {
    let plane = field.channel(nuclei_channel)?;
    let (_, nuclei) = partition(detector.detect(plane)?);
    Ok(nuclei)
}

fn score_channel(
    field: &Field,
    nuclei: &[Contour],
    channel: usize,
    foci_detector: &dyn Detector,
    config: &ScoringConfig,
) -> Result<FieldScore> {
    let plane = field.channel(channel)?;
    let (foci, _) = partition(foci_detector.detect(plane)?);
    // A channel without foci still scores each of its nuclei as 0.
    let assignments = if foci.is_empty() && !nuclei.is_empty() {
        nuclei.iter().map(Assignment::unassigned).collect()
    } else {
        assign(&foci, nuclei, config.margin(), config.assignment_policy)?
    };
    let records = score_records(
        &field.name,
        channel,
        &assignments,
        field.shape(),
        config.full_frame_fraction,
    );
    Ok(FieldScore {
        foci,
        assignments,
        records,
    })
}

/// Detect nuclei and foci in one field and score every nucleus.
///
/// # Errors
///
/// `InvalidConfig` if the detectors are passed in the wrong roles;
/// otherwise whatever detection or assignment raises.
pub fn score_field(
    field: &Field,
    nuclei_channel: usize,
    channel: usize,
    nuclei_detector: &dyn Detector,
    foci_detector: &dyn Detector,
    config: &ScoringConfig,
) -> Result<FieldScore> {
    check_role(nuclei_detector, DetectorRole::Blob)?;
    check_role(foci_detector, DetectorRole::Point)?;

    let nuclei = detect_nuclei(field, nuclei_channel, nuclei_detector)?;
    score_channel(field, &nuclei, channel, foci_detector, config)
}

/// Score every channel of every field.
///
/// A field-scoped failure while detecting nuclei skips all of the field's
/// channels; a failure in one channel skips only that channel.
pub fn score_dataset(
    fields: &[Field],
    nuclei_channel: usize,
    channels: &[usize],
    nuclei_detector: &dyn Detector,
    foci_detector: &dyn Detector,
    config: &ScoringConfig,
) -> Result<DatasetScores> {
    check_role(nuclei_detector, DetectorRole::Blob)?;
    check_role(foci_detector, DetectorRole::Point)?;

    let mut scores = DatasetScores::default();

    for field in fields {
        let nuclei = match detect_nuclei(field, nuclei_channel, nuclei_detector) {
            Ok(nuclei) => nuclei,
            Err(e) if e.is_field_scoped() => {
                log::warn!("Skipping field {}: {}", field.name, e);
                for _ in channels {
                    scores.stats.skip_field();
                }
                continue;
            }
            Err(e) => return Err(e),
        };

        for &channel in channels {
            match score_channel(field, &nuclei, channel, foci_detector, config) {
                Ok(field_score) => {
                    scores.stats.add_field(field_score.foci.len(), nuclei.len());
                    log::info!(
                        "{} channel {}: {} foci over {} nuclei",
                        field.name,
                        channel,
                        field_score.foci.len(),
                        nuclei.len()
                    );
                    scores.records.extend(field_score.records);
                    scores
                        .foci
                        .insert((field.name.clone(), channel), field_score.foci);
                }
                Err(e) if e.is_field_scoped() => {
                    log::warn!("Skipping field {} channel {}: {}", field.name, channel, e);
                    scores.stats.skip_field();
                }
                Err(e) => return Err(e),
            }
        }
    }

    log::info!("{}", scores.stats.summary_string());
    Ok(scores)
}
