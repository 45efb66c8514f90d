//! Centriole foci: point detection plus centrosome grouping.

use ndarray::ArrayView2;

use super::{Detector, DetectorRole, PointService};
use crate::config::ScoringConfig;
use crate::error::{CenfindError, Result};
use crate::imgproc::{component_centroids, label_components, normalize_percentile, rasterize_disks};
use crate::roi::{Centre, Roi};
use crate::types::Position;

/// Lower and upper percentiles used to normalise planes before detection.
pub const NORMALIZE_PERCENTILES: (f64, f64) = (1.0, 99.8);

/// Confidence recorded on foci; the point service does not expose one.
pub const UNKNOWN_CONFIDENCE: f64 = -1.0;

/// Point detector for centriole foci.
///
/// Each detected peak becomes a [`Centre`]. Peaks whose disks of
/// `centrosome_radius` overlap are grouped, and every focus gets the
/// group's centroid as its `parent`.
#[derive(Debug, Clone)]
pub struct FociDetector<S> {
    service: S,
    probability_threshold: f32,
    centrosome_radius: usize,
    label: String,
}

impl<S: PointService> FociDetector<S> {
    pub fn new(service: S) -> Self {
        Self::from_config(service, &ScoringConfig::default())
    }

    pub fn from_config(service: S, config: &ScoringConfig) -> Self {
        Self {
            service,
            probability_threshold: config.probability_threshold,
            centrosome_radius: config.centrosome_radius(),
            label: "Centriole".to_string(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Detect foci and attach their centrosome parents.
    pub fn detect_foci(&self, plane: ArrayView2<f32>) -> Result<Vec<Centre>> {
        let (rows, cols) = plane.dim();
        let (pmin, pmax) = NORMALIZE_PERCENTILES;
        let normalized = normalize_percentile(plane, pmin, pmax);
        let peaks = self
            .service
            .detect_points(normalized.view(), self.probability_threshold)?;

        let mut foci = Vec::with_capacity(peaks.len());
        for (index, (row, col)) in peaks.into_iter().enumerate() {
            if row >= rows || col >= cols {
                return Err(CenfindError::Service(format!(
                    "point ({row}, {col}) outside plane of {rows}x{cols}"
                )));
            }
            let position = match (i32::try_from(row), i32::try_from(col)) {
                (Ok(r), Ok(c)) => Position::new(r, c),
                _ => {
                    return Err(CenfindError::Service(format!(
                        "point ({row}, {col}) does not fit pixel coordinates"
                    )))
                }
            };
            foci.push(
                Centre::new(position, index, self.label.clone()).with_confidence(UNKNOWN_CONFIDENCE),
            );
        }

        if foci.is_empty() {
            log::warn!("{}: no foci detected", self.name());
            return Ok(foci);
        }

        self.attach_centrosomes(&mut foci, (rows, cols));
        log::info!("{}: {} foci detected", self.name(), foci.len());
        Ok(foci)
    }

    fn attach_centrosomes(&self, foci: &mut [Centre], shape: (usize, usize)) {
        let positions: Vec<Position> = foci.iter().map(|f| f.position).collect();
        let mask = rasterize_disks(shape, &positions, self.centrosome_radius);
        let (labels, count) = label_components(&mask);
        let centroids = component_centroids(labels.view(), count);

        for focus in foci.iter_mut() {
            let label = labels[[focus.row() as usize, focus.col() as usize]];
            if label == 0 {
                continue;
            }
            let (row, col) = centroids[label as usize - 1];
            let parent = Centre::new(
                Position::new(row as i32, col as i32),
                label as usize - 1,
                "Centrosome",
            );
            focus.parent = Some(Box::new(parent));
        }
    }
}

impl<S: PointService> Detector for FociDetector<S> {
    fn role(&self) -> DetectorRole {
        DetectorRole::Point
    }

    fn detect(&self, plane: ArrayView2<f32>) -> Result<Vec<Roi>> {
        Ok(self.detect_foci(plane)?.into_iter().map(Roi::Centre).collect())
    }

    fn name(&self) -> &str {
        "foci"
    }
}
