//! Nuclei: tiled instance segmentation traced into contours.

use ndarray::ArrayView2;

use super::foci::{NORMALIZE_PERCENTILES, UNKNOWN_CONFIDENCE};
use super::{BlobService, Detector, DetectorRole};
use crate::config::ScoringConfig;
use crate::error::{CenfindError, Result};
use crate::imgproc::{compress_chain, label_contours, normalize_percentile, resize_labels, resize_plane};
use crate::roi::{Contour, Roi};

/// Blob detector for nuclei.
///
/// The plane is resampled to a square tile for the segmentation service and
/// the returned labels are resampled back with nearest-neighbour, so
/// instance boundaries stay on whole pixels. The outer border of each label
/// becomes a [`Contour`].
#[derive(Debug, Clone)]
pub struct NucleiDetector<S> {
    service: S,
    tile_size: usize,
    label: String,
}

impl<S: BlobService> NucleiDetector<S> {
    pub fn new(service: S) -> Self {
        Self::from_config(service, &ScoringConfig::default())
    }

    pub fn from_config(service: S, config: &ScoringConfig) -> Self {
        Self {
            service,
            tile_size: config.tile_size,
            label: "Nucleus".to_string(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn detect_nuclei(&self, plane: ArrayView2<f32>) -> Result<Vec<Contour>> {
        let (rows, cols) = plane.dim();
        if rows == 0 || cols == 0 {
            return Err(CenfindError::ShapeMismatch(format!(
                "cannot segment an empty plane of {rows}x{cols}"
            )));
        }

        let tile = (self.tile_size, self.tile_size);
        let resized = resize_plane(plane, tile);
        let (pmin, pmax) = NORMALIZE_PERCENTILES;
        let normalized = normalize_percentile(resized.view(), pmin, pmax);

        let labels = self.service.detect_blobs(normalized.view())?;
        if labels.dim() != tile {
            return Err(CenfindError::Service(format!(
                "label map of {:?} does not match tile {:?}",
                labels.dim(),
                tile
            )));
        }
        let labels = resize_labels(labels.view(), (rows, cols));

        let nuclei: Vec<Contour> = label_contours(labels.view())
            .into_values()
            .enumerate()
            .map(|(index, border)| {
                Contour::new(compress_chain(&border), index, self.label.clone())
                    .with_confidence(UNKNOWN_CONFIDENCE)
            })
            .collect();

        if nuclei.is_empty() {
            log::warn!("{}: no nucleus detected", self.name());
        } else {
            log::info!("{}: {} nuclei detected", self.name(), nuclei.len());
        }
        Ok(nuclei)
    }
}

impl<S: BlobService> Detector for NucleiDetector<S> {
    fn role(&self) -> DetectorRole {
        DetectorRole::Blob
    }

    fn detect(&self, plane: ArrayView2<f32>) -> Result<Vec<Roi>> {
        Ok(self.detect_nuclei(plane)?.into_iter().map(Roi::Contour).collect())
    }

    fn name(&self) -> &str {
        "nuclei"
    }
}
