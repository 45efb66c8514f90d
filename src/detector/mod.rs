//! Detectors turn an image plane into regions of interest.
//!
//! The heavy lifting is delegated to external model services: a point
//! detector for foci and an instance-segmentation model for nuclei. This
//! module wraps them behind one [`Detector`] interface and handles the
//! pre- and post-processing around each service call.

pub mod foci;
pub mod nuclei;
pub mod registry;

pub use foci::FociDetector;
pub use nuclei::NucleiDetector;
pub use registry::ModelRegistry;

use ndarray::{Array2, ArrayView2};

use crate::error::Result;
use crate::roi::Roi;

/// Which kind of structure a detector finds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectorRole {
    /// Point-like foci (centrioles).
    Point,
    /// Blob-like structures (nuclei).
    Blob,
}

/// Common interface for detectors.
pub trait Detector: Send + Sync {
    fn role(&self) -> DetectorRole;

    /// Detect regions in a single plane.
    ///
    /// An empty result is not an error; it is logged and returned as is.
    fn detect(&self, plane: ArrayView2<f32>) -> Result<Vec<Roi>>;

    /// Detector name used in logs.
    fn name(&self) -> &str;
}

/// External point-detection model.
///
/// Returns `(row, col)` peaks in the resolution of the input plane.
pub trait PointService: Send + Sync {
    fn detect_points(
        &self,
        plane: ArrayView2<f32>,
        probability_threshold: f32,
    ) -> Result<Vec<(usize, usize)>>;
}

/// External instance-segmentation model.
///
/// Returns a label map of the same shape as the input; 0 is background and
/// every other value is one instance.
pub trait BlobService: Send + Sync {
    fn detect_blobs(&self, plane: ArrayView2<f32>) -> Result<Array2<u32>>;
}

impl<S: PointService + ?Sized> PointService for std::sync::Arc<S> {
    fn detect_points(
        &self,
        plane: ArrayView2<f32>,
        probability_threshold: f32,
    ) -> Result<Vec<(usize, usize)>> {
        (**self).detect_points(plane, probability_threshold)
    }
}

impl<S: BlobService + ?Sized> BlobService for std::sync::Arc<S> {
    fn detect_blobs(&self, plane: ArrayView2<f32>) -> Result<Array2<u32>> {
        (**self).detect_blobs(plane)
    }
}
