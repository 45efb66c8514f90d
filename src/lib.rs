//! # cenfind
//!
//! A Rust library for scoring centrioles against nuclei in fluorescence
//! microscopy fields of view.
//!
//! The library locates point-like foci (centrioles) and blob-like nuclei in
//! the channels of a field, assigns each focus to a nucleus, and reports:
//! - **Scores**: the number of foci assigned to every nucleus
//! - **Frequencies**: per (field, channel) counts of nuclei with 0, 1, 2, 3, 4
//!   or more foci
//! - **Accuracy**: precision, recall and F1 of detected foci against annotated
//!   positions, at one or more matching tolerances
//!
//! ## Features
//!
//! - Region-of-interest model for points, contours and boxes
//! - Detectors wrapping external point and segmentation models behind a
//!   common interface, with a load-once model registry
//! - Signed-distance assignment of foci to nuclei with an explicit margin
//! - Greedy point matching under a distance cutoff
//! - Score, frequency and metric tables written with Polars
//!
//! ## Quick Start
//!
//! ```rust
//! use cenfind::assignment::{assign, AssignmentPolicy, InsideMargin};
//! use cenfind::evaluator::evaluate_field;
//! use cenfind::metrics::scoring::score_records;
//! use cenfind::roi::{Centre, Contour};
//! use cenfind::types::Position;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let nucleus = Contour::new(
//!     vec![Position::new(40, 40), Position::new(40, 60), Position::new(60, 60), Position::new(60, 40)],
//!     0,
//!     "Nucleus",
//! );
//! let foci = vec![Centre::new(Position::new(50, 52), 0, "Centriole")];
//!
//! let pairs = assign(&foci, &[nucleus], InsideMargin(-50.0), AssignmentPolicy::NearestWithinMargin)?;
//! let records = score_records("field_000", 1, &pairs, (100, 100), 0.05);
//! assert_eq!(records[0].score, 1);
//!
//! let annotation = [Position::new(50, 51)];
//! let predictions: Vec<Position> = foci.iter().map(|f| f.position).collect();
//! let metrics = evaluate_field("dataset", "field_000", 1, &annotation, &predictions, 3.0)?;
//! assert_eq!(metrics.f1, 1.0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Coordinates
//!
//! Positions are `(row, col)` everywhere inside the library. The `(x, y) =
//! (col, row)` convention only appears when centriole coordinates are
//! written to disk and in [`draw`], where `imageproc` takes `(x, y)`.

pub mod assignment;
pub mod config;
pub mod detector;
pub mod draw;
pub mod error;
pub mod evaluator;
pub mod export;
pub mod field;
pub mod geometry;
pub mod imgproc;
pub mod matching;
pub mod metrics;
pub mod pipeline;
pub mod roi;
pub mod stats;
pub mod types;

// Re-export commonly used types and functions
pub use assignment::{assign, Assignment, AssignmentPolicy, InsideMargin};
pub use config::{config_from_str, load_config, ScoringConfig};
pub use detector::{BlobService, Detector, DetectorRole, FociDetector, ModelRegistry, NucleiDetector, PointService};
pub use error::{CenfindError, Result};
pub use evaluator::{
    detect_and_evaluate, evaluate_dataset, evaluate_field, AnnotatedField, Evaluation, FieldSample,
};
pub use field::Field;
pub use pipeline::{score_dataset, score_field, DatasetScores, FieldScore};
pub use roi::{BBox, Centre, Contour, RegionOfInterest, Roi};
pub use stats::RunStats;
pub use types::{MetricRecord, Position, ScoreRecord};
