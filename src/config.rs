//! Scoring configuration and its JSON loader.

use crate::assignment::{AssignmentPolicy, InsideMargin};
use crate::error::{CenfindError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Parameters shared by detection, assignment and scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Signed margin gating focus-to-nucleus assignment, in pixels.
    pub inside_margin: f64,
    pub assignment_policy: AssignmentPolicy,
    /// Probability threshold handed to the point-detection service.
    pub probability_threshold: f32,
    /// Minimum distance between detected peaks; foci closer than twice this
    /// are merged into one centrosome.
    pub min_distance: usize,
    /// Side of the square tile fed to the blob-detection service.
    pub tile_size: usize,
    /// Fraction of the frame a nucleus centre must stay clear of.
    pub full_frame_fraction: f64,
    /// Matching tolerances, in pixels, for accuracy evaluation.
    pub tolerances: Vec<f64>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            inside_margin: -50.0,
            assignment_policy: AssignmentPolicy::NearestWithinMargin,
            probability_threshold: 0.5,
            min_distance: 2,
            tile_size: 256,
            full_frame_fraction: 0.05,
            tolerances: vec![3.0],
        }
    }
}

impl ScoringConfig {
    pub fn margin(&self) -> InsideMargin {
        InsideMargin(self.inside_margin)
    }

    /// Radius of the disk drawn around each focus when grouping centrosomes.
    pub fn centrosome_radius(&self) -> usize {
        self.min_distance * 2
    }
}

/// Load a scoring configuration from a JSON file.
///
/// Missing keys fall back to [`ScoringConfig::default`].
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ScoringConfig> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config: ScoringConfig = serde_json::from_reader(reader)?;

    validate_config(&config)?;

    Ok(config)
}

/// Parse a scoring configuration from a JSON string.
///
/// # Example
///
/// ```
/// use cenfind::config::config_from_str;
///
/// let config = config_from_str(r#"{ "inside_margin": -15 }"#).unwrap();
/// assert_eq!(config.inside_margin, -15.0);
/// assert_eq!(config.tile_size, 256);
/// ```
pub fn config_from_str(json_str: &str) -> Result<ScoringConfig> {
    let config: ScoringConfig = serde_json::from_str(json_str)?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &ScoringConfig) -> Result<()> {
    if !config.inside_margin.is_finite() {
        return Err(CenfindError::InvalidConfig(format!(
            "inside_margin must be finite, got {}",
            config.inside_margin
        )));
    }

    if !(0.0..=1.0).contains(&config.probability_threshold) {
        return Err(CenfindError::InvalidConfig(format!(
            "probability_threshold must be between 0.0 and 1.0, got {}",
            config.probability_threshold
        )));
    }

    if config.tile_size == 0 {
        return Err(CenfindError::InvalidConfig(
            "tile_size must be greater than 0".to_string(),
        ));
    }

    if !(0.0..0.5).contains(&config.full_frame_fraction) {
        return Err(CenfindError::InvalidConfig(format!(
            "full_frame_fraction must be in [0.0, 0.5), got {}",
            config.full_frame_fraction
        )));
    }

    for &tolerance in &config.tolerances {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(CenfindError::InvalidTolerance(format!(
                "tolerance must be a non-negative number of pixels, got {tolerance}"
            )));
        }
    }

    Ok(())
}
