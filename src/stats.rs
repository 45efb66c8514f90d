//! Statistics tracking for scoring runs
//!
//! Counts what happened to each field of a dataset run so that skipped
//! fields are reported instead of silently dropped.

use serde::{Deserialize, Serialize};

/// Statistics collected while scoring a dataset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Number of (field, channel) pairs scored successfully
    pub processed_fields: usize,

    /// Number of (field, channel) pairs skipped on a field-scoped error
    pub skipped_fields: usize,

    /// Foci detected across processed fields
    pub total_foci: usize,

    /// Nuclei detected across processed fields
    pub total_nuclei: usize,

    /// Processed fields in which no foci were detected
    pub empty_fields: usize,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a scored field with its detection counts
    pub fn add_field(&mut self, foci: usize, nuclei: usize) {
        self.processed_fields += 1;
        self.total_foci += foci;
        self.total_nuclei += nuclei;
        if foci == 0 {
            self.empty_fields += 1;
        }
    }

    /// Record a field skipped on a field-scoped error
    pub fn skip_field(&mut self) {
        self.skipped_fields += 1;
    }

    pub fn total_fields(&self) -> usize {
        self.processed_fields + self.skipped_fields
    }

    /// Fold another run into this one
    pub fn merge(&mut self, other: &RunStats) {
        self.processed_fields += other.processed_fields;
        self.skipped_fields += other.skipped_fields;
        self.total_foci += other.total_foci;
        self.total_nuclei += other.total_nuclei;
        self.empty_fields += other.empty_fields;
    }

    /// Get a formatted string summary of the statistics
    pub fn summary_string(&self) -> String {
        format!(
            "RunStats {{ fields: {}, processed: {}, skipped: {}, foci: {}, nuclei: {}, empty: {} }}",
            self.total_fields(),
            self.processed_fields,
            self.skipped_fields,
            self.total_foci,
            self.total_nuclei,
            self.empty_fields
        )
    }
}
