//! Metrics for detection accuracy and per-nucleus scoring.

pub mod accuracy;
pub mod frequency;
pub mod scoring;

pub use accuracy::MatchCounts;
pub use frequency::{frequency_table, full_in_frame_only, FrequencyTable, ScoreBin};
pub use scoring::{is_full_in_frame, score_records};
