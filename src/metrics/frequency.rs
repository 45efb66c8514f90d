//! Frequency binning of per-nucleus scores.
//!
//! Scores fall into the buckets `0 1 2 3 4 +`; the last bucket absorbs
//! every score of five or more. Counts are pivoted per `(field, channel)`
//! with every bucket present, zero-filled when empty.

use std::collections::BTreeMap;
use std::fmt;

use polars::prelude::*;

use crate::error::Result;
use crate::types::ScoreRecord;

/// Number of score buckets.
pub const BIN_COUNT: usize = 6;

/// Categorical bucket for a nucleus score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScoreBin {
    Zero,
    One,
    Two,
    Three,
    Four,
    Plus,
}

impl ScoreBin {
    pub const ALL: [ScoreBin; BIN_COUNT] = [
        ScoreBin::Zero,
        ScoreBin::One,
        ScoreBin::Two,
        ScoreBin::Three,
        ScoreBin::Four,
        ScoreBin::Plus,
    ];

    pub fn from_score(score: usize) -> Self {
        match score {
            0 => ScoreBin::Zero,
            1 => ScoreBin::One,
            2 => ScoreBin::Two,
            3 => ScoreBin::Three,
            4 => ScoreBin::Four,
            _ => ScoreBin::Plus,
        }
    }

    /// Column label of the bucket.
    pub fn label(&self) -> &'static str {
        match self {
            ScoreBin::Zero => "0",
            ScoreBin::One => "1",
            ScoreBin::Two => "2",
            ScoreBin::Three => "3",
            ScoreBin::Four => "4",
            ScoreBin::Plus => "+",
        }
    }

    /// Position of the bucket in a count row.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for ScoreBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Bucket counts per `(field, channel)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<(String, usize), [usize; BIN_COUNT]>,
}

impl FrequencyTable {
    /// Counts for one group, ordered as [`ScoreBin::ALL`].
    pub fn counts(&self, field: &str, channel: usize) -> Option<[usize; BIN_COUNT]> {
        self.counts.get(&(field.to_string(), channel)).copied()
    }

    /// Groups in `(field, channel)` order.
    pub fn iter(&self) -> impl Iterator<Item = (&(String, usize), &[usize; BIN_COUNT])> {
        self.counts.iter()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of binned records.
    pub fn total(&self) -> usize {
        self.counts.values().flat_map(|row| row.iter()).sum()
    }

    /// Pivoted table: `field`, `channel`, then one column per bucket label.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let mut fields: Vec<String> = Vec::with_capacity(self.len());
        let mut channels: Vec<u64> = Vec::with_capacity(self.len());
        let mut columns: [Vec<u64>; BIN_COUNT] = Default::default();

        for ((field, channel), row) in &self.counts {
            fields.push(field.clone());
            channels.push(*channel as u64);
            for (column, &count) in columns.iter_mut().zip(row.iter()) {
                column.push(count as u64);
            }
        }

        let [zero, one, two, three, four, plus] = columns;
        let df = df! {
            "field" => fields,
            "channel" => channels,
            "0" => zero,
            "1" => one,
            "2" => two,
            "3" => three,
            "4" => four,
            "+" => plus,
        }?;
        Ok(df)
    }
}

/// Bin every record by score and count per `(field, channel)`.
///
/// All records are binned; use [`full_in_frame_only`] first to exclude
/// nuclei cut by the frame edge.
///
/// # Example
///
/// ```
/// use cenfind::metrics::frequency::frequency_table;
/// use cenfind::types::{Position, ScoreRecord};
///
/// let records: Vec<ScoreRecord> = [0, 1, 1, 6]
///     .into_iter()
///     .map(|score| ScoreRecord {
///         field: "f".to_string(),
///         channel: 1,
///         nucleus_centre: Position::new(0, 0),
///         score,
///         is_full: true,
///     })
///     .collect();
/// let table = frequency_table(&records);
/// assert_eq!(table.counts("f", 1), Some([1, 2, 0, 0, 0, 1]));
/// ```
pub fn frequency_table(records: &[ScoreRecord]) -> FrequencyTable {
    let mut counts: BTreeMap<(String, usize), [usize; BIN_COUNT]> = BTreeMap::new();
    for record in records {
        let row = counts
            .entry((record.field.clone(), record.channel))
            .or_insert([0; BIN_COUNT]);
        row[ScoreBin::from_score(record.score).index()] += 1;
    }
    FrequencyTable { counts }
}

/// Records whose nucleus lies fully inside the frame.
pub fn full_in_frame_only(records: &[ScoreRecord]) -> Vec<ScoreRecord> {
    records.iter().filter(|r| r.is_full).cloned().collect()
}
