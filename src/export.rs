//! Tabular outputs written with Polars.
//!
//! Scores and frequencies are tab-separated, metrics and centriole
//! coordinates comma-separated. Coordinates leave the crate as `col,row`;
//! everything else keeps `(row, col)`.

use std::fs::File;
use std::path::Path;

use polars::prelude::*;

use crate::error::{CenfindError, Result};
use crate::metrics::frequency::FrequencyTable;
use crate::roi::Centre;
use crate::types::{MetricRecord, Position, ScoreRecord};

/// Columns of the score table, in order.
pub const SCORE_COLUMNS: [&str; 5] = ["field", "channel", "nucleus_centre", "score", "is_full"];

/// Columns of the metrics table, in order; `field` is the index.
pub const METRIC_COLUMNS: [&str; 9] = [
    "field",
    "dataset",
    "channel",
    "n_actual",
    "n_preds",
    "tolerance",
    "precision",
    "recall",
    "f1",
];

/// Validate that a DataFrame contains all required columns
///
/// # Arguments
///
/// * `df` - The DataFrame to validate
/// * `required_columns` - Slice of required column names
///
/// # Returns
///
/// `Ok(())` if all columns are present, `MissingColumn` naming the first
/// absent one otherwise
pub fn validate_columns(df: &DataFrame, required_columns: &[&str]) -> Result<()> {
    let column_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    for col in required_columns {
        if !column_names.iter().any(|c| c == col) {
            return Err(CenfindError::MissingColumn(col.to_string()));
        }
    }

    Ok(())
}

/// One row per nucleus; `nucleus_centre` is rendered as `(row, col)`.
pub fn scores_to_dataframe(records: &[ScoreRecord]) -> Result<DataFrame> {
    let fields: Vec<String> = records.iter().map(|r| r.field.clone()).collect();
    let channels: Vec<u64> = records.iter().map(|r| r.channel as u64).collect();
    let centres: Vec<String> = records.iter().map(|r| r.nucleus_centre.to_string()).collect();
    let scores: Vec<u64> = records.iter().map(|r| r.score as u64).collect();
    let full: Vec<bool> = records.iter().map(|r| r.is_full).collect();

    let df = df! {
        "field" => fields,
        "channel" => channels,
        "nucleus_centre" => centres,
        "score" => scores,
        "is_full" => full,
    }?;
    Ok(df)
}

pub fn metrics_to_dataframe(records: &[MetricRecord]) -> Result<DataFrame> {
    let df = df! {
        "field" => records.iter().map(|r| r.field.clone()).collect::<Vec<_>>(),
        "dataset" => records.iter().map(|r| r.dataset.clone()).collect::<Vec<_>>(),
        "channel" => records.iter().map(|r| r.channel as u64).collect::<Vec<_>>(),
        "n_actual" => records.iter().map(|r| r.n_actual as u64).collect::<Vec<_>>(),
        "n_preds" => records.iter().map(|r| r.n_preds as u64).collect::<Vec<_>>(),
        "tolerance" => records.iter().map(|r| r.tolerance).collect::<Vec<_>>(),
        "precision" => records.iter().map(|r| r.precision).collect::<Vec<_>>(),
        "recall" => records.iter().map(|r| r.recall).collect::<Vec<_>>(),
        "f1" => records.iter().map(|r| r.f1).collect::<Vec<_>>(),
    }?;
    Ok(df)
}

fn write_table(path: &Path, df: &mut DataFrame, separator: u8, header: bool) -> Result<()> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(header)
        .with_separator(separator)
        .finish(df)?;
    Ok(())
}

/// Write per-nucleus scores as a tab-separated table.
pub fn write_scores<P: AsRef<Path>>(path: P, records: &[ScoreRecord]) -> Result<()> {
    let mut df = scores_to_dataframe(records)?;
    write_table(path.as_ref(), &mut df, b'\t', true)?;
    log::info!("Wrote {} score records to {}", records.len(), path.as_ref().display());
    Ok(())
}

/// Write accuracy records as a comma-separated table indexed by field.
pub fn write_metrics<P: AsRef<Path>>(path: P, records: &[MetricRecord]) -> Result<()> {
    let mut df = metrics_to_dataframe(records)?;
    write_table(path.as_ref(), &mut df, b',', true)
}

/// Write the pivoted frequency table as a tab-separated table.
pub fn write_frequency<P: AsRef<Path>>(path: P, table: &FrequencyTable) -> Result<()> {
    let mut df = table.to_dataframe()?;
    write_table(path.as_ref(), &mut df, b'\t', true)
}

/// Write foci positions as headerless `col,row` integer lines.
///
/// An empty list produces an empty file.
pub fn write_centrioles<P: AsRef<Path>>(path: P, foci: &[Centre]) -> Result<()> {
    let path = path.as_ref();
    if foci.is_empty() {
        File::create(path)?;
        log::warn!("No foci to write to {}", path.display());
        return Ok(());
    }

    let mut df = df! {
        "col" => foci.iter().map(|f| i64::from(f.col())).collect::<Vec<_>>(),
        "row" => foci.iter().map(|f| i64::from(f.row())).collect::<Vec<_>>(),
    }?;
    write_table(path, &mut df, b',', false)
}

/// Read positions written by [`write_centrioles`].
///
/// An empty file yields an empty list.
pub fn read_centrioles<P: AsRef<Path>>(path: P) -> Result<Vec<Position>> {
    let path = path.as_ref();
    if std::fs::metadata(path)?.len() == 0 {
        return Ok(Vec::new());
    }

    let df = CsvReadOptions::default()
        .with_has_header(false)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    let columns = df.get_columns();
    if columns.len() != 2 {
        return Err(CenfindError::InvalidDataFrame(format!(
            "{}: expected 2 columns (col, row), got {}",
            path.display(),
            columns.len()
        )));
    }

    let cols = columns[0].cast(&DataType::Int64)?;
    let rows = columns[1].cast(&DataType::Int64)?;
    cols.i64()?
        .into_iter()
        .zip(rows.i64()?.into_iter())
        .enumerate()
        .map(|(line, pair)| match pair {
            (Some(col), Some(row)) => match (i32::try_from(row), i32::try_from(col)) {
                (Ok(row), Ok(col)) => Ok(Position::new(row, col)),
                _ => Err(CenfindError::InvalidDataFrame(format!(
                    "{}: coordinate ({row}, {col}) on line {} out of range",
                    path.display(),
                    line + 1
                ))),
            },
            _ => Err(CenfindError::InvalidDataFrame(format!(
                "{}: missing coordinate on line {}",
                path.display(),
                line + 1
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(field: &str, score: usize) -> ScoreRecord {
        ScoreRecord {
            field: field.to_string(),
            channel: 1,
            nucleus_centre: Position::new(12, 34),
            score,
            is_full: true,
        }
    }

    #[test]
    fn test_validate_columns_success() {
        let df = df! {
            "col1" => &[1, 2, 3],
            "col2" => &["a", "b", "c"],
        }
        .unwrap();

        assert!(validate_columns(&df, &["col1", "col2"]).is_ok());
    }

    #[test]
    fn test_validate_columns_missing() {
        let df = df! {
            "col1" => &[1, 2, 3],
        }
        .unwrap();

        match validate_columns(&df, &["col1", "col2"]) {
            Err(CenfindError::MissingColumn(col)) => assert_eq!(col, "col2"),
            _ => panic!("Expected MissingColumn error"),
        }
    }

    #[test]
    fn test_scores_dataframe_layout() {
        let df = scores_to_dataframe(&[score("a", 2), score("b", 0)]).unwrap();
        validate_columns(&df, &SCORE_COLUMNS).unwrap();
        assert_eq!(df.height(), 2);
        let centre = df.column("nucleus_centre").unwrap().str().unwrap().get(0);
        assert_eq!(centre, Some("(12, 34)"));
    }

    #[test]
    fn test_metrics_dataframe_starts_with_field() {
        let record = MetricRecord {
            dataset: "ds".to_string(),
            field: "f".to_string(),
            channel: 1,
            n_actual: 2,
            n_preds: 1,
            tolerance: 3.0,
            precision: 1.0,
            recall: 0.5,
            f1: 0.667,
        };
        let df = metrics_to_dataframe(&[record]).unwrap();
        let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
        assert_eq!(names, METRIC_COLUMNS.to_vec());
    }

    #[test]
    fn test_read_centrioles_rejects_oversized_coordinates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("far.txt");
        std::fs::write(&path, "12,5\n3000000000,7\n").unwrap();

        let err = read_centrioles(&path).unwrap_err();
        assert!(matches!(err, CenfindError::InvalidDataFrame(_)));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_read_centrioles_swaps_to_row_col() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("foci.txt");
        std::fs::write(&path, "12,5\n40,7\n").unwrap();

        let positions = read_centrioles(&path).unwrap();
        assert_eq!(positions, vec![Position::new(5, 12), Position::new(7, 40)]);
    }
}
