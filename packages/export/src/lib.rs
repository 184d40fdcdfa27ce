#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CSV export of the raw and grouped exhibition tables.
//!
//! Files are UTF-8 with a header row. Numbers are written as plain decimal
//! text (`10000`, `50000.00`) with no locale punctuation, so an exported
//! table reads back into exactly the same rows.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use cinedata_aggregate::YearTotals;
use cinedata_bulletin_models::{GroupedRecord, Record};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Errors that can occur while writing or reading a table.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding or decoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Raw table columns, in order.
pub const RECORD_COLUMNS: [&str; 5] = [
    "exhibition_year",
    "title",
    "nationality",
    "audience",
    "revenue",
];

/// Grouped table columns, in order.
pub const GROUP_COLUMNS: [&str; 5] = [
    "title",
    "nationality",
    "total_audience",
    "total_revenue",
    "first_year",
];

/// Year totals columns, in order.
pub const YEAR_TOTAL_COLUMNS: [&str; 4] = ["year", "films", "audience", "revenue"];

fn write_rows<W: Write, T: Serialize>(
    writer: W,
    columns: &[&str],
    rows: &[T],
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    // The header is derived from the first row, so an empty table needs it
    // written by hand.
    if rows.is_empty() {
        csv_writer.write_record(columns)?;
    }
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn read_rows<R: Read, T: DeserializeOwned>(reader: R) -> Result<Vec<T>, ExportError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for result in csv_reader.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}

/// Writes the raw table.
///
/// Columns: `exhibition_year,title,nationality,audience,revenue`.
///
/// # Errors
///
/// Returns [`ExportError`] if writing fails.
pub fn write_records<W: Write>(writer: W, records: &[Record]) -> Result<(), ExportError> {
    write_rows(writer, &RECORD_COLUMNS, records)
}

/// Reads a raw table written by [`write_records`].
///
/// # Errors
///
/// Returns [`ExportError`] if the input is not a valid raw table.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<Record>, ExportError> {
    read_rows(reader)
}

/// Writes the grouped table.
///
/// Columns: `title,nationality,total_audience,total_revenue,first_year`.
///
/// # Errors
///
/// Returns [`ExportError`] if writing fails.
pub fn write_groups<W: Write>(writer: W, groups: &[GroupedRecord]) -> Result<(), ExportError> {
    write_rows(writer, &GROUP_COLUMNS, groups)
}

/// Reads a grouped table written by [`write_groups`].
///
/// # Errors
///
/// Returns [`ExportError`] if the input is not a valid grouped table.
pub fn read_groups<R: Read>(reader: R) -> Result<Vec<GroupedRecord>, ExportError> {
    read_rows(reader)
}

/// Writes per-year market totals.
///
/// Columns: `year,films,audience,revenue`.
///
/// # Errors
///
/// Returns [`ExportError`] if writing fails.
pub fn write_year_totals<W: Write>(writer: W, totals: &[YearTotals]) -> Result<(), ExportError> {
    write_rows(writer, &YEAR_TOTAL_COLUMNS, totals)
}

/// Which table an export file holds.
#[derive(Debug, Clone, Copy)]
pub enum Table<'a> {
    /// Per-year rows.
    Records(&'a [Record]),
    /// Per-film rows.
    Groups(&'a [GroupedRecord]),
    /// Per-year market totals.
    YearTotals(&'a [YearTotals]),
}

impl Table<'_> {
    fn len(&self) -> usize {
        match self {
            Self::Records(rows) => rows.len(),
            Self::Groups(rows) => rows.len(),
            Self::YearTotals(rows) => rows.len(),
        }
    }
}

/// Writes `table` to a new file at `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`ExportError`] if the file cannot be created or written.
pub fn write_file(path: &Path, table: Table<'_>) -> Result<(), ExportError> {
    let file = File::create(path)?;
    match table {
        Table::Records(rows) => write_records(file, rows)?,
        Table::Groups(rows) => write_groups(file, rows)?,
        Table::YearTotals(rows) => write_year_totals(file, rows)?,
    }
    log::info!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}
