//! orderdash-ingest: decode order-export files (CSV / spreadsheet) into records.

pub mod parsers;
pub mod types;

use anyhow::Result;
use orderdash_core::Record;
use std::path::Path;

pub use parsers::csv_export::{parse_csv_export, parse_csv_export_reader};
pub use parsers::workbook_export::parse_workbook_export;
pub use types::SourceKind;

/// Decode an export file, choosing the decoder from its extension
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let records = match SourceKind::from_path(path)? {
        SourceKind::Csv => parse_csv_export(path)?,
        SourceKind::Workbook => parse_workbook_export(path)?,
    };
    tracing::debug!(rows = records.len(), path = %path.display(), "decoded export");
    Ok(records)
}
