//! Delimited-file order exports.
//!
//! First row is the header; every following row becomes one record keyed by
//! the header labels as written. Column names differ between export versions,
//! so no schema is checked here.
//!
//! Cells are decoded as lossy UTF-8: a stray legacy-code-page byte (a `£`
//! saved as `0xA3`) becomes U+FFFD instead of failing the row.

use anyhow::{Context, Result};
use orderdash_core::{RawValue, Record};
use std::borrow::Cow;
use std::io::Read;
use std::path::Path;

/// Parse a CSV export file into records
pub fn parse_csv_export(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    parse_csv_export_reader(file).with_context(|| format!("parsing {}", path.display()))
}

/// Parse CSV export text from any reader
pub fn parse_csv_export_reader<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .byte_headers()
        .context("reading header row")?
        .iter()
        .map(|h| decode(h).trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut records = Vec::new();
    for (line, result) in rdr.byte_records().enumerate() {
        let row = result.with_context(|| format!("row {}", line + 2))?;
        if row.iter().any(|c| std::str::from_utf8(c).is_err()) {
            tracing::warn!(row = line + 2, "invalid UTF-8 in CSV row, decoded lossily");
        }
        let cells: Vec<String> = row.iter().map(|c| decode(c).into_owned()).collect();

        // Skip rows with no content at all (trailing blank lines in exports)
        if cells.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let record: Record = headers
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                (label.clone(), cell_value(cell))
            })
            .collect();
        records.push(record);
    }

    Ok(records)
}

fn decode(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

fn cell_value(cell: &str) -> RawValue {
    if cell.is_empty() {
        RawValue::Empty
    } else {
        RawValue::Text(cell.to_string())
    }
}
