//! Spreadsheet order exports (.xlsx / .xls / .ods).
//!
//! Only the first worksheet is read. The first row with any content is the
//! header; date cells come through as serial day numbers.

use anyhow::{Context, Result};
use calamine::{Data, Reader, open_workbook_auto};
use orderdash_core::{RawValue, Record};
use std::path::Path;

/// Parse the first worksheet of a workbook export into records
pub fn parse_workbook_export(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let mut workbook =
        open_workbook_auto(path).with_context(|| format!("opening {}", path.display()))?;

    let first_sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .with_context(|| format!("no worksheet in {}", path.display()))?;

    let range = workbook
        .worksheet_range(&first_sheet)
        .with_context(|| format!("reading sheet '{}' of {}", first_sheet, path.display()))?;

    Ok(rows_to_records(range.rows()))
}

/// Header row + data rows -> records. Columns with a blank header are dropped.
pub(crate) fn rows_to_records<'a, I>(rows: I) -> Vec<Record>
where
    I: IntoIterator<Item = &'a [Data]>,
{
    let mut rows = rows
        .into_iter()
        .skip_while(|row| row.iter().all(|c| cell_value(c).is_empty()));

    let Some(header) = rows.next() else {
        return Vec::new();
    };
    let labels: Vec<Option<String>> = header
        .iter()
        .map(|c| {
            let label = cell_value(c).to_text();
            (!label.trim().is_empty()).then_some(label)
        })
        .collect();

    rows.filter(|row| !row.iter().all(|c| cell_value(c).is_empty()))
        .map(|row| {
            labels
                .iter()
                .enumerate()
                .filter_map(|(i, label)| {
                    let label = label.as_ref()?;
                    let value = row.get(i).map(cell_value).unwrap_or_default();
                    Some((label.clone(), value))
                })
                .collect::<Record>()
        })
        .collect()
}

fn cell_value(cell: &Data) -> RawValue {
    match cell {
        Data::Empty | Data::Error(_) => RawValue::Empty,
        Data::String(s) if s.trim().is_empty() => RawValue::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => RawValue::Text(s.clone()),
        Data::Float(f) => RawValue::Number(*f),
        Data::Int(i) => RawValue::Number(*i as f64),
        Data::Bool(b) => RawValue::Text(b.to_string()),
        Data::DateTime(dt) => RawValue::Number(dt.as_f64()),
    }
}
