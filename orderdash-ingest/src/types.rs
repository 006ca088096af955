use anyhow::{Result, bail};
use std::path::Path;

/// Export container formats the decoder understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Csv,
    Workbook,
}

impl SourceKind {
    /// Pick a decoder from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match ext.as_str() {
            "csv" => Ok(SourceKind::Csv),
            "xlsx" | "xls" | "xlsm" | "ods" => Ok(SourceKind::Workbook),
            _ => bail!("unsupported file format: {} (expected .csv, .xlsx or .xls)", path.display()),
        }
    }
}
