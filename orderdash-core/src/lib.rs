//! orderdash-core: record model, tolerant field lookup, and value normalization
//! for order-export classification

pub mod bucket;
pub mod config;
pub mod dates;
pub mod error;
pub mod fields;
pub mod price;
pub mod record;

pub use bucket::{Bucket, Buckets};
pub use config::{CostModel, EngineConfig};
pub use dates::{DateError, normalize_date};
pub use error::EngineError;
pub use fields::{FieldAliases, resolve, resolve_or_zero, resolve_present};
pub use price::normalize_price;
pub use record::{RawValue, Record};

/// Lower-cased, trimmed status text of a record; empty when absent
pub fn status_text<S: AsRef<str>>(record: &Record, status_aliases: &[S]) -> String {
    resolve(record, status_aliases)
        .map(|v| v.to_text().trim().to_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text_normalized() {
        let rec = Record::new().with("REASON FOR CREDIT ENTRY", "  Delivered ");
        assert_eq!(status_text(&rec, &["Reason for Credit Entry"]), "delivered");
        assert_eq!(status_text(&Record::new(), &["Reason for Credit Entry"]), "");
    }
}
