//! Tolerant column lookup across export format versions.
//!
//! Exports rename their columns between versions ("Supplier Listed Price" vs
//! "Supplier Listed Price (Incl. GST + Commission)"), so every logical field is
//! looked up through a priority-ordered alias list. Matching ignores case and
//! surrounding whitespace on both sides.

use serde::{Deserialize, Serialize};

use crate::record::{RawValue, Record};

static ZERO: RawValue = RawValue::Number(0.0);

/// Alias lists for the logical fields the engine reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldAliases {
    pub listed_price: Vec<String>,
    pub discounted_price: Vec<String>,
    pub status: Vec<String>,
    pub date: Vec<String>,
}

impl Default for FieldAliases {
    fn default() -> Self {
        Self {
            listed_price: strings(&[
                "Supplier Listed Price (Incl. GST + Commission)",
                "Supplier Listed Price",
                "Listed Price",
            ]),
            // "Commision" is how older exports spell it
            discounted_price: strings(&[
                "Supplier Discounted Price (Incl GST and Commission)",
                "Supplier Discounted Price (Incl GST and Commision)",
                "Supplier Discounted Price",
                "Discounted Price",
            ]),
            status: strings(&["Reason for Credit Entry"]),
            date: strings(&["Order Date", "Date", "Created At", "Delivered Date"]),
        }
    }
}

impl FieldAliases {
    /// Append extra aliases after the defaults (lowest priority)
    pub fn extend(&mut self, other: &FieldAliases) {
        merge(&mut self.listed_price, &other.listed_price);
        merge(&mut self.discounted_price, &other.discounted_price);
        merge(&mut self.status, &other.status);
        merge(&mut self.date, &other.date);
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn merge(into: &mut Vec<String>, extra: &[String]) {
    for alias in extra {
        if !into.iter().any(|a| same_label(a, alias)) {
            into.push(alias.clone());
        }
    }
}

fn same_label(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

// A label repeated within one row resolves to its last column
fn find<'r>(record: &'r Record, alias: &str) -> Option<(&'r str, &'r RawValue)> {
    let wanted = alias.trim().to_lowercase();
    record
        .iter()
        .filter(|(label, _)| label.trim().to_lowercase() == wanted)
        .last()
}

/// Value under the first alias (in priority order) present in the record
pub fn resolve<'r, S: AsRef<str>>(record: &'r Record, aliases: &[S]) -> Option<&'r RawValue> {
    aliases
        .iter()
        .find_map(|alias| find(record, alias.as_ref()))
        .map(|(_, value)| value)
}

/// Like [`resolve`], but yields a numeric zero when no alias matches
pub fn resolve_or_zero<'r, S: AsRef<str>>(record: &'r Record, aliases: &[S]) -> &'r RawValue {
    resolve(record, aliases).unwrap_or(&ZERO)
}

/// First alias whose value is non-empty, with the label it was found under
pub fn resolve_present<'r, S: AsRef<str>>(
    record: &'r Record,
    aliases: &[S],
) -> Option<(&'r str, &'r RawValue)> {
    aliases
        .iter()
        .filter_map(|alias| find(record, alias.as_ref()))
        .find(|(_, value)| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_and_whitespace_insensitive() {
        let rec = Record::new().with("  supplier LISTED price ", "₹900");
        let aliases = FieldAliases::default();
        assert_eq!(
            resolve(&rec, &aliases.listed_price),
            Some(&RawValue::Text("₹900".into()))
        );
    }

    #[test]
    fn test_alias_priority_beats_column_order() {
        let rec = Record::new()
            .with("Discounted Price", "100")
            .with("Supplier Discounted Price (Incl GST and Commision)", "200");
        let aliases = FieldAliases::default();
        assert_eq!(
            resolve(&rec, &aliases.discounted_price),
            Some(&RawValue::Text("200".into()))
        );
    }

    #[test]
    fn test_missing_field_yields_zero_sentinel() {
        let rec = Record::new().with("Sub Order No", "ABC-1");
        assert_eq!(resolve(&rec, &["Listed Price"]), None);
        assert_eq!(resolve_or_zero(&rec, &["Listed Price"]), &RawValue::Number(0.0));
    }

    #[test]
    fn test_sparse_rows() {
        let rows = [
            Record::new().with("Order Date", "2024-01-02"),
            Record::new().with("Created At", "2024-01-03"),
            Record::new(),
        ];
        let aliases = FieldAliases::default();
        let found: Vec<_> = rows
            .iter()
            .map(|r| resolve(r, &aliases.date).map(RawValue::to_text))
            .collect();
        assert_eq!(
            found,
            vec![Some("2024-01-02".to_string()), Some("2024-01-03".to_string()), None]
        );
    }

    #[test]
    fn test_resolve_present_skips_blank_values() {
        let rec = Record::new()
            .with("Order Date", "")
            .with("Delivered Date", "2024-02-10");
        let (label, value) = resolve_present(&rec, &FieldAliases::default().date).unwrap();
        assert_eq!(label, "Delivered Date");
        assert_eq!(value.to_text(), "2024-02-10");
    }

    #[test]
    fn test_repeated_label_takes_last_column() {
        let rec = Record::new()
            .with("Reason for Credit Entry", "SHIPPED")
            .with("Order Date", "2024-03-01")
            .with("reason for credit entry ", "DELIVERED");
        let aliases = FieldAliases::default();
        assert_eq!(
            resolve(&rec, &aliases.status),
            Some(&RawValue::Text("DELIVERED".into()))
        );
        let (label, _) = resolve_present(&rec, &aliases.status).unwrap();
        assert_eq!(label, "reason for credit entry ");
    }

    #[test]
    fn test_extend_appends_new_aliases_once() {
        let mut aliases = FieldAliases::default();
        let extra = FieldAliases {
            listed_price: vec!["MRP".into(), "listed price".into()],
            discounted_price: vec![],
            status: vec!["Order Status".into()],
            date: vec![],
        };
        aliases.extend(&extra);
        assert_eq!(aliases.listed_price.last().map(String::as_str), Some("MRP"));
        assert_eq!(aliases.listed_price.len(), 4);
        assert_eq!(aliases.status, vec!["Reason for Credit Entry", "Order Status"]);
    }
}
