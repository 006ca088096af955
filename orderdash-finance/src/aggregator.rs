//! Totals and the per-date profit series for delivered orders

use chrono::NaiveDate;
use orderdash_core::{
    Bucket, CostModel, Record, normalize_date, normalize_price, resolve_or_zero, resolve_present,
    status_text,
};
use serde::{Serialize, Serializer};
use std::collections::HashMap;

use crate::classifier::{Accumulators, Rules};

/// Global totals for one dataset.
///
/// Field names are the wire contract consumed by report renderers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_supplier_listed_price: f64,
    pub total_supplier_discounted_price: f64,
    pub sell_in_month_products: usize,
    pub delivered_supplier_discounted_price_total: f64,
    pub total_door_step_exchanger: f64,
    pub total_profit: f64,
    /// Already rounded to two decimals
    #[serde(serialize_with = "two_decimals")]
    pub profit_percent: f64,
}

impl Totals {
    pub fn from_accumulators(acc: &Accumulators, cost: &CostModel) -> Self {
        let delivered_cost = acc.delivered_count as f64 * cost.unit_cost;
        let total_profit = acc.delivered_discounted_total - delivered_cost;

        let profit_percent = if acc.delivered_count == 0 || delivered_cost == 0.0 {
            0.0
        } else {
            round2(total_profit / delivered_cost * 100.0)
        };

        Self {
            total_supplier_listed_price: acc.total_listed,
            total_supplier_discounted_price: acc.total_discounted,
            sell_in_month_products: acc.delivered_count,
            delivered_supplier_discounted_price_total: acc.delivered_discounted_total,
            total_door_step_exchanger: acc.door_step_total,
            total_profit,
            profit_percent,
        }
    }

    /// `profitPercent` as rendered on the wire, e.g. `"20.00"`
    pub fn profit_percent_text(&self) -> String {
        format!("{:.2}", self.profit_percent)
    }
}

/// Round half away from zero to two decimals (never yields -0.0)
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0 + 0.0
}

fn two_decimals<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{:.2}", value))
}

/// Profit for one delivery date
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfitByDate {
    pub date: NaiveDate,
    pub profit: f64,
}

/// A delivered record left out of the series because its date was unreadable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateIssue {
    /// Zero-based position in the submitted records
    pub row: usize,
    pub field: String,
    pub raw: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfitSeries {
    pub entries: Vec<ProfitByDate>,
    pub issues: Vec<DateIssue>,
}

/// Group delivered records by calendar date.
///
/// Records without any date column are skipped silently; records whose date
/// cannot be read are skipped and reported. Entries keep first-seen order.
pub fn profit_by_date(records: &[Record], rules: &Rules) -> ProfitSeries {
    let mut groups: Vec<(NaiveDate, f64, usize)> = Vec::new();
    let mut index_of: HashMap<NaiveDate, usize> = HashMap::new();
    let mut issues = Vec::new();

    for (row, record) in records.iter().enumerate() {
        let status = status_text(record, &rules.aliases.status);
        if !status.contains(Bucket::Delivered.as_str()) {
            continue;
        }

        let Some((field, raw)) = resolve_present(record, &rules.aliases.date) else {
            continue;
        };

        let date = match normalize_date(raw) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(row, field, raw = %raw.to_text(), "skipping delivered order: {e}");
                issues.push(DateIssue {
                    row,
                    field: field.to_string(),
                    raw: raw.to_text(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let discounted = normalize_price(resolve_or_zero(record, &rules.aliases.discounted_price));
        let slot = *index_of.entry(date).or_insert_with(|| {
            groups.push((date, 0.0, 0));
            groups.len() - 1
        });
        let group = &mut groups[slot];
        group.1 += discounted;
        group.2 += 1;
    }

    let entries = groups
        .into_iter()
        .map(|(date, total, count)| ProfitByDate {
            date,
            profit: total - count as f64 * rules.cost.unit_cost,
        })
        .collect();

    ProfitSeries { entries, issues }
}
