//! Report model for renderers: metric table, bucket counts, JSON summary

use chrono::{DateTime, Utc};
use orderdash_core::Bucket;
use serde::{Serialize, Serializer};

use crate::aggregator::{DateIssue, ProfitByDate, Totals};
use crate::dataset::Snapshot;

/// One line of the dashboard report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    pub metric: &'static str,
    pub value: String,
}

/// Ordered metric table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub rows: Vec<MetricRow>,
}

impl Report {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let t = &snapshot.totals;
        let count = |b: Bucket| snapshot.bucket_count(b).to_string();

        let rows = vec![
            row("All Orders", count(Bucket::All)),
            row("RTO", count(Bucket::Rto)),
            row("Door Step Exchanged", count(Bucket::DoorStepExchanged)),
            row(
                "Delivered (count / discounted total)",
                format!(
                    "{} / {}",
                    t.sell_in_month_products,
                    format_inr(t.delivered_supplier_discounted_price_total)
                ),
            ),
            row("Cancelled", count(Bucket::Cancelled)),
            row("Pending", count(Bucket::ReadyToShip)),
            row("Shipped", count(Bucket::Shipped)),
            row("Other", count(Bucket::Other)),
            row("Supplier Listed Total Price", format_inr(t.total_supplier_listed_price)),
            row("Supplier Discounted Total Price", format_inr(t.total_supplier_discounted_price)),
            row("Total Profit", format_inr(t.total_profit)),
            row("Profit %", format!("{}%", t.profit_percent_text())),
        ];

        Self { rows }
    }

    /// Two-column text table with a header row
    pub fn render_table(&self) -> String {
        let metric_width = self
            .rows
            .iter()
            .map(|r| r.metric.chars().count())
            .chain(std::iter::once("Metric".len()))
            .max()
            .unwrap_or(0);

        let mut out = format!("{:<metric_width$}  Value\n", "Metric");
        out.push_str(&format!("{}  {}\n", "-".repeat(metric_width), "-".repeat(5)));
        for r in &self.rows {
            out.push_str(&format!("{:<metric_width$}  {}\n", r.metric, r.value));
        }
        out
    }
}

fn row(metric: &'static str, value: String) -> MetricRow {
    MetricRow { metric, value }
}

/// Count per bucket, every bucket present, vocabulary order
#[derive(Debug, Clone, PartialEq)]
pub struct BucketCounts(pub Vec<(Bucket, usize)>);

impl BucketCounts {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self(snapshot.buckets.counts())
    }

    pub fn get(&self, bucket: Bucket) -> usize {
        self.0
            .iter()
            .find(|(b, _)| *b == bucket)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

impl Serialize for BucketCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(b, n)| (b.as_str(), n)))
    }
}

/// The JSON contract handed to dashboards: totals at the top level,
/// bucket counts, and the profit series
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotSummary {
    pub submitted_at: DateTime<Utc>,
    #[serde(flatten)]
    pub totals: Totals,
    pub counts: BucketCounts,
    pub profit_by_date: Vec<ProfitByDate>,
    pub date_issues: Vec<DateIssue>,
}

impl SnapshotSummary {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            submitted_at: snapshot.submitted_at,
            totals: snapshot.totals,
            counts: BucketCounts::from_snapshot(snapshot),
            profit_by_date: snapshot.profit_by_date.clone(),
            date_issues: snapshot.date_issues.clone(),
        }
    }
}

/// Rupee amount with Indian digit grouping, up to three decimals:
/// `123456.5` -> `₹1,23,456.5`
pub fn format_inr(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let fixed = format!("{:.3}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut out = String::from("₹");
    if amount < 0.0 && (int_part != "0" || !frac.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_indian(int_part));
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

// last three digits, then groups of two
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (h, t) = rest.split_at(rest.len() - 2);
        groups.push(t);
        rest = h;
    }
    groups.push(rest);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}
