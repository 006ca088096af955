//! orderdash-finance: status classification, totals, per-date profit series,
//! and the single-slot dataset store

pub mod aggregator;
pub mod classifier;
pub mod dataset;
pub mod engine;
pub mod report;

pub use aggregator::{DateIssue, ProfitByDate, ProfitSeries, Totals, profit_by_date};
pub use classifier::{Accumulators, Classification, Rules, classify, classify_status};
pub use dataset::{DatasetHolder, Snapshot};
pub use engine::{Engine, build_snapshot};
pub use report::{BucketCounts, MetricRow, Report, SnapshotSummary, format_inr};
