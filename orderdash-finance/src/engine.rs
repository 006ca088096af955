//! Query surface for hosting services: submit an export, read results back.

use chrono::Utc;
use orderdash_core::{Bucket, EngineConfig, EngineError, Record};
use std::sync::Arc;

use crate::aggregator::{ProfitByDate, Totals, profit_by_date};
use crate::classifier::{Rules, classify};
use crate::dataset::{DatasetHolder, Snapshot};

/// Classify + aggregate `records` without publishing anything
pub fn build_snapshot(records: Vec<Record>, rules: &Rules) -> Result<Snapshot, EngineError> {
    if records.is_empty() {
        return Err(EngineError::EmptyInput);
    }

    let classification = classify(&records, rules);
    let totals = Totals::from_accumulators(&classification.accumulators, &rules.cost);
    let series = profit_by_date(&records, rules);

    Ok(Snapshot {
        submitted_at: Utc::now(),
        records,
        totals,
        buckets: classification.buckets,
        profit_by_date: series.entries,
        date_issues: series.issues,
    })
}

/// Classification engine owning the current dataset
#[derive(Debug, Default)]
pub struct Engine {
    rules: Rules,
    holder: DatasetHolder,
}

impl Engine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            rules: Rules::from(config),
            holder: DatasetHolder::new(),
        }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Process a full export and make it the current dataset.
    ///
    /// An empty export is rejected with `EmptyInput` and leaves the current
    /// dataset in place.
    pub fn submit(&self, records: Vec<Record>) -> Result<Arc<Snapshot>, EngineError> {
        let snapshot = build_snapshot(records, &self.rules)?;

        tracing::info!(
            records = snapshot.records.len(),
            delivered = snapshot.totals.sell_in_month_products,
            rto = snapshot.bucket_count(Bucket::Rto),
            other = snapshot.bucket_count(Bucket::Other),
            dates = snapshot.profit_by_date.len(),
            "dataset classified"
        );
        if !snapshot.date_issues.is_empty() {
            tracing::warn!(
                skipped = snapshot.date_issues.len(),
                "delivered orders left out of the profit series (unreadable dates)"
            );
        }

        Ok(self.holder.set(snapshot))
    }

    /// Profit series of the current dataset
    pub fn profit_by_date(&self) -> Result<Vec<ProfitByDate>, EngineError> {
        Ok(self.holder.get()?.profit_by_date.clone())
    }

    /// Full current snapshot, for report rendering
    pub fn snapshot(&self) -> Result<Arc<Snapshot>, EngineError> {
        self.holder.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use orderdash_core::CostModel;

    fn order(status: &str) -> Record {
        Record::new().with("Reason for Credit Entry", status)
    }

    #[test]
    fn test_queries_before_submit() {
        let engine = Engine::default();
        assert_eq!(engine.snapshot().unwrap_err(), EngineError::NoDataset);
        assert_eq!(engine.profit_by_date().unwrap_err(), EngineError::NoDataset);
    }

    #[test]
    fn test_empty_submission_keeps_previous_dataset() {
        let engine = Engine::default();
        assert_eq!(engine.submit(Vec::new()).unwrap_err(), EngineError::EmptyInput);
        assert!(engine.snapshot().is_err());

        engine.submit(vec![order("shipped")]).unwrap();
        assert_eq!(engine.submit(Vec::new()).unwrap_err(), EngineError::EmptyInput);
        assert_eq!(engine.snapshot().unwrap().records.len(), 1);
    }

    #[test]
    fn test_submit_replaces_dataset() {
        let engine = Engine::default();
        engine.submit(vec![order("shipped")]).unwrap();
        engine
            .submit(vec![order("cancelled"), order("cancelled")])
            .unwrap();

        let snap = engine.snapshot().unwrap();
        assert_eq!(snap.bucket_count(Bucket::All), 2);
        assert_eq!(snap.bucket_count(Bucket::Cancelled), 2);
        assert_eq!(snap.bucket_count(Bucket::Shipped), 0);
    }

    #[test]
    fn test_rto_initiated_only_in_rto() {
        let engine = Engine::default();
        let snap = engine.submit(vec![order("rto_initiated")]).unwrap();
        assert_eq!(snap.buckets.buckets_of(0), vec![Bucket::Rto]);
        assert_eq!(snap.bucket_count(Bucket::All), 1);
        assert_eq!(snap.bucket_count(Bucket::Other), 0);
    }

    #[test]
    fn test_profit_series_query() {
        let engine = Engine::default();
        engine
            .submit(vec![
                order("delivered")
                    .with("Date", "2024-05-10")
                    .with("Discounted Price", "600"),
                order("delivered")
                    .with("Date", "2024-05-10")
                    .with("Discounted Price", "700"),
            ])
            .unwrap();

        let series = engine.profit_by_date().unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2024, 5, 10).unwrap());
        assert_eq!(series[0].profit, 300.0);
    }

    #[test]
    fn test_configured_cost_model() {
        let config = EngineConfig {
            cost: CostModel {
                unit_cost: 400.0,
                door_step_unit_value: 100.0,
            },
            ..EngineConfig::default()
        };
        let engine = Engine::new(&config);
        let snap = engine
            .submit(vec![
                order("delivered").with("Discounted Price", "600"),
                order("door_step_exchanged"),
            ])
            .unwrap();
        assert_eq!(snap.totals.total_profit, 200.0);
        assert_eq!(snap.totals.profit_percent, 50.0);
        assert_eq!(snap.totals.total_door_step_exchanger, 100.0);
    }
}
