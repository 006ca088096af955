//! The single in-memory dataset slot.
//!
//! Holds the most recent snapshot only. Snapshots are built completely before
//! they are published, and replaced whole, so readers never see totals that
//! disagree with the bucket contents.

use chrono::{DateTime, Utc};
use orderdash_core::{Bucket, Buckets, EngineError, Record};
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock};

use crate::aggregator::{DateIssue, ProfitByDate, Totals};

/// Result of one classification + aggregation run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub submitted_at: DateTime<Utc>,
    pub records: Vec<Record>,
    pub totals: Totals,
    pub buckets: Buckets,
    pub profit_by_date: Vec<ProfitByDate>,
    pub date_issues: Vec<DateIssue>,
}

impl Snapshot {
    /// Records assigned to `bucket`, in input order
    pub fn bucket_records(&self, bucket: Bucket) -> impl Iterator<Item = &Record> {
        self.buckets.records(bucket, &self.records)
    }

    pub fn bucket_count(&self, bucket: Bucket) -> usize {
        self.buckets.count(bucket)
    }
}

/// Overwrite-only holder for the current snapshot
#[derive(Debug, Default)]
pub struct DatasetHolder {
    slot: RwLock<Option<Arc<Snapshot>>>,
}

impl DatasetHolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish `snapshot`, dropping whatever was held before
    pub fn set(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        let snapshot = Arc::new(snapshot);
        // The slot only ever holds complete snapshots, so a poisoned lock is still usable
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(Arc::clone(&snapshot));
        snapshot
    }

    /// Current snapshot, or `NoDataset` before the first submission
    pub fn get(&self) -> Result<Arc<Snapshot>, EngineError> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(EngineError::NoDataset)
    }

    pub fn is_empty(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}
