//! Batch-level error signals surfaced to callers of the engine.
//!
//! Per-record anomalies (missing fields, unreadable prices or dates) are
//! absorbed where they occur and never show up here.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("nothing to classify: the submitted export has no records")]
    EmptyInput,
    #[error("no dataset has been submitted yet")]
    NoDataset,
}
