//! Error types for the batching host.

use thiserror::Error;

/// Errors surfaced to callers of [`crate::host::ModelHost`].
///
/// Batch-level failures (`BatchMerge`, `Predictor`, `BatchSplit`,
/// `BatchSplitArity`) fail every request in the affected batch: once the
/// per-request payloads have been merged the host cannot attribute a fault
/// to an individual item, so the same error is cloned out to every waiting
/// caller. The worker itself keeps running and serves the next batch.
#[derive(Debug, Clone, Error)]
pub enum HostError {
    /// A submission (or `stop`) arrived while the host was not running.
    #[error("host is not running")]
    HostStopped,

    /// `start` was called on a host that already left the `New` state.
    #[error("host has already been started")]
    AlreadyStarted,

    /// The batcher's `merge` failed while combining the batch.
    #[error("batch merge failed: {0}")]
    BatchMerge(String),

    /// The predictor's `predict_batch` failed.
    #[error("predictor failed: {0}")]
    Predictor(String),

    /// The batcher's `split` failed while separating the batched output.
    #[error("batch split failed: {0}")]
    BatchSplit(String),

    /// `split` returned a different number of results than the batch held.
    #[error("batch split returned {actual} results for a batch of {expected}")]
    BatchSplitArity { expected: usize, actual: usize },

    /// The worker went away before settling this request's handle. Only
    /// reachable if the predictor panicked out of the worker task.
    #[error("worker terminated before publishing a result")]
    WorkerGone,
}
