//! model-host - Dynamic Request Batching Runtime
//!
//! Coalesces concurrent single-item prediction requests into batches,
//! invokes a batch-capable predictor once per batch on a dedicated worker,
//! and fans the per-item results back to the waiting callers.

pub mod batcher;
pub mod config;
pub mod error;
pub mod handle;
pub mod host;
pub mod predictor;
pub mod queue;

mod worker;

// Re-exports for convenience
pub use batcher::{Batcher, ConcatBatcher, IdentityBatcher};
pub use config::{HostConfig, HostMetrics};
pub use error::HostError;
pub use host::{Hosted, ModelHost};
pub use predictor::{FnPredictor, Predictor};
