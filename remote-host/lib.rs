//! remote-host - gRPC adapter for the batching model host
//!
//! Exposes a local [`model_host::ModelHost`] over a single unary
//! `predict` RPC. The adapter converts wire messages into local
//! submissions; batching stays inside the one host process.

pub mod proto;
pub mod service;

pub use service::PredictService;
