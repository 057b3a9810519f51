//! The predictor contract.

use anyhow::Result;
use async_trait::async_trait;

/// A batch-capable model. The host owns the predictor and only the worker
/// task ever calls it, so implementations need no internal locking and are
/// guaranteed never to be re-entered.
///
/// `predict_batch` is the single method name coupled across the boundary;
/// what happens inside (token loops, per-row early finishing, device
/// placement) is entirely opaque to the host.
#[async_trait]
pub trait Predictor: Send + Sync + 'static {
    /// Merged input produced by the batcher.
    type Batch: Send + 'static;
    /// Batched output consumed by the batcher's `split`.
    type Output: Send + 'static;

    async fn predict_batch(&self, batch: Self::Batch) -> Result<Self::Output>;
}

/// Adapts a plain function into a [`Predictor`]. Handy for demos and
/// tests where the "model" is a closure.
pub struct FnPredictor<F, B, O> {
    f: F,
    _marker: std::marker::PhantomData<fn(B) -> O>,
}

impl<F, B, O> FnPredictor<F, B, O>
where
    F: Fn(B) -> Result<O> + Send + Sync + 'static,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _marker: std::marker::PhantomData,
        }
    }
}

#[async_trait]
impl<F, B, O> Predictor for FnPredictor<F, B, O>
where
    F: Fn(B) -> Result<O> + Send + Sync + 'static,
    B: Send + 'static,
    O: Send + 'static,
{
    type Batch = B;
    type Output = O;

    async fn predict_batch(&self, batch: B) -> Result<O> {
        (self.f)(batch)
    }
}
