//! The batcher contract: merging request payloads into one predictor call
//! and splitting the batched output back into per-request results.

use std::marker::PhantomData;

use anyhow::{ensure, Result};

/// User-supplied pair of pure functions bridging per-request payloads and
/// the predictor's batched form.
///
/// `merge` receives the payloads of N submissions in batch order and
/// produces the predictor input plus an opaque context; `split` receives
/// whatever the predictor returned plus that context and must produce
/// exactly N per-request results in the same order. The host never
/// inspects the context; it exists to carry whatever reassembly state the
/// batcher needs (original sequence lengths, request boundaries, ...).
///
/// Both operations run on the worker task with no host state in scope, so
/// implementations only need to be pure with respect to the host. A failed
/// `merge` or `split` fails the whole batch; the host reports the error to
/// every affected caller.
pub trait Batcher: Send + Sync + 'static {
    /// Per-request payload submitted through `predict`.
    type Item: Send + 'static;
    /// Merged input handed to the predictor.
    type Batch: Send + 'static;
    /// Opaque per-batch state threaded from `merge` to `split`.
    type Ctx: Send + 'static;
    /// Whatever the predictor returns for one batch.
    type BatchOutput: Send + 'static;
    /// Per-request result handed back to a caller.
    type Output: Send + 'static;

    /// Combine N request payloads (N >= 1) into one predictor input.
    fn merge(&self, items: Vec<Self::Item>) -> Result<(Self::Batch, Self::Ctx)>;

    /// Separate the batched output into exactly N per-request results,
    /// ordered as the items given to `merge`.
    fn split(&self, output: Self::BatchOutput, ctx: Self::Ctx) -> Result<Vec<Self::Output>>;
}

/// Transposing batcher for predictors whose `predict_batch` already takes
/// a `Vec` of payloads and returns a `Vec` of results of the same length.
pub struct IdentityBatcher<T, O> {
    _marker: PhantomData<fn(T) -> O>,
}

impl<T, O> IdentityBatcher<T, O> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T, O> Default for IdentityBatcher<T, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, O> Batcher for IdentityBatcher<T, O>
where
    T: Send + 'static,
    O: Send + 'static,
{
    type Item = T;
    type Batch = Vec<T>;
    type Ctx = ();
    type BatchOutput = Vec<O>;
    type Output = O;

    fn merge(&self, items: Vec<T>) -> Result<(Vec<T>, ())> {
        Ok((items, ()))
    }

    fn split(&self, output: Vec<O>, _ctx: ()) -> Result<Vec<O>> {
        // Length validation is the host's job; pass through as-is.
        Ok(output)
    }
}

/// Concatenating batcher: flattens per-request rows into one contiguous
/// buffer and remembers the request boundaries in the context so the flat
/// output can be sliced back apart.
pub struct ConcatBatcher<T, O> {
    _marker: PhantomData<fn(T) -> O>,
}

impl<T, O> ConcatBatcher<T, O> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T, O> Default for ConcatBatcher<T, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, O> Batcher for ConcatBatcher<T, O>
where
    T: Send + 'static,
    O: Send + 'static,
{
    type Item = Vec<T>;
    type Batch = Vec<T>;
    type Ctx = Vec<usize>;
    type BatchOutput = Vec<O>;
    type Output = Vec<O>;

    fn merge(&self, items: Vec<Vec<T>>) -> Result<(Vec<T>, Vec<usize>)> {
        let mut flat = Vec::new();
        let mut boundaries = Vec::with_capacity(items.len() + 1);
        for rows in items {
            boundaries.push(flat.len());
            flat.extend(rows);
        }
        boundaries.push(flat.len());
        Ok((flat, boundaries))
    }

    fn split(&self, output: Vec<O>, boundaries: Vec<usize>) -> Result<Vec<Vec<O>>> {
        let total = *boundaries.last().unwrap_or(&0);
        ensure!(
            output.len() == total,
            "flat output length {} does not match merged length {}",
            output.len(),
            total
        );

        let mut results = Vec::with_capacity(boundaries.len().saturating_sub(1));
        let mut rest = output;
        for window in boundaries.windows(2).rev() {
            let tail = rest.split_off(window[0]);
            results.push(tail);
        }
        results.reverse();
        Ok(results)
    }
}
