//! The serial batch worker: the only execution context that touches the
//! predictor.

use std::sync::Arc;

use log::{debug, warn};

use crate::batcher::Batcher;
use crate::config::HostMetrics;
use crate::error::HostError;
use crate::handle::CompletionHandle;
use crate::predictor::Predictor;
use crate::queue::BatchReceiver;

/// One queued request: the caller's payload plus its result carrier.
pub(crate) struct Submission<I, O> {
    pub item: I,
    pub handle: CompletionHandle<O>,
}

/// Run until the queue is closed and drained.
///
/// Every claimed submission is settled on every path out of an iteration:
/// merge, predict and split failures all fan the same error out to the
/// whole batch, and none of them stop the loop.
pub(crate) async fn run<P, B>(
    mut receiver: BatchReceiver<Submission<B::Item, B::Output>>,
    predictor: Arc<P>,
    batcher: Arc<B>,
    max_batch_size: usize,
    metrics: Arc<HostMetrics>,
) where
    P: Predictor<Batch = B::Batch, Output = B::BatchOutput>,
    B: Batcher,
{
    while let Some(batch) = receiver.pop_batch(max_batch_size).await {
        process_batch(&*predictor, &*batcher, &metrics, batch).await;
    }
    debug!("submission queue closed, batch worker exiting");
}

async fn process_batch<P, B>(
    predictor: &P,
    batcher: &B,
    metrics: &HostMetrics,
    batch: Vec<Submission<B::Item, B::Output>>,
) where
    P: Predictor<Batch = B::Batch, Output = B::BatchOutput>,
    B: Batcher,
{
    let size = batch.len();
    metrics.record_batch(size);

    let (items, handles): (Vec<_>, Vec<_>) =
        batch.into_iter().map(|s| (s.item, s.handle)).unzip();

    let (merged, ctx) = match batcher.merge(items) {
        Ok(merged) => merged,
        Err(err) => {
            return fail_batch(handles, HostError::BatchMerge(format!("{err:#}")), metrics);
        }
    };

    let batch_output = match predictor.predict_batch(merged).await {
        Ok(output) => output,
        Err(err) => {
            return fail_batch(handles, HostError::Predictor(format!("{err:#}")), metrics);
        }
    };

    let outputs = match batcher.split(batch_output, ctx) {
        Ok(outputs) => outputs,
        Err(err) => {
            return fail_batch(handles, HostError::BatchSplit(format!("{err:#}")), metrics);
        }
    };

    if outputs.len() != size {
        let err = HostError::BatchSplitArity {
            expected: size,
            actual: outputs.len(),
        };
        return fail_batch(handles, err, metrics);
    }

    for (handle, output) in handles.into_iter().zip(outputs) {
        handle.complete(Ok(output));
    }
}

fn fail_batch<O>(handles: Vec<CompletionHandle<O>>, err: HostError, metrics: &HostMetrics) {
    warn!("batch of {} failed: {}", handles.len(), err);
    metrics.record_batch_failure();
    for handle in handles {
        handle.complete(Err(err.clone()));
    }
}
