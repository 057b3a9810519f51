//! The submission queue between callers and the batching worker.
//!
//! An unbounded FIFO split into a producer half that many callers push
//! into and a consumer half owned by the single worker. `pop_batch` never
//! waits for a full batch: it blocks for the first element only, then
//! drains whatever else is already queued up to the cap. Batch size is
//! determined by offered load, so a lone request is served as a batch of
//! one instead of stalling behind a fill threshold.

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

use crate::error::HostError;

/// Producer half: shared by every caller through the host.
pub struct SubmissionQueue<T> {
    // Taken on close so pushes start failing while the receiver drains.
    tx: Mutex<Option<mpsc::UnboundedSender<T>>>,
}

/// Consumer half: owned by the worker.
pub struct BatchReceiver<T> {
    rx: mpsc::UnboundedReceiver<T>,
}

/// Create a connected queue/receiver pair.
pub fn submission_queue<T>() -> (SubmissionQueue<T>, BatchReceiver<T>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        SubmissionQueue {
            tx: Mutex::new(Some(tx)),
        },
        BatchReceiver { rx },
    )
}

impl<T> SubmissionQueue<T> {
    /// Append a submission, waking the worker if it is idle.
    pub fn push(&self, value: T) -> Result<(), HostError> {
        match self.tx.lock().as_ref() {
            Some(tx) => tx.send(value).map_err(|_| HostError::HostStopped),
            None => Err(HostError::HostStopped),
        }
    }

    /// Close the queue. Later pushes fail with `HostStopped`; the receiver
    /// drains whatever is already queued before reporting exhaustion.
    pub fn close(&self) {
        self.tx.lock().take();
    }
}

impl<T> BatchReceiver<T> {
    /// Claim the next batch: block until at least one submission is
    /// available, then drain up to `max` without blocking again.
    ///
    /// Returns `None` once the queue is closed and fully drained.
    pub async fn pop_batch(&mut self, max: usize) -> Option<Vec<T>> {
        let first = self.rx.recv().await?;
        let mut batch = Vec::with_capacity(max.min(64));
        batch.push(first);
        while batch.len() < max {
            match self.rx.try_recv() {
                Ok(value) => batch.push(value),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        Some(batch)
    }
}
