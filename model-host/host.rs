//! The host facade: lifecycle, submission entry point, and the
//! decorator-style predictor binding.

use std::sync::Arc;

use log::debug;
use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::batcher::Batcher;
use crate::config::{HostConfig, HostMetrics};
use crate::error::HostError;
use crate::handle::CompletionHandle;
use crate::predictor::Predictor;
use crate::queue::{submission_queue, BatchReceiver, SubmissionQueue};
use crate::worker::{self, Submission};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HostState {
    New,
    Running,
    Stopped,
}

/// A batching runtime bound to one predictor.
///
/// Accepts single-item submissions from any number of concurrent callers,
/// groups them under the configured size policy, runs exactly one
/// predictor invocation at a time on a dedicated worker task, and routes
/// per-item results back to the submitting callers.
///
/// Lifecycle is `new -> start -> stop`; submissions are accepted only
/// between `start` and `stop`.
pub struct ModelHost<P, B>
where
    P: Predictor,
    B: Batcher<Batch = P::Batch, BatchOutput = P::Output>,
{
    predictor: Arc<P>,
    batcher: Arc<B>,
    config: HostConfig,
    metrics: Arc<HostMetrics>,
    state: Mutex<HostState>,
    queue: SubmissionQueue<Submission<B::Item, B::Output>>,
    receiver: Mutex<Option<BatchReceiver<Submission<B::Item, B::Output>>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl<P, B> ModelHost<P, B>
where
    P: Predictor,
    B: Batcher<Batch = P::Batch, BatchOutput = P::Output>,
{
    /// Bind a predictor and a batcher into a host. Panics if
    /// `max_batch_size` is zero.
    pub fn new(predictor: P, batcher: B, config: HostConfig) -> Self {
        assert!(config.max_batch_size >= 1, "max_batch_size must be positive");
        let (queue, receiver) = submission_queue();
        Self {
            predictor: Arc::new(predictor),
            batcher: Arc::new(batcher),
            config,
            metrics: HostMetrics::new(),
            state: Mutex::new(HostState::New),
            queue,
            receiver: Mutex::new(Some(receiver)),
            worker: Mutex::new(None),
        }
    }

    /// Launch the worker. Must be called on a tokio runtime. Starting a
    /// host that already left the `New` state is an error.
    pub fn start(&self) -> Result<(), HostError> {
        let mut state = self.state.lock();
        if *state != HostState::New {
            return Err(HostError::AlreadyStarted);
        }
        let receiver = match self.receiver.lock().take() {
            Some(receiver) => receiver,
            None => return Err(HostError::AlreadyStarted),
        };
        *state = HostState::Running;

        let handle = tokio::spawn(worker::run(
            receiver,
            Arc::clone(&self.predictor),
            Arc::clone(&self.batcher),
            self.config.max_batch_size,
            Arc::clone(&self.metrics),
        ));
        *self.worker.lock() = Some(handle);
        Ok(())
    }

    /// Coordinated drain: stop accepting submissions, let the worker
    /// exhaust everything already accepted, then join it. When `stop`
    /// returns, every previously accepted submission has a settled result.
    pub async fn stop(&self) -> Result<(), HostError> {
        {
            let mut state = self.state.lock();
            if *state != HostState::Running {
                return Err(HostError::HostStopped);
            }
            *state = HostState::Stopped;
        }
        self.queue.close();

        let worker = self.worker.lock().take();
        if let Some(worker) = worker {
            if worker.await.is_err() {
                log::error!("batch worker panicked during drain");
            }
        }
        Ok(())
    }

    /// Submit one payload and wait for its result.
    ///
    /// Fails immediately with [`HostError::HostStopped`] outside the
    /// running state; otherwise resolves once the worker has run the batch
    /// containing this submission. Errors from the batcher or predictor
    /// are re-raised as-is. Abandoning the wait (dropping the future, e.g.
    /// under `tokio::time::timeout`) is safe: the worker still processes
    /// the item and discards the unread result.
    pub async fn predict(&self, item: B::Item) -> Result<B::Output, HostError> {
        if *self.state.lock() != HostState::Running {
            return Err(HostError::HostStopped);
        }
        let (handle, waiter) = CompletionHandle::new();
        self.queue.push(Submission { item, handle })?;
        match waiter.await {
            Ok(result) => result,
            Err(_) => Err(HostError::WorkerGone),
        }
    }

    /// Counters recorded by the worker.
    pub fn metrics(&self) -> Arc<HostMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }
}

impl<P, B> Drop for ModelHost<P, B>
where
    P: Predictor,
    B: Batcher<Batch = P::Batch, BatchOutput = P::Output>,
{
    fn drop(&mut self) {
        // Dropping without stop(): closing the queue lets a detached
        // worker drain and exit on its own.
        self.queue.close();
        if self.worker.get_mut().is_some() && *self.state.get_mut() == HostState::Running {
            debug!("model host dropped while running, worker drains detached");
        }
    }
}

/// Decorator-style binding: gives every predictor a `host(...)` factory,
/// so call sites read `MyModel::new().host(batcher, config)`.
pub trait Hosted: Predictor + Sized {
    fn host<B>(self, batcher: B, config: HostConfig) -> ModelHost<Self, B>
    where
        B: Batcher<Batch = Self::Batch, BatchOutput = Self::Output>,
    {
        ModelHost::new(self, batcher, config)
    }
}

impl<P: Predictor> Hosted for P {}
