//! One-shot completion handles connecting callers to the worker.

use tokio::sync::oneshot;

use crate::error::HostError;

/// Receiving half awaited by the submitting caller.
pub type CompletionWaiter<O> = oneshot::Receiver<Result<O, HostError>>;

/// The settle-once result carrier attached to every submission.
///
/// `complete` consumes the handle, so a second transition out of pending is
/// impossible to express. The waiter resolves immediately if the handle was
/// settled before it started waiting, and does not need the worker to still
/// be alive at that point.
#[derive(Debug)]
pub struct CompletionHandle<O> {
    tx: oneshot::Sender<Result<O, HostError>>,
}

impl<O> CompletionHandle<O> {
    /// Create a pending handle/waiter pair.
    pub fn new() -> (Self, CompletionWaiter<O>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, rx)
    }

    /// Settle the handle with a result or an error.
    ///
    /// A caller that abandoned its wait has dropped the receiving half;
    /// the unread result is discarded and nothing else leaks.
    pub fn complete(self, result: Result<O, HostError>) {
        let _ = self.tx.send(result);
    }
}
