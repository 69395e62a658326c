//! The one-shot asynchronous outcome of executing an operation.
//!
//! `exec` returns immediately with an [`OperationResult`]; the caller
//! awaits [`OperationResult::finished`] — the single deliberate
//! suspension point in the core — to observe the [`Outcome`] exactly
//! once. The contract carries no cancellation; callers wanting a bound
//! on the wait wrap it in a timeout themselves.

use std::future::Future;

use tokio::sync::oneshot;

/// Success flag plus the ordered list of errors the operation reported.
///
/// Note that `!success` with an empty error list is a legal outcome: the
/// operation failed but gave no reason. Callers rendering outcomes must
/// synthesize a generic error for that case rather than treat it as
/// success.
#[derive(Debug)]
pub struct Outcome {
    success: bool,
    errors: Vec<anyhow::Error>,
}

impl Outcome {
    pub fn success() -> Self {
        Self {
            success: true,
            errors: Vec::new(),
        }
    }

    pub fn failure(errors: Vec<anyhow::Error>) -> Self {
        Self {
            success: false,
            errors,
        }
    }

    /// A failure carrying a single error.
    pub fn error(err: impl Into<anyhow::Error>) -> Self {
        Self::failure(vec![err.into()])
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn errors(&self) -> &[anyhow::Error] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<anyhow::Error> {
        self.errors
    }
}

/// Handle to an in-flight (or already finished) execution.
pub struct OperationResult {
    rx: oneshot::Receiver<Outcome>,
}

impl OperationResult {
    /// A result that is already complete, for synchronously-finished
    /// work.
    pub fn ready(outcome: Outcome) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(outcome);
        Self { rx }
    }

    /// A pending result plus the sender that completes it, for
    /// operations driving completion themselves.
    pub fn channel() -> (oneshot::Sender<Outcome>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Self { rx })
    }

    /// Schedule background work on the runtime; the result completes
    /// when the future does.
    pub fn spawn<F>(work: F) -> Self
    where
        F: Future<Output = Outcome> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let _ = tx.send(work.await);
        });
        Self { rx }
    }

    /// Wait for execution to finish and consume the outcome.
    ///
    /// An execution that drops its sender without reporting resolves to
    /// a failure outcome rather than panicking.
    pub async fn finished(self) -> Outcome {
        self.rx.await.unwrap_or_else(|_| {
            Outcome::error(anyhow::anyhow!(
                "execution ended without reporting an outcome"
            ))
        })
    }
}
