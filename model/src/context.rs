use crate::clients::error::{self, Result};
use futures::future;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Carries cancellation and an optional deadline from the entry point of a command down to the
/// operations that may block on the network.
///
/// An `ExecutionContext` is created by the caller and passed down. Clones share the same
/// cancellation token, so cancelling any clone cancels them all.
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    token: CancellationToken,
    deadline: Option<Instant>,
    timeout: Option<Duration>,
}

impl ExecutionContext {
    /// A context without a deadline. It ends only when cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context whose deadline is `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new().timeout(timeout)
    }

    /// Set the deadline of this context to `timeout` from now. A `timeout` too large to represent
    /// as an instant leaves the context without a deadline.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Instant::now().checked_add(timeout);
        self.timeout = self.deadline.map(|_| timeout);
        self
    }

    /// The token that cancels this context. Give it to a signal handler to abort in-flight work.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn cancel(&self) {
        self.token.cancel()
    }

    /// Drive `fut` to completion unless the context is cancelled or its deadline passes first, in
    /// which case `fut` is dropped and a context error is returned.
    pub async fn run<F, T>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => future::pending::<()>().await,
            }
        };
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(error::CancelledSnafu.build().into()),
            _ = deadline => Err(error::DeadlineExceededSnafu {
                timeout: self.timeout.unwrap_or_default(),
            }
            .build()
            .into()),
            result = fut => result,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn completes_before_deadline() {
        let ctx = ExecutionContext::with_timeout(Duration::from_secs(30));
        let value = ctx.run(async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn unrepresentable_timeout_means_no_deadline() {
        let ctx = ExecutionContext::with_timeout(Duration::from_secs(u64::MAX));
        let value = ctx.run(async { Ok(1) }).await.unwrap();
        assert_eq!(value, 1);
    }

    #[tokio::test]
    async fn cancelled_context_aborts() {
        let ctx = ExecutionContext::new();
        ctx.cancellation_token().cancel();
        let result: Result<()> = ctx.run(future::pending()).await;
        let message = result.unwrap_err().to_string();
        assert!(message.contains("cancelled"), "{}", message);
    }

    #[tokio::test]
    async fn deadline_aborts() {
        let ctx = ExecutionContext::with_timeout(Duration::from_millis(10));
        let result: Result<()> = ctx.run(future::pending()).await;
        let message = result.unwrap_err().to_string();
        assert!(message.contains("Deadline exceeded"), "{}", message);
    }
}
