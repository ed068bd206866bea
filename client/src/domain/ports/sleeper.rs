//! Async sleeping abstraction so polling loops are testable without real time.

use std::time::Duration;

use async_trait::async_trait;

/// Clock-independent sleeping used between feed refreshes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Suspend the task for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Tokio-backed sleeper used in production wiring.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
