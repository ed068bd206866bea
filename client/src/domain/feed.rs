//! Dashboard link feed: one foreground fetch, then best-effort polling.
//!
//! The feed replaces reactive re-rendering with an explicit scheduled task:
//! every tick refreshes the list and recomputes derived expiry states
//! against the clock, then hands a snapshot to the subscribed observer.
//! Background failures are swallowed by design; only the initial foreground
//! fetch surfaces an error.

use std::sync::Arc;
use std::time::Duration;

use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{ShortenerApi, Sleeper};
use crate::domain::{ClassifiedError, LinkStatus, ShortLink};

/// Interval between background refreshes.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(10);

/// Point-in-time view of the authenticated user's links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSnapshot {
    /// Links newest first, as served.
    pub links: Vec<ShortLink>,
    /// Derived expiry state per link, index-aligned with `links`.
    pub statuses: Vec<LinkStatus>,
}

/// Whether the observer wants further snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedDirective {
    /// Keep polling.
    Continue,
    /// End the subscription; the feed returns cleanly.
    Stop,
}

/// Subscription callback invoked after every feed tick.
pub trait FeedObserver: Send + Sync {
    /// Receive the latest snapshot and decide whether to keep the feed alive.
    fn snapshot(&self, snapshot: &LinkSnapshot) -> FeedDirective;
}

/// Polling link feed over the list-links endpoint.
pub struct LinkFeed {
    api: Arc<dyn ShortenerApi>,
    clock: Arc<dyn Clock>,
    sleeper: Arc<dyn Sleeper>,
}

impl LinkFeed {
    /// Build a feed over the API port, a clock, and a sleeper.
    pub fn new(api: Arc<dyn ShortenerApi>, clock: Arc<dyn Clock>, sleeper: Arc<dyn Sleeper>) -> Self {
        Self {
            api,
            clock,
            sleeper,
        }
    }

    /// One foreground fetch.
    ///
    /// # Errors
    ///
    /// Propagates the [`ClassifiedError`] so the caller can surface it
    /// inline; background refreshes never take this path.
    pub async fn fetch(&self) -> Result<LinkSnapshot, ClassifiedError> {
        let links = self.api.list_links().await?;
        Ok(self.snapshot_of(links))
    }

    /// Drive the poll loop until the observer stops it or the future is
    /// dropped.
    ///
    /// The first fetch is foreground and propagates failure. Every
    /// subsequent refresh is best-effort: on failure the previous link list
    /// is kept and only the derived states move with the clock.
    ///
    /// # Errors
    ///
    /// Fails only when the initial foreground fetch does.
    pub async fn run(&self, observer: &dyn FeedObserver) -> Result<(), ClassifiedError> {
        let mut links = self.api.list_links().await?;
        loop {
            let snapshot = self.snapshot_of(links.clone());
            if observer.snapshot(&snapshot) == FeedDirective::Stop {
                return Ok(());
            }
            self.sleeper.sleep(REFRESH_INTERVAL).await;
            match self.api.list_links().await {
                Ok(fresh) => links = fresh,
                Err(error) => {
                    debug!(error = %error, "background refresh failed; keeping last snapshot");
                }
            }
        }
    }

    fn snapshot_of(&self, links: Vec<ShortLink>) -> LinkSnapshot {
        let now = self.clock.utc();
        let statuses = links.iter().map(|link| link.status_at(now)).collect();
        LinkSnapshot { links, statuses }
    }
}

#[cfg(test)]
#[path = "feed_tests.rs"]
mod tests;
