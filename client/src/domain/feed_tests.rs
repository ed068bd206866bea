//! Regression coverage for feed polling and error-swallowing policy.

use std::sync::Mutex;

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockShortenerApi, MockSleeper};

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn link(id: &str, expiry: DateTime<Utc>) -> ShortLink {
    ShortLink {
        id: id.to_owned(),
        user_id: "u1".to_owned(),
        long: "https://example.com".to_owned(),
        short: "Ab3xY9Z".to_owned(),
        clicks: 3,
        created_at: None,
        expiry,
    }
}

/// Observer that records snapshots and stops after a fixed count.
struct RecordingObserver {
    seen: Mutex<Vec<LinkSnapshot>>,
    stop_after: usize,
}

impl RecordingObserver {
    fn new(stop_after: usize) -> Self {
        Self {
            seen: Mutex::new(Vec::new()),
            stop_after,
        }
    }

    fn snapshots(&self) -> Vec<LinkSnapshot> {
        self.seen
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl FeedObserver for RecordingObserver {
    fn snapshot(&self, snapshot: &LinkSnapshot) -> FeedDirective {
        let mut seen = self
            .seen
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        seen.push(snapshot.clone());
        if seen.len() >= self.stop_after {
            FeedDirective::Stop
        } else {
            FeedDirective::Continue
        }
    }
}

fn immediate_sleeper(times: usize) -> MockSleeper {
    let mut sleeper = MockSleeper::new();
    sleeper
        .expect_sleep()
        .withf(|duration| *duration == REFRESH_INTERVAL)
        .times(times)
        .returning(|_| ());
    sleeper
}

#[rstest]
#[tokio::test]
async fn fetch_derives_statuses_against_the_clock(now: DateTime<Utc>) {
    let mut api = MockShortenerApi::new();
    let fresh = link("l1", now + TimeDelta::days(30));
    let stale = link("l2", now - TimeDelta::days(1));
    api.expect_list_links()
        .times(1)
        .returning(move || Ok(vec![fresh.clone(), stale.clone()]));
    let feed = LinkFeed::new(
        Arc::new(api),
        Arc::new(FixtureClock { utc_now: now }),
        Arc::new(MockSleeper::new()),
    );

    let snapshot = feed.fetch().await.expect("fetch should succeed");

    assert_eq!(snapshot.statuses, vec![LinkStatus::Active, LinkStatus::Expired]);
}

#[rstest]
#[tokio::test]
async fn foreground_fetch_surfaces_classified_errors(now: DateTime<Utc>) {
    let mut api = MockShortenerApi::new();
    api.expect_list_links()
        .times(1)
        .returning(|| Err(ClassifiedError::server_unavailable(502, "bad gateway")));
    let feed = LinkFeed::new(
        Arc::new(api),
        Arc::new(FixtureClock { utc_now: now }),
        Arc::new(MockSleeper::new()),
    );

    let error = feed.fetch().await.expect_err("fetch should fail");
    assert_eq!(error.status(), 502);
}

#[rstest]
#[tokio::test]
async fn background_refresh_failure_keeps_the_last_snapshot(now: DateTime<Utc>) {
    let mut api = MockShortenerApi::new();
    let served = link("l1", now + TimeDelta::days(30));
    let mut calls = 0_u32;
    api.expect_list_links().times(2).returning(move || {
        calls += 1;
        if calls == 1 {
            Ok(vec![served.clone()])
        } else {
            Err(ClassifiedError::network("connection refused"))
        }
    });
    let feed = LinkFeed::new(
        Arc::new(api),
        Arc::new(FixtureClock { utc_now: now }),
        Arc::new(immediate_sleeper(1)),
    );
    let observer = RecordingObserver::new(2);

    feed.run(&observer).await.expect("run should end cleanly");

    let snapshots = observer.snapshots();
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0], snapshots[1], "failed refresh must not disturb the view");
    assert_eq!(snapshots[1].links.len(), 1);
}

#[rstest]
#[tokio::test]
async fn background_refresh_replaces_links_on_success(now: DateTime<Utc>) {
    let mut api = MockShortenerApi::new();
    let first = link("l1", now + TimeDelta::days(30));
    let second = link("l2", now + TimeDelta::days(2));
    let mut calls = 0_u32;
    api.expect_list_links().times(2).returning(move || {
        calls += 1;
        if calls == 1 {
            Ok(vec![first.clone()])
        } else {
            Ok(vec![second.clone(), first.clone()])
        }
    });
    let feed = LinkFeed::new(
        Arc::new(api),
        Arc::new(FixtureClock { utc_now: now }),
        Arc::new(immediate_sleeper(1)),
    );
    let observer = RecordingObserver::new(2);

    feed.run(&observer).await.expect("run should end cleanly");

    let snapshots = observer.snapshots();
    assert_eq!(snapshots[1].links.len(), 2);
    assert_eq!(snapshots[1].links[0].id, "l2");
    assert_eq!(
        snapshots[1].statuses,
        vec![LinkStatus::ExpiringSoon, LinkStatus::Active]
    );
}
