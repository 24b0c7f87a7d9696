use chrono::{DateTime, Local, TimeZone, Utc};
use cinema_client::CatalogApi;
use cinema_models::Activity;
use serde::Serialize;
use std::fmt::Display;
use tracing::error;

/// Format used for activity timestamps, e.g. "Jan 15, 2024, 10:00 AM".
pub const TIMESTAMP_FORMAT: &str = "%b %-d, %Y, %-I:%M %p";

pub const EMPTY_MESSAGE: &str = "No recent activity";
pub const FAILED_MESSAGE: &str = "Failed to load activity feed";
pub const LOADING_MESSAGE: &str = "Loading recent activity...";

/// Render a UTC instant in the given time zone.
pub fn format_in<Tz>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string()
}

/// Render a UTC instant in the viewer's local time zone.
pub fn format_local_time(timestamp: &DateTime<Utc>) -> String {
    format_in(timestamp, &Local)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "activities", rename_all = "snake_case")]
pub enum FeedState {
    Loading,
    Loaded(Vec<Activity>),
    /// The server answered with no activity
    Empty,
    Failed,
}

/// A feed row ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedEntry {
    pub id: String,
    pub label: &'static str,
    pub title: String,
    pub when: String,
}

/// Read-only recent-activity feed.
///
/// Fetched once when mounted; Empty and Failed are terminal.
pub struct ActivityFeed<A> {
    api: A,
    state: FeedState,
    mounted: bool,
}

impl<A: CatalogApi> ActivityFeed<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: FeedState::Loading,
            mounted: false,
        }
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    /// Fetch the feed. Only the first call does anything.
    pub async fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;

        self.state = match self.api.activities().await {
            Ok(activities) if activities.is_empty() => FeedState::Empty,
            Ok(activities) => FeedState::Loaded(activities),
            Err(e) => {
                error!(error = %e, "Failed to load activities");
                FeedState::Failed
            }
        };
    }

    /// Text shown instead of entries, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self.state {
            FeedState::Loading => Some(LOADING_MESSAGE),
            FeedState::Empty => Some(EMPTY_MESSAGE),
            FeedState::Failed => Some(FAILED_MESSAGE),
            FeedState::Loaded(_) => None,
        }
    }

    /// Entries in server order with timestamps rendered in `tz`.
    pub fn entries_in<Tz>(&self, tz: &Tz) -> Vec<FeedEntry>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match &self.state {
            FeedState::Loaded(activities) => activities
                .iter()
                .map(|a| FeedEntry {
                    id: a.id.clone(),
                    label: a.kind.label(),
                    title: a.title.clone(),
                    when: format_in(&a.timestamp, tz),
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn entries(&self) -> Vec<FeedEntry> {
        self.entries_in(&Local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeCatalog;
    use chrono::FixedOffset;
    use cinema_models::ActivityKind;

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc)
    }

    fn activity(id: &str, ts: &str, kind: ActivityKind, title: &str) -> Activity {
        Activity {
            id: id.to_string(),
            timestamp: at(ts),
            kind,
            title: title.to_string(),
        }
    }

    #[test]
    fn test_format_utc() {
        let ts = at("2024-01-15T10:00:00Z");
        assert_eq!(format_in(&ts, &Utc), "Jan 15, 2024, 10:00 AM");
    }

    #[test]
    fn test_format_shifts_to_offset() {
        let ts = at("2024-01-15T10:00:00Z");

        let new_york = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(format_in(&ts, &new_york), "Jan 15, 2024, 5:00 AM");

        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(format_in(&ts, &tokyo), "Jan 15, 2024, 7:00 PM");

        // Crosses midnight backwards
        let honolulu = FixedOffset::west_opt(10 * 3600).unwrap();
        assert_eq!(format_in(&ts, &honolulu), "Jan 15, 2024, 12:00 AM");
    }

    #[test]
    fn test_format_local_matches_local_conversion() {
        let ts = at("2024-01-15T10:00:00Z");
        let expected = ts.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string();
        assert_eq!(format_local_time(&ts), expected);
    }

    #[tokio::test]
    async fn test_empty_feed_is_terminal() {
        let fake = FakeCatalog::default();
        let mut feed = ActivityFeed::new(fake.clone());
        assert_eq!(feed.message(), Some(LOADING_MESSAGE));

        feed.mount().await;
        assert_eq!(feed.state(), &FeedState::Empty);
        assert_eq!(feed.message(), Some("No recent activity"));
        assert!(feed.entries().is_empty());
    }

    #[tokio::test]
    async fn test_failed_feed() {
        let fake = FakeCatalog::default();
        fake.fail_activities(true);
        let mut feed = ActivityFeed::new(fake);
        feed.mount().await;

        assert_eq!(feed.state(), &FeedState::Failed);
        assert_eq!(feed.message(), Some(FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_loaded_feed_keeps_server_order() {
        let fake = FakeCatalog::default();
        fake.set_activities(vec![
            activity("a1", "2024-01-14T08:00:00Z", ActivityKind::WatchLater, "Alien"),
            activity("a2", "2024-01-15T10:00:00Z", ActivityKind::Favorited, "Heat"),
        ]);
        let mut feed = ActivityFeed::new(fake);
        feed.mount().await;

        let entries = feed.entries_in(&Utc);
        assert_eq!(feed.message(), None);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Alien");
        assert_eq!(entries[0].label, "Watch Later");
        assert_eq!(entries[1].label, "Favorited");
        assert_eq!(entries[1].when, "Jan 15, 2024, 10:00 AM");
    }

    #[tokio::test]
    async fn test_mount_fetches_once() {
        let fake = FakeCatalog::default();
        let mut feed = ActivityFeed::new(fake.clone());
        feed.mount().await;
        feed.mount().await;

        assert_eq!(fake.requests(), vec!["GET /api/activities".to_string()]);
    }
}
