use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the user did to a title.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityKind {
    Favorited,
    WatchLater,
}

impl ActivityKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActivityKind::Favorited => "Favorited",
            ActivityKind::WatchLater => "Watch Later",
        }
    }
}

/// One entry of the recent-activity log. Read-only on the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "activity")]
    pub kind: ActivityKind,
    pub title: String,
}

/// Response body of the activities endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ActivitiesEnvelope {
    #[serde(default)]
    pub activities: Option<Vec<Activity>>,
}

impl ActivitiesEnvelope {
    pub fn into_activities(self) -> Vec<Activity> {
        self.activities.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_activities() {
        let body = r#"{
            "activities": [
                {"id": "a1", "timestamp": "2024-01-15T10:00:00Z", "activity": "FAVORITED", "title": "Heat"},
                {"id": "a2", "timestamp": "2024-01-14T08:30:00.000Z", "activity": "WATCH_LATER", "title": "Alien"}
            ]
        }"#;
        let envelope: ActivitiesEnvelope = serde_json::from_str(body).unwrap();
        let activities = envelope.into_activities();

        assert_eq!(activities.len(), 2);
        assert_eq!(activities[0].kind, ActivityKind::Favorited);
        assert_eq!(activities[0].timestamp, Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap());
        assert_eq!(activities[1].kind.label(), "Watch Later");
    }

    #[test]
    fn test_missing_activities_key() {
        let envelope: ActivitiesEnvelope = serde_json::from_str("{}").unwrap();
        assert!(envelope.into_activities().is_empty());
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let body = r#"{"activities":[{"id":"a","timestamp":"2024-01-15T10:00:00Z","activity":"RATED","title":"x"}]}"#;
        assert!(serde_json::from_str::<ActivitiesEnvelope>(body).is_err());
    }
}
