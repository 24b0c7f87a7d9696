use serde::{Deserialize, Serialize};
use crate::title::ApiMovie;

/// A list endpoint backing one of the list views.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Collection {
    /// The full catalog (dashboard)
    Titles,
    Favorites,
    WatchLater,
}

impl Collection {
    /// Path of the list endpoint, relative to the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Collection::Titles => "/api/titles",
            Collection::Favorites => "/api/favorites",
            Collection::WatchLater => "/api/watch-later",
        }
    }

    /// Key of the array inside the JSON response object.
    pub fn envelope_key(&self) -> &'static str {
        match self {
            Collection::Titles => "titles",
            Collection::Favorites => "favorites",
            Collection::WatchLater => "watchLater",
        }
    }

    /// Only the catalog accepts search/year/genre filters; the personal
    /// lists are paged and nothing else.
    pub fn supports_filters(&self) -> bool {
        matches!(self, Collection::Titles)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Collection::Titles => "Movie Explorer",
            Collection::Favorites => "Favorites",
            Collection::WatchLater => "Watch Later",
        }
    }

    /// Image used when a record carries none.
    pub fn fallback_image(&self, id: &str) -> String {
        match self {
            Collection::Titles => format!("/images/{}.webp", id),
            Collection::Favorites | Collection::WatchLater => "/placeholder.jpg".to_string(),
        }
    }

    /// Pull the movie array out of a response body.
    ///
    /// An object without the envelope key is an empty page. A body that is
    /// not a JSON object, or whose envelope is not a list of movies, is an
    /// error.
    pub fn parse_envelope(&self, body: &str) -> serde_json::Result<Vec<ApiMovie>> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        let Some(envelope) = value.as_object() else {
            return Err(serde::de::Error::custom(format!(
                "expected a {{\"{}\": [...]}} object",
                self.envelope_key()
            )));
        };
        match envelope.get(self.envelope_key()) {
            None | Some(serde_json::Value::Null) => Ok(Vec::new()),
            Some(items) => serde_json::from_value(items.clone()),
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A per-title boolean the user can switch on and off.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Flag {
    Favorite,
    WatchLater,
}

impl Flag {
    /// Path of the resource for one title; POST sets the flag, DELETE clears it.
    pub fn resource_path(&self, id: &str) -> String {
        let encoded = urlencoding::encode(id);
        match self {
            Flag::Favorite => format!("/api/favorites/{}", encoded),
            Flag::WatchLater => format!("/api/watch-later/{}", encoded),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Flag::Favorite => "favorite",
            Flag::WatchLater => "watch later",
        }
    }
}
