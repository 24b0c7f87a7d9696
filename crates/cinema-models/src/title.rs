use serde::{Deserialize, Serialize};
use crate::collection::Collection;

/// Movie record as the catalog API returns it.
///
/// Field names follow the server (`synopsis`, `released`, `genre`). Use
/// [`ApiMovie::into_title`] to get the client-side shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiMovie {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub released: Option<u32>,
    #[serde(default)]
    pub genre: Option<GenreField>,
    #[serde(default)]
    pub favorited: Option<bool>,
    #[serde(default)]
    pub watch_later: Option<bool>,
    #[serde(default)]
    pub image: Option<String>,
}

/// The server sends `genre` as a single string; some deployments send a list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum GenreField {
    One(String),
    Many(Vec<String>),
}

impl GenreField {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            GenreField::One(g) if g.is_empty() => Vec::new(),
            GenreField::One(g) => vec![g],
            GenreField::Many(gs) => gs.into_iter().filter(|g| !g.is_empty()).collect(),
        }
    }
}

/// Client-side copy of a catalog title.
///
/// This is a read-through snapshot: `favorited` and `watch_later` are whatever
/// the last successful fetch reported, never a locally patched value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Title {
    pub id: String,
    pub title: String,
    pub description: String,
    pub year: Option<u32>,
    pub genres: Vec<String>,
    pub image: String,
    pub favorited: bool,
    pub watch_later: bool,
}

impl Title {
    /// Genres joined for display, e.g. "Action, Drama".
    pub fn genre_label(&self) -> String {
        self.genres.join(", ")
    }
}

impl ApiMovie {
    /// Map a wire record into a [`Title`] for the given collection.
    ///
    /// Rows listed under favorites are favorited by definition, and rows
    /// listed under watch-later are on the watch-later list, whatever the
    /// record itself says.
    pub fn into_title(self, collection: Collection) -> Title {
        let image = match self.image {
            Some(image) if !image.trim().is_empty() => image,
            _ => collection.fallback_image(&self.id),
        };

        let favorited = collection == Collection::Favorites || self.favorited.unwrap_or(false);
        let watch_later = collection == Collection::WatchLater || self.watch_later.unwrap_or(false);

        Title {
            id: self.id,
            title: self.title,
            description: self.synopsis.unwrap_or_default(),
            year: self.released,
            genres: self.genre.map(GenreField::into_vec).unwrap_or_default(),
            image,
            favorited,
            watch_later,
        }
    }
}
