//! In-memory catalog used by the view tests.

use async_trait::async_trait;
use cinema_client::{CatalogApi, ClientError, Result, SessionProvider};
use cinema_models::{Activity, Collection, FilterState, Flag, Session, Title};
use std::sync::{Arc, Mutex};

pub const PAGE_SIZE: usize = 2;

#[derive(Default)]
struct FakeState {
    titles: Vec<Title>,
    activities: Vec<Activity>,
    session: Option<Session>,
    fail_lists: bool,
    fail_mutations: bool,
    fail_activities: bool,
    fail_session: bool,
    requests: Vec<String>,
}

#[derive(Clone, Default)]
pub struct FakeCatalog {
    state: Arc<Mutex<FakeState>>,
}

pub fn title(id: &str, name: &str, year: u32, genre: &str) -> Title {
    Title {
        id: id.to_string(),
        title: name.to_string(),
        description: format!("About {}", name),
        year: Some(year),
        genres: vec![genre.to_string()],
        image: format!("/images/{}.webp", id),
        favorited: false,
        watch_later: false,
    }
}

fn server_error() -> ClientError {
    ClientError::Status {
        status: 500,
        body: "boom".to_string(),
    }
}

impl FakeCatalog {
    pub fn with_titles(titles: Vec<Title>) -> Self {
        let fake = Self::default();
        fake.state.lock().unwrap().titles = titles;
        fake
    }

    pub fn set_activities(&self, activities: Vec<Activity>) {
        self.state.lock().unwrap().activities = activities;
    }

    pub fn set_session(&self, session: Option<Session>) {
        self.state.lock().unwrap().session = session;
    }

    pub fn fail_lists(&self, fail: bool) {
        self.state.lock().unwrap().fail_lists = fail;
    }

    pub fn fail_mutations(&self, fail: bool) {
        self.state.lock().unwrap().fail_mutations = fail;
    }

    pub fn fail_activities(&self, fail: bool) {
        self.state.lock().unwrap().fail_activities = fail;
    }

    pub fn fail_session(&self, fail: bool) {
        self.state.lock().unwrap().fail_session = fail;
    }

    /// Requests seen so far, as `METHOD path?query`.
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }
}

fn matches(title: &Title, collection: Collection, filters: &FilterState) -> bool {
    match collection {
        Collection::Favorites => return title.favorited,
        Collection::WatchLater => return title.watch_later,
        Collection::Titles => {}
    }

    let search = filters.search.trim().to_lowercase();
    if !search.is_empty() && !title.title.to_lowercase().contains(&search) {
        return false;
    }
    let year = title.year.unwrap_or(0);
    if filters.min_year.map_or(false, |min| year < min) {
        return false;
    }
    if filters.max_year.map_or(false, |max| year > max) {
        return false;
    }
    filters.genres.is_empty() || title.genres.iter().any(|g| filters.genres.contains(g))
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn list(&self, collection: Collection, filters: &FilterState) -> Result<Vec<Title>> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(format!(
            "GET {}?{}",
            collection.path(),
            filters.query_string(collection)
        ));
        if state.fail_lists {
            return Err(server_error());
        }

        let skip = (filters.page() as usize - 1) * PAGE_SIZE;
        Ok(state
            .titles
            .iter()
            .filter(|t| matches(t, collection, filters))
            .skip(skip)
            .take(PAGE_SIZE)
            .cloned()
            .collect())
    }

    async fn set_flag(&self, flag: Flag, id: &str, on: bool) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let method = if on { "POST" } else { "DELETE" };
        state.requests.push(format!("{} {}", method, flag.resource_path(id)));
        if state.fail_mutations {
            return Err(server_error());
        }

        let title = state
            .titles
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ClientError::Status {
                status: 404,
                body: "not found".to_string(),
            })?;
        match flag {
            Flag::Favorite => title.favorited = on,
            Flag::WatchLater => title.watch_later = on,
        }
        Ok(())
    }

    async fn activities(&self) -> Result<Vec<Activity>> {
        let mut state = self.state.lock().unwrap();
        state.requests.push("GET /api/activities".to_string());
        if state.fail_activities {
            return Err(server_error());
        }
        Ok(state.activities.clone())
    }
}

#[async_trait]
impl SessionProvider for FakeCatalog {
    async fn session(&self) -> Result<Option<Session>> {
        let state = self.state.lock().unwrap();
        if state.fail_session {
            return Err(server_error());
        }
        Ok(state.session.clone())
    }

    async fn sign_out(&self) -> Result<()> {
        self.state.lock().unwrap().session = None;
        Ok(())
    }
}
