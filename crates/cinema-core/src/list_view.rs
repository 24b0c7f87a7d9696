use cinema_client::CatalogApi;
use cinema_config::BrowseOptions;
use cinema_models::{Collection, FilterState, Flag, Title};
use serde::Serialize;
use tracing::{debug, error, warn};

/// Where a list view is in its fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    /// Nothing requested yet
    Idle,
    Loading,
    Loaded,
    /// The last fetch failed; the visible set is empty
    Failed,
}

/// State of the Prev/Next controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageControls {
    pub page: u32,
    pub prev_enabled: bool,
    /// The client never knows the last page, so this is always true
    pub next_enabled: bool,
}

/// A paged, filterable list of titles backed by one collection endpoint.
///
/// Every fetch replaces the visible set wholesale. Toggle operations never
/// patch local rows: they send the mutation and then reload, so the flags on
/// screen are always the ones the server last reported.
pub struct ListView<A> {
    api: A,
    collection: Collection,
    filters: FilterState,
    titles: Vec<Title>,
    state: LoadState,
    reset_page_on_filter_change: bool,
}

impl<A: CatalogApi> ListView<A> {
    pub fn new(api: A, collection: Collection) -> Self {
        Self {
            api,
            collection,
            filters: FilterState::new(),
            titles: Vec::new(),
            state: LoadState::Idle,
            reset_page_on_filter_change: true,
        }
    }

    pub fn with_options(mut self, options: &BrowseOptions) -> Self {
        self.reset_page_on_filter_change = options.reset_page_on_filter_change;
        self
    }

    pub fn with_filters(mut self, filters: FilterState) -> Self {
        self.filters = filters;
        self
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Visible rows. Empty while loading for the first time and after a failure.
    pub fn titles(&self) -> &[Title] {
        &self.titles
    }

    pub fn find(&self, id: &str) -> Option<&Title> {
        self.titles.iter().find(|t| t.id == id)
    }

    pub fn controls(&self) -> PageControls {
        PageControls {
            page: self.filters.page(),
            prev_enabled: !self.filters.is_first_page(),
            next_enabled: true,
        }
    }

    /// Text shown instead of the grid, if any.
    pub fn status_message(&self) -> Option<&'static str> {
        match self.state {
            LoadState::Idle | LoadState::Loading => Some(match self.collection {
                Collection::Titles => "Loading movies...",
                Collection::Favorites => "Loading favorites...",
                Collection::WatchLater => "Loading watch later...",
            }),
            LoadState::Failed => Some(self.empty_message()),
            LoadState::Loaded if self.titles.is_empty() => Some(self.empty_message()),
            LoadState::Loaded => None,
        }
    }

    fn empty_message(&self) -> &'static str {
        match self.collection {
            Collection::Titles => "No movies found.",
            Collection::Favorites => "No favorites found.",
            Collection::WatchLater => "No movies in Watch Later.",
        }
    }

    /// Fetch the current page with the current filters.
    ///
    /// Failures are logged and leave the view empty in the `Failed` state.
    /// There is no retry.
    pub async fn load(&mut self) {
        self.state = LoadState::Loading;
        debug!(collection = ?self.collection, page = self.filters.page(), "Loading list");

        match self.api.list(self.collection, &self.filters).await {
            Ok(titles) => {
                self.titles = titles;
                self.state = LoadState::Loaded;
            }
            Err(e) => {
                error!(collection = ?self.collection, error = %e, "Failed to fetch movies");
                self.titles.clear();
                self.state = LoadState::Failed;
            }
        }
    }

    /// Add to favorites when `favorited` is false, remove otherwise, then reload.
    pub async fn toggle_favorite(&mut self, id: &str, favorited: bool) {
        self.toggle(Flag::Favorite, id, favorited).await;
    }

    /// Add to watch later when `watch_later` is false, remove otherwise, then reload.
    pub async fn toggle_watch_later(&mut self, id: &str, watch_later: bool) {
        self.toggle(Flag::WatchLater, id, watch_later).await;
    }

    async fn toggle(&mut self, flag: Flag, id: &str, current: bool) {
        if let Err(e) = self.api.set_flag(flag, id, !current).await {
            warn!(flag = ?flag, id = %id, error = %e, "Failed to toggle {}", flag.label());
        }
        self.load().await;
    }

    pub async fn set_search(&mut self, search: impl Into<String>) {
        if self.filters.set_search(search) {
            self.filters_changed().await;
        }
    }

    pub async fn set_min_year(&mut self, year: Option<u32>) {
        if self.filters.set_min_year(year) {
            self.filters_changed().await;
        }
    }

    pub async fn set_max_year(&mut self, year: Option<u32>) {
        if self.filters.set_max_year(year) {
            self.filters_changed().await;
        }
    }

    pub async fn toggle_genre(&mut self, genre: &str) {
        if self.filters.toggle_genre(genre) {
            self.filters_changed().await;
        }
    }

    async fn filters_changed(&mut self) {
        // Personal lists ignore filters, so there is nothing new to fetch
        if !self.collection.supports_filters() {
            return;
        }
        if self.reset_page_on_filter_change {
            self.filters.reset_page();
        }
        self.load().await;
    }

    pub async fn next_page(&mut self) {
        self.filters.next_page();
        self.load().await;
    }

    /// No-op on the first page.
    pub async fn prev_page(&mut self) {
        if self.filters.prev_page() {
            self.load().await;
        }
    }
}
