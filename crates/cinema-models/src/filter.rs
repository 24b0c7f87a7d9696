use std::collections::BTreeSet;
use serde::{Deserialize, Serialize};
use crate::collection::Collection;

/// Filter and pagination state of one list view.
///
/// Lives as long as the view does and is never persisted. Absent fields mean
/// "no constraint", so an empty search or an empty genre set is left out of
/// the query entirely rather than sent as an empty value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    pub min_year: Option<u32>,
    pub max_year: Option<u32>,
    pub genres: BTreeSet<String>,
    page: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            min_year: None,
            max_year: None,
            genres: BTreeSet::new(),
            page: 1,
        }
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at the given page; zero is clamped to the first page.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn is_first_page(&self) -> bool {
        self.page <= 1
    }

    /// Advance one page. There is no known last page on the client.
    pub fn next_page(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    /// Go back one page; returns false when already on the first page.
    pub fn prev_page(&mut self) -> bool {
        if self.is_first_page() {
            return false;
        }
        self.page -= 1;
        true
    }

    pub fn reset_page(&mut self) {
        self.page = 1;
    }

    // Setters return whether anything changed, so callers only reload on a
    // real change.

    /// Surrounding whitespace never reaches the query, so it is not a change.
    pub fn set_search(&mut self, search: impl Into<String>) -> bool {
        let search = search.into();
        let changed = self.search.trim() != search.trim();
        self.search = search;
        changed
    }

    pub fn set_min_year(&mut self, year: Option<u32>) -> bool {
        if self.min_year == year {
            return false;
        }
        self.min_year = year;
        true
    }

    pub fn set_max_year(&mut self, year: Option<u32>) -> bool {
        if self.max_year == year {
            return false;
        }
        self.max_year = year;
        true
    }

    /// Add the genre if absent, remove it if present. Always a change.
    pub fn toggle_genre(&mut self, genre: &str) -> bool {
        if !self.genres.remove(genre) {
            self.genres.insert(genre.to_string());
        }
        true
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.contains(genre)
    }

    /// True when no search, year or genre constraint is set.
    pub fn is_unfiltered(&self) -> bool {
        self.search.trim().is_empty()
            && self.min_year.is_none()
            && self.max_year.is_none()
            && self.genres.is_empty()
    }

    /// Query parameters for a list request, in a stable order.
    ///
    /// `page` is always present. Filter fields are included only when set,
    /// and only for collections that accept them.
    pub fn query_pairs(&self, collection: Collection) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string())];

        if !collection.supports_filters() {
            return pairs;
        }

        let search = self.search.trim();
        if !search.is_empty() {
            pairs.push(("search", search.to_string()));
        }
        if let Some(min_year) = self.min_year {
            pairs.push(("minYear", min_year.to_string()));
        }
        if let Some(max_year) = self.max_year {
            pairs.push(("maxYear", max_year.to_string()));
        }
        if !self.genres.is_empty() {
            let joined = self.genres.iter().cloned().collect::<Vec<_>>().join(",");
            pairs.push(("genres", joined));
        }

        pairs
    }

    /// Percent-encoded query string without the leading `?`.
    pub fn query_string(&self, collection: Collection) -> String {
        self.query_pairs(collection)
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(&v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(filters: &FilterState, collection: Collection) -> Vec<&'static str> {
        filters.query_pairs(collection).into_iter().map(|(k, _)| k).collect()
    }

    #[test]
    fn test_default_query_is_page_only() {
        let filters = FilterState::new();
        assert_eq!(filters.query_string(Collection::Titles), "page=1");
    }

    #[test]
    fn test_query_omits_empty_fields_for_all_combinations() {
        // Every subset of the four filter fields
        for mask in 0u8..16 {
            let mut filters = FilterState::new();
            if mask & 1 != 0 {
                filters.set_search("matrix");
            }
            if mask & 2 != 0 {
                filters.set_min_year(Some(1990));
            }
            if mask & 4 != 0 {
                filters.set_max_year(Some(2005));
            }
            if mask & 8 != 0 {
                filters.toggle_genre("Action");
            }

            let keys = keys(&filters, Collection::Titles);
            assert_eq!(keys.contains(&"search"), mask & 1 != 0, "mask {}", mask);
            assert_eq!(keys.contains(&"minYear"), mask & 2 != 0, "mask {}", mask);
            assert_eq!(keys.contains(&"maxYear"), mask & 4 != 0, "mask {}", mask);
            assert_eq!(keys.contains(&"genres"), mask & 8 != 0, "mask {}", mask);
            assert!(keys.contains(&"page"));

            for (_, value) in filters.query_pairs(Collection::Titles) {
                assert!(!value.is_empty(), "mask {} produced an empty value", mask);
            }
        }
    }

    #[test]
    fn test_blank_search_is_omitted() {
        let mut filters = FilterState::new();
        filters.set_search("   ");
        assert_eq!(keys(&filters, Collection::Titles), vec!["page"]);
    }

    #[test]
    fn test_full_query_string() {
        let mut filters = FilterState::new().with_page(3);
        filters.set_search("star wars");
        filters.set_min_year(Some(1977));
        filters.set_max_year(Some(1983));
        filters.toggle_genre("Sci-Fi");
        filters.toggle_genre("Action");

        assert_eq!(
            filters.query_string(Collection::Titles),
            "page=3&search=star%20wars&minYear=1977&maxYear=1983&genres=Action%2CSci-Fi"
        );
    }

    #[test]
    fn test_personal_lists_send_page_only() {
        let mut filters = FilterState::new().with_page(2);
        filters.set_search("heat");
        filters.toggle_genre("Drama");

        assert_eq!(filters.query_string(Collection::Favorites), "page=2");
        assert_eq!(filters.query_string(Collection::WatchLater), "page=2");
    }

    #[test]
    fn test_toggle_genre_twice_removes_it() {
        let mut filters = FilterState::new();
        filters.toggle_genre("Horror");
        assert!(filters.has_genre("Horror"));
        filters.toggle_genre("Horror");
        assert!(!filters.has_genre("Horror"));
        assert!(filters.is_unfiltered());
    }

    #[test]
    fn test_setters_report_changes() {
        let mut filters = FilterState::new();
        assert!(filters.set_search("alien"));
        assert!(!filters.set_search("alien"));
        assert!(filters.set_min_year(Some(2000)));
        assert!(!filters.set_min_year(Some(2000)));
        assert!(!filters.set_max_year(None));
    }

    #[test]
    fn test_whitespace_only_search_edit_is_not_a_change() {
        let mut filters = FilterState::new().with_page(3);
        assert!(!filters.set_search("  "));
        assert!(filters.set_search("alien"));
        assert!(!filters.set_search("alien "));
        assert!(!filters.set_search(" alien"));
        assert_eq!(filters.query_string(Collection::Titles), "page=3&search=alien");
        assert!(filters.set_search(""));
    }

    #[test]
    fn test_page_bounds() {
        let mut filters = FilterState::new().with_page(0);
        assert_eq!(filters.page(), 1);
        assert!(filters.is_first_page());
        assert!(!filters.prev_page());
        assert_eq!(filters.page(), 1);

        filters.next_page();
        filters.next_page();
        assert_eq!(filters.page(), 3);
        assert!(filters.prev_page());
        assert_eq!(filters.page(), 2);

        filters.reset_page();
        assert_eq!(filters.page(), 1);
    }
}
