use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub browse: BrowseOptions,
}

/// Where the catalog API lives and how to talk to it.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Cookie the session token is sent in
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,
    /// Unset means requests wait indefinitely
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BrowseOptions {
    /// Go back to page 1 whenever search, year or genre filters change
    #[serde(default = "default_true")]
    pub reset_page_on_filter_change: bool,
    #[serde(default = "default_genre_options")]
    pub genre_options: Vec<String>,
    /// Show the recent-activity feed under the dashboard
    #[serde(default = "default_true")]
    pub show_activity: bool,
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_session_cookie() -> String {
    "authjs.session-token".to_string()
}

pub fn default_genre_options() -> Vec<String> {
    ["Action", "Drama", "Comedy", "Sci-Fi", "Romance", "Horror"]
        .iter()
        .map(|g| g.to_string())
        .collect()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            session_cookie: default_session_cookie(),
            request_timeout_secs: None,
        }
    }
}

impl Default for BrowseOptions {
    fn default() -> Self {
        Self {
            reset_page_on_filter_change: default_true(),
            genre_options: default_genre_options(),
            show_activity: default_true(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            return Err(anyhow::anyhow!("api.base_url is required and cannot be empty"));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(anyhow::anyhow!("api.base_url must start with http:// or https://: {}", base_url));
        }

        if self.api.session_cookie.trim().is_empty() {
            return Err(anyhow::anyhow!("api.session_cookie cannot be empty"));
        }

        if self.api.request_timeout_secs == Some(0) {
            return Err(anyhow::anyhow!("api.request_timeout_secs must be positive when set"));
        }

        if self.browse.genre_options.is_empty() {
            return Err(anyhow::anyhow!("browse.genre_options must list at least one genre"));
        }

        Ok(())
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api.base_url.trim().trim_end_matches('/')
    }

    /// Where a user without a session is sent to sign in.
    pub fn sign_in_url(&self) -> String {
        format!("{}/api/auth/signin", self.base_url())
    }
}
