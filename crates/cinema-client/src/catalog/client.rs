use crate::catalog::{api, auth};
use crate::error::{ClientError, Result};
use crate::traits::{CatalogApi, SessionProvider};
use async_trait::async_trait;
use cinema_config::Config;
use cinema_models::{Activity, Collection, FilterState, Flag, Session, Title};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// HTTP client for the Cinema Guru API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    client: Arc<Client>,
    base_url: String,
    has_token: bool,
}

impl CatalogClient {
    pub fn new(
        base_url: &str,
        session_cookie: &str,
        token: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidBaseUrl(base_url));
        }

        Ok(Self {
            client: Arc::new(auth::create_http_client(session_cookie, token, timeout)?),
            base_url,
            has_token: token.is_some(),
        })
    }

    pub fn from_config(config: &Config, token: Option<&str>) -> Result<Self> {
        let timeout = config.api.request_timeout_secs.map(Duration::from_secs);
        let client = Self::new(&config.api.base_url, &config.api.session_cookie, token, timeout)?;
        info!(base_url = %client.base_url, authenticated = client.has_token, "Catalog client ready");
        Ok(client)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether a session token is attached to requests.
    pub fn has_token(&self) -> bool {
        self.has_token
    }

    /// Turn a server-relative image path into an absolute URL.
    pub fn image_url(&self, image: &str) -> String {
        if image.starts_with("http://") || image.starts_with("https://") {
            image.to_string()
        } else {
            format!("{}/{}", self.base_url, image.trim_start_matches('/'))
        }
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn list(&self, collection: Collection, filters: &FilterState) -> Result<Vec<Title>> {
        api::list_page(&self.client, &self.base_url, collection, filters).await
    }

    async fn set_flag(&self, flag: Flag, id: &str, on: bool) -> Result<()> {
        api::set_flag(&self.client, &self.base_url, flag, id, on).await
    }

    async fn activities(&self) -> Result<Vec<Activity>> {
        api::get_activities(&self.client, &self.base_url).await
    }
}

#[async_trait]
impl SessionProvider for CatalogClient {
    async fn session(&self) -> Result<Option<Session>> {
        if !self.has_token {
            return Ok(None);
        }
        auth::fetch_session(&self.client, &self.base_url).await
    }

    async fn sign_out(&self) -> Result<()> {
        auth::sign_out(&self.client, &self.base_url).await
    }
}
