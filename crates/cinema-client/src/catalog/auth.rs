use crate::error::{ClientError, Result};
use cinema_models::Session;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, COOKIE, USER_AGENT};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Build the HTTP client used for every catalog request.
///
/// The session token, when present, travels as a cookie on every request,
/// the same way a browser would send it.
pub fn create_http_client(
    session_cookie: &str,
    token: Option<&str>,
    timeout: Option<Duration>,
) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("cinema-guru/", env!("CARGO_PKG_VERSION"))),
    );

    if let Some(token) = token {
        let cookie = format!("{}={}", session_cookie, token);
        let mut value = HeaderValue::from_str(&cookie).map_err(|_| ClientError::InvalidToken)?;
        value.set_sensitive(true);
        headers.insert(COOKIE, value);
    }

    let mut builder = Client::builder().default_headers(headers);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    Ok(builder.build()?)
}

/// Ask the auth provider who is signed in.
pub async fn fetch_session(client: &Client, base_url: &str) -> Result<Option<Session>> {
    let url = format!("{}/api/auth/session", base_url);
    debug!(url = %url, "Fetching session");

    let response = client.get(&url).send().await?;
    let body = super::api::read_body(response).await?;

    Ok(Session::from_body(&body)?)
}

/// End the session on the provider side.
pub async fn sign_out(client: &Client, base_url: &str) -> Result<()> {
    let url = format!("{}/api/auth/signout", base_url);
    debug!(url = %url, "Signing out");

    let response = client.post(&url).send().await?;
    super::api::read_body(response).await?;
    Ok(())
}
