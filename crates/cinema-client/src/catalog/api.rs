use crate::error::{ClientError, Result};
use cinema_models::{ActivitiesEnvelope, Activity, Collection, FilterState, Flag, Title};
use reqwest::{Client, Response};
use tracing::debug;

/// Return the body of a successful response, or a `Status` error carrying
/// whatever the server said.
pub(crate) async fn read_body(response: Response) -> Result<String> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.text().await?)
}

/// Fetch one page of titles from a collection.
pub async fn list_page(
    client: &Client,
    base_url: &str,
    collection: Collection,
    filters: &FilterState,
) -> Result<Vec<Title>> {
    let url = format!(
        "{}{}?{}",
        base_url,
        collection.path(),
        filters.query_string(collection)
    );
    debug!(url = %url, collection = ?collection, "Fetching list page");

    let response = client.get(&url).send().await?;
    let body = read_body(response).await?;
    let movies = collection.parse_envelope(&body)?;

    debug!(count = movies.len(), collection = ?collection, "Fetched list page");
    Ok(movies
        .into_iter()
        .map(|movie| movie.into_title(collection))
        .collect())
}

/// POST to set a flag, DELETE to clear it.
pub async fn set_flag(client: &Client, base_url: &str, flag: Flag, id: &str, on: bool) -> Result<()> {
    let url = format!("{}{}", base_url, flag.resource_path(id));
    debug!(url = %url, flag = ?flag, on, "Updating flag");

    let request = if on { client.post(&url) } else { client.delete(&url) };
    let response = request.send().await?;
    read_body(response).await?;
    Ok(())
}

/// Fetch the recent-activity log.
pub async fn get_activities(client: &Client, base_url: &str) -> Result<Vec<Activity>> {
    let url = format!("{}/api/activities", base_url);
    debug!(url = %url, "Fetching activities");

    let response = client.get(&url).send().await?;
    let body = read_body(response).await?;
    let envelope: ActivitiesEnvelope = serde_json::from_str(&body)?;
    Ok(envelope.into_activities())
}
