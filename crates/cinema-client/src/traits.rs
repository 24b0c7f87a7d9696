use async_trait::async_trait;
use cinema_models::{Activity, Collection, FilterState, Flag, Session, Title};
use crate::error::Result;

/// Read and mutate the movie catalog.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetch one page of a collection. Filters the collection does not
    /// support are ignored.
    async fn list(&self, collection: Collection, filters: &FilterState) -> Result<Vec<Title>>;

    /// Set (`on = true`, POST) or clear (`on = false`, DELETE) a flag on a title.
    async fn set_flag(&self, flag: Flag, id: &str, on: bool) -> Result<()>;

    /// Fetch the recent-activity log, in server order.
    async fn activities(&self) -> Result<Vec<Activity>>;
}

/// The external auth provider, seen from the client.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Current session, or `None` when nobody is signed in.
    async fn session(&self) -> Result<Option<Session>>;

    async fn sign_out(&self) -> Result<()>;
}
