pub mod catalog;
pub mod error;
pub mod traits;

pub use catalog::CatalogClient;
pub use error::{ClientError, Result};
pub use traits::{CatalogApi, SessionProvider};
