pub mod activity;
pub mod collection;
pub mod filter;
pub mod session;
pub mod title;

pub use activity::{Activity, ActivityKind, ActivitiesEnvelope};
pub use collection::{Collection, Flag};
pub use filter::FilterState;
pub use session::Session;
pub use title::{ApiMovie, GenreField, Title};
