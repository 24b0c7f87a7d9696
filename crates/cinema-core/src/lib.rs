pub mod activity_feed;
pub mod auth_gate;
pub mod list_view;

#[cfg(test)]
mod fake;

pub use activity_feed::{ActivityFeed, FeedEntry, FeedState, format_local_time};
pub use auth_gate::{AuthGate, GateDecision};
pub use list_view::{ListView, LoadState, PageControls};
