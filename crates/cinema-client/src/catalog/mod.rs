pub mod api;
pub mod auth;
pub mod client;
mod tests;

pub use client::CatalogClient;
