pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{ApiConfig, BrowseOptions, Config, default_genre_options};
pub use credentials::CredentialStore;
pub use paths::{PathManager, container_base_path};
