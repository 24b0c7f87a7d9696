use crate::output::Output;
use cinema_client::CatalogClient;
use cinema_config::{Config, CredentialStore, PathManager};
use cinema_core::{AuthGate, GateDecision};
use cinema_models::Session;
use color_eyre::Result;

/// Config and credentials every command starts from.
pub struct AppContext {
    pub config: Config,
    pub credentials: CredentialStore,
}

impl AppContext {
    pub fn load() -> Result<Self> {
        let paths = PathManager::default();

        let config_file = paths.config_file();
        let config = Config::load_or_default(&config_file)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
        config
            .validate()
            .map_err(|e| color_eyre::eyre::eyre!("Invalid configuration in {}: {}", config_file.display(), e))?;

        let credentials_file = paths.credentials_file();
        let mut credentials = CredentialStore::new(credentials_file.clone());
        credentials
            .load()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

        Ok(Self { config, credentials })
    }

    /// Client carrying the stored session token, if any.
    pub fn client(&self) -> Result<CatalogClient> {
        self.client_with_token(self.credentials.get_session_token().map(|t| t.as_str()))
    }

    pub fn client_with_token(&self, token: Option<&str>) -> Result<CatalogClient> {
        CatalogClient::from_config(&self.config, token)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to create API client: {}", e))
    }

    pub fn gate(&self, client: CatalogClient) -> AuthGate<CatalogClient> {
        AuthGate::new(client, self.config.sign_in_url())
    }

    pub fn save_credentials(&self) -> Result<()> {
        self.credentials
            .save()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials: {}", e))
    }
}

/// Run the auth gate. On redirect, tell the user where to sign in and
/// return `None`; the caller renders nothing.
pub async fn require_session(ctx: &AppContext, client: &CatalogClient, output: &Output) -> Option<Session> {
    match ctx.gate(client.clone()).check().await {
        GateDecision::Render(session) => Some(session),
        GateDecision::Redirect { to } => {
            output.warn(format!("You are not signed in. Sign in at {}", to));
            output.println("Then store the session cookie with: cinema login");
            None
        }
    }
}
