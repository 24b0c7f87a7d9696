use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

const SESSION_TOKEN: &str = "session_token";
const SESSION_EMAIL: &str = "session_email";
const SESSION_VERIFIED_AT: &str = "session_verified_at";

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

/// Key/value secrets kept next to the config file.
pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.credentials.remove(key);
    }

    pub fn get_session_token(&self) -> Option<&String> {
        self.get(SESSION_TOKEN).filter(|t| !t.is_empty())
    }

    pub fn set_session_token(&mut self, token: String) {
        self.set(SESSION_TOKEN.to_string(), token);
    }

    pub fn get_session_email(&self) -> Option<&String> {
        self.get(SESSION_EMAIL)
    }

    pub fn set_session_email(&mut self, email: String) {
        self.set(SESSION_EMAIL.to_string(), email);
    }

    pub fn get_session_verified_at(&self) -> Option<DateTime<Utc>> {
        self.get(SESSION_VERIFIED_AT)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn set_session_verified_at(&mut self, at: DateTime<Utc>) {
        self.set(SESSION_VERIFIED_AT.to_string(), at.to_rfc3339());
    }

    /// Forget everything about the current session.
    pub fn clear_session(&mut self) {
        self.remove(SESSION_TOKEN);
        self.remove(SESSION_EMAIL);
        self.remove(SESSION_VERIFIED_AT);
    }
}
