use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An authenticated session as reported by the auth provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Session {
    pub email: Option<String>,
    pub name: Option<String>,
    pub expires: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct SessionBody {
    user: Option<SessionUser>,
    #[serde(default)]
    expires: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct SessionUser {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

impl Session {
    /// Parse the body of the session endpoint.
    ///
    /// The provider answers `{}` or `null` when nobody is signed in; both map
    /// to `None`.
    pub fn from_body(body: &str) -> serde_json::Result<Option<Session>> {
        let body: Option<SessionBody> = serde_json::from_str(body)?;
        Ok(body.and_then(|b| {
            b.user.map(|user| Session {
                email: user.email,
                name: user.name,
                expires: b.expires,
            })
        }))
    }

    /// Name to greet the user with: email first, then display name.
    pub fn display_name(&self) -> &str {
        self.email
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("there")
    }
}
