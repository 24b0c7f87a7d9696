use cinema_client::SessionProvider;
use cinema_models::Session;
use tracing::{debug, warn};

/// Outcome of a session check.
#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    /// Signed in: render the protected content
    Render(Session),
    /// Not signed in: send the user to the sign-in flow
    Redirect { to: String },
}

/// Guards protected views behind a session check.
pub struct AuthGate<S> {
    provider: S,
    sign_in_url: String,
}

impl<S: SessionProvider> AuthGate<S> {
    pub fn new(provider: S, sign_in_url: impl Into<String>) -> Self {
        Self {
            provider,
            sign_in_url: sign_in_url.into(),
        }
    }

    pub fn sign_in_url(&self) -> &str {
        &self.sign_in_url
    }

    /// A missing session is a redirect, not an error. A lookup that fails is
    /// logged and handled the same way.
    pub async fn check(&self) -> GateDecision {
        match self.provider.session().await {
            Ok(Some(session)) => {
                debug!(user = %session.display_name(), "Session present");
                GateDecision::Render(session)
            }
            Ok(None) => self.redirect(),
            Err(e) => {
                warn!(error = %e, "Session lookup failed");
                self.redirect()
            }
        }
    }

    fn redirect(&self) -> GateDecision {
        GateDecision::Redirect {
            to: self.sign_in_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeCatalog;

    const SIGN_IN: &str = "http://localhost:3000/api/auth/signin";

    #[tokio::test]
    async fn test_session_present_renders() {
        let fake = FakeCatalog::default();
        let session = Session {
            email: Some("ada@example.com".to_string()),
            ..Session::default()
        };
        fake.set_session(Some(session.clone()));

        let gate = AuthGate::new(fake, SIGN_IN);
        assert_eq!(gate.check().await, GateDecision::Render(session));
    }

    #[tokio::test]
    async fn test_no_session_redirects() {
        let gate = AuthGate::new(FakeCatalog::default(), SIGN_IN);
        assert_eq!(
            gate.check().await,
            GateDecision::Redirect { to: SIGN_IN.to_string() }
        );
    }

    #[tokio::test]
    async fn test_lookup_failure_redirects() {
        let fake = FakeCatalog::default();
        fake.set_session(Some(Session::default()));
        fake.fail_session(true);

        let gate = AuthGate::new(fake, SIGN_IN);
        assert!(matches!(gate.check().await, GateDecision::Redirect { .. }));
    }
}
