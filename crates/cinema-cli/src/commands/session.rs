use super::context::AppContext;
use super::{loading, prompts};
use crate::output::{Document, Output};
use chrono::Utc;
use cinema_client::SessionProvider;
use cinema_core::GateDecision;
use cinema_models::Session;
use color_eyre::Result;

/// Store a session cookie after checking it against the auth provider.
pub async fn run_login(token: Option<String>, output: &Output) -> Result<()> {
    let mut ctx = AppContext::load()?;

    let token = match token {
        Some(token) => token,
        None => {
            if !output.is_human() {
                return Err(color_eyre::eyre::eyre!("Pass the session cookie with --token when using JSON output"));
            }
            output.println(format!("Sign in at {} in your browser,", ctx.config.sign_in_url()));
            output.println(format!(
                "then copy the value of the '{}' cookie.",
                ctx.config.api.session_cookie
            ));
            prompts::prompt_password("Session cookie")?
        }
    };
    let token = token.trim().to_string();
    if token.is_empty() {
        return Err(color_eyre::eyre::eyre!("Session cookie cannot be empty"));
    }

    let client = ctx.client_with_token(Some(&token))?;
    let gate = ctx.gate(client);

    match loading::while_loading(output, "Checking session...", gate.check()).await {
        GateDecision::Render(session) => {
            ctx.credentials.set_session_token(token);
            if let Some(email) = &session.email {
                ctx.credentials.set_session_email(email.clone());
            }
            ctx.credentials.set_session_verified_at(Utc::now());
            ctx.save_credentials()?;

            tracing::info!(user = %session.display_name(), "Session stored");
            output.success(format!("Signed in as {}", session.display_name()));
            Ok(())
        }
        GateDecision::Redirect { to } => Err(color_eyre::eyre::eyre!(
            "The session cookie was not accepted. Sign in again at {}",
            to
        )),
    }
}

pub async fn run_logout(output: &Output) -> Result<()> {
    let mut ctx = AppContext::load()?;

    if ctx.credentials.get_session_token().is_none() {
        output.info("Not signed in");
        return Ok(());
    }

    let client = ctx.client()?;
    // The local token is dropped even if the server cannot be reached
    if let Err(e) = loading::while_loading(output, "Signing out...", client.sign_out()).await {
        tracing::warn!(error = %e, "Server sign-out failed");
        output.warn(format!("Could not reach the server to sign out: {}", e));
    }

    ctx.credentials.clear_session();
    ctx.save_credentials()?;
    output.success("Signed out");
    Ok(())
}

pub async fn run_whoami(output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let client = ctx.client()?;
    let gate = ctx.gate(client);

    let decision = loading::while_loading(output, "Checking session...", gate.check()).await;

    if !output.is_human() {
        let doc = match &decision {
            GateDecision::Render(session) => Document::Session {
                signed_in: true,
                session: Some(session),
                verified_at: ctx.credentials.get_session_verified_at(),
                sign_in_url: None,
            },
            GateDecision::Redirect { to } => Document::Session {
                signed_in: false,
                session: None,
                verified_at: None,
                sign_in_url: Some(to),
            },
        };
        output.document(&doc);
        return Ok(());
    }

    match decision {
        GateDecision::Render(session) => print_session(&session, &ctx, output),
        GateDecision::Redirect { to } => {
            output.warn(format!("You are not signed in. Sign in at {}", to));
        }
    }
    Ok(())
}

fn print_session(session: &Session, ctx: &AppContext, output: &Output) {
    output.success(format!("Signed in as {}", session.display_name()));
    if let Some(name) = &session.name {
        output.println(format!("  Name:     {}", name));
    }
    if let Some(expires) = session.expires {
        output.println(format!("  Expires:  {}", cinema_core::format_local_time(&expires)));
    }
    if let Some(verified) = ctx.credentials.get_session_verified_at() {
        output.println(format!("  Verified: {}", cinema_core::format_local_time(&verified)));
    }
}
