use crate::output::{Document, Output};
use cinema_config::{Config, CredentialStore, PathManager};
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_config(cmd: crate::ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show { full } => show_config(full, output).await,
        crate::ConfigCommands::Set {
            base_url,
            session_cookie,
            timeout,
            reset_page_on_filter_change,
            show_activity,
            genres,
        } => {
            let update = ConfigUpdate {
                base_url,
                session_cookie,
                timeout,
                reset_page_on_filter_change,
                show_activity,
                genres,
            };
            set_config(update, output).await
        }
    }
}

/// Values given to `config set`; `None` leaves a field alone.
#[derive(Debug, Default)]
struct ConfigUpdate {
    base_url: Option<String>,
    session_cookie: Option<String>,
    /// Zero removes the timeout
    timeout: Option<u64>,
    reset_page_on_filter_change: Option<bool>,
    show_activity: Option<bool>,
    genres: Option<Vec<String>>,
}

impl ConfigUpdate {
    fn is_empty(&self) -> bool {
        self.base_url.is_none()
            && self.session_cookie.is_none()
            && self.timeout.is_none()
            && self.reset_page_on_filter_change.is_none()
            && self.show_activity.is_none()
            && self.genres.is_none()
    }

    /// Apply to `config` and return the names of the fields that were set.
    fn apply(self, config: &mut Config) -> Vec<&'static str> {
        let mut changed = Vec::new();

        if let Some(base_url) = self.base_url {
            config.api.base_url = base_url.trim().to_string();
            changed.push("api.base_url");
        }
        if let Some(cookie) = self.session_cookie {
            config.api.session_cookie = cookie.trim().to_string();
            changed.push("api.session_cookie");
        }
        if let Some(timeout) = self.timeout {
            config.api.request_timeout_secs = if timeout == 0 { None } else { Some(timeout) };
            changed.push("api.request_timeout_secs");
        }
        if let Some(reset) = self.reset_page_on_filter_change {
            config.browse.reset_page_on_filter_change = reset;
            changed.push("browse.reset_page_on_filter_change");
        }
        if let Some(show) = self.show_activity {
            config.browse.show_activity = show;
            changed.push("browse.show_activity");
        }
        if let Some(genres) = self.genres {
            config.browse.genre_options = genres
                .into_iter()
                .map(|g| g.trim().to_string())
                .filter(|g| !g.is_empty())
                .collect();
            changed.push("browse.genre_options");
        }

        changed
    }
}

async fn set_config(update: ConfigUpdate, output: &Output) -> Result<()> {
    if update.is_empty() {
        output.warn("Nothing to change");
        output.println("\nExample: cinema config set --base-url https://cinema.example.com");
        return Ok(());
    }

    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();
    let mut config = Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    let changed = update.apply(&mut config);
    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Configuration not saved: {}", e))?;

    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create {}: {}", path_manager.config_dir().display(), e))?;
    config
        .save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    tracing::info!(fields = ?changed, path = %config_file.display(), "Configuration updated");
    output.success(format!("Updated {} in {}", changed.join(", "), config_file.display()));
    Ok(())
}

async fn show_config(full: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();

    let exists = config_file.exists();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    let mut credentials = CredentialStore::new(path_manager.credentials_file());
    credentials
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials: {}", e))?;
    let token = credentials.get_session_token().cloned().unwrap_or_default();
    let token_display = if full { token.clone() } else { mask_string(&token) };

    match output.format() {
        crate::output::OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            // Header
            println!("\n{}", "╔════════════════════════════════════════════════════════════╗".bright_white());
            println!("{}", "║".bright_white());
            println!("{} {}", "║".bright_white(), "Configuration".bright_cyan().bold());
            println!("{}", "╚════════════════════════════════════════════════════════════╝".bright_white());
            println!();

            let mut info_table = Table::new();
            info_table.set_header(vec![
                Cell::new("Config File").add_attribute(comfy_table::Attribute::Bold),
                Cell::new(if exists {
                    config_file.display().to_string()
                } else {
                    format!("{} (not created, using defaults)", config_file.display())
                }),
            ]);
            info_table.load_preset(comfy_table::presets::UTF8_FULL);
            info_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", info_table);
            println!();

            let mut api_table = Table::new();
            api_table.set_header(vec![
                Cell::new("API").fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold)
            ]);
            api_table.add_row(vec![Cell::new("Base URL"), Cell::new(config.base_url())]);
            api_table.add_row(vec![Cell::new("Sign-in URL"), Cell::new(config.sign_in_url())]);
            api_table.add_row(vec![Cell::new("Session Cookie"), Cell::new(&config.api.session_cookie)]);
            api_table.add_row(vec![
                Cell::new("Request Timeout"),
                Cell::new(match config.api.request_timeout_secs {
                    Some(secs) => format!("{}s", secs),
                    None => "none".to_string(),
                }),
            ]);
            api_table.add_row(vec![Cell::new("Session Token"), Cell::new(token_display)]);
            if let Some(email) = credentials.get_session_email() {
                api_table.add_row(vec![Cell::new("Signed In As"), Cell::new(email)]);
            }
            api_table.load_preset(comfy_table::presets::UTF8_FULL);
            api_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", api_table);
            println!();

            let mut browse_table = Table::new();
            browse_table.set_header(vec![
                Cell::new("Browsing").fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold)
            ]);
            browse_table.add_row(vec![
                Cell::new("Reset Page On Filter Change"),
                Cell::new(check_mark(config.browse.reset_page_on_filter_change)),
            ]);
            browse_table.add_row(vec![
                Cell::new("Show Activity Feed"),
                Cell::new(check_mark(config.browse.show_activity)),
            ]);
            browse_table.add_row(vec![
                Cell::new("Genre Options"),
                Cell::new(config.browse.genre_options.join(", ")),
            ]);
            browse_table.load_preset(comfy_table::presets::UTF8_FULL);
            browse_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", browse_table);
            println!();
        }
        crate::output::OutputFormat::Json | crate::output::OutputFormat::JsonPretty => {
            let json_config = json!({
                "config_file": config_file.display().to_string(),
                "exists": exists,
                "api": {
                    "base_url": config.base_url(),
                    "sign_in_url": config.sign_in_url(),
                    "session_cookie": config.api.session_cookie,
                    "request_timeout_secs": config.api.request_timeout_secs,
                    "session_token": token_display,
                    "session_email": credentials.get_session_email(),
                },
                "browse": {
                    "reset_page_on_filter_change": config.browse.reset_page_on_filter_change,
                    "show_activity": config.browse.show_activity,
                    "genre_options": config.browse.genre_options,
                },
            });
            output.document(&Document::Config(json_config));
        }
    }

    Ok(())
}

fn check_mark(on: bool) -> String {
    if on {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    }
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}
