use chrono::{DateTime, Utc};
use cinema_core::{FeedEntry, FeedState, LoadState, PageControls};
use cinema_models::{Collection, FilterState, Session, Title};
use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

/// What a command prints in the JSON formats, tagged by `type`.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Document<'a> {
    /// One page of a collection; image paths are absolute
    List {
        collection: Collection,
        state: LoadState,
        filters: &'a FilterState,
        controls: PageControls,
        message: Option<&'a str>,
        titles: Vec<Title>,
    },
    Activity {
        state: &'a FeedState,
        message: Option<&'a str>,
        entries: Vec<FeedEntry>,
    },
    Session {
        signed_in: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        session: Option<&'a Session>,
        #[serde(skip_serializing_if = "Option::is_none")]
        verified_at: Option<DateTime<Utc>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        sign_in_url: Option<&'a str>,
    },
    Config(serde_json::Value),
}

#[derive(Serialize)]
struct Notice<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    message: &'a str,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        self.notice("success", Some("✓".green().to_string()), msg.as_ref());
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        self.notice("info", None, msg.as_ref());
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        self.notice("warning", Some("⚠".yellow().to_string()), msg.as_ref());
    }

    /// Short status line: symbol and text for people, a `{type, message}`
    /// object for machines.
    fn notice(&self, kind: &'static str, symbol: Option<String>, message: &str) {
        if self.quiet {
            return;
        }
        if !self.is_human() {
            self.write_json(&Notice { kind, message });
            return;
        }
        match symbol {
            Some(symbol) => println!("{} {}", symbol, message),
            None => println!("{}", message),
        }
    }

    /// Plain line in human mode; nothing in JSON mode, where callers emit a
    /// `Document` instead.
    pub fn println(&self, msg: impl AsRef<str>) {
        if self.quiet || !self.is_human() {
            return;
        }
        println!("{}", msg.as_ref());
    }

    /// Print a document in the JSON formats. Human mode renders its own view.
    pub fn document(&self, doc: &Document<'_>) {
        if self.quiet || self.is_human() {
            return;
        }
        self.write_json(doc);
    }

    fn write_json<T: Serialize>(&self, value: &T) {
        let line = if self.format == OutputFormat::JsonPretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        match line {
            Ok(line) => println!("{}", line),
            Err(e) => tracing::error!(error = %e, "Failed to serialize output"),
        }
    }
}
