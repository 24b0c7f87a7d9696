use anyhow::Result;
use std::io;
use std::io::IsTerminal;
use cinema_config::PathManager;
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Build the env filter from the -v/-q flags.
///
/// 0 = warn (list views render their own status lines), 1 = debug with hyper
/// noise suppressed, 2+ = trace. `RUST_LOG` wins unless --quiet is given.
fn build_filter(verbose_level: u8, quiet: bool) -> EnvFilter {
    if quiet {
        return EnvFilter::new("error");
    }

    let default = match verbose_level {
        0 => "warn",
        1 => "debug,hyper::proto::h1=warn,hyper::client::pool=warn",
        _ => "trace",
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Where file logging goes: an explicit path, the default log file when
/// `--log-file` was given bare, or nowhere (stderr).
pub fn resolve_log_file(arg: Option<Option<PathBuf>>, paths: &PathManager) -> Option<PathBuf> {
    match arg {
        Some(Some(path)) => Some(path),
        Some(None) => Some(paths.default_log_file()),
        None => None,
    }
}

pub fn init_logging_with_file(verbose_level: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let filter = build_filter(verbose_level, quiet);

    let json = std::env::var("RUST_LOG_JSON")
        .map(|v| v == "true")
        .unwrap_or_else(|_| !io::stdout().is_terminal());

    let registry = Registry::default().with(filter);

    if let Some(log_path) = log_file {
        let log_dir = log_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        std::fs::create_dir_all(&log_dir)?;

        let log_filename = log_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow::anyhow!("Invalid log filename"))?;

        // Files will be named: cinema.2026-01-17, etc.
        let log_prefix = log_filename.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(log_filename);

        let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, log_prefix);

        if json {
            let json_layer = fmt::layer()
                .json()
                .with_timer(ChronoUtc::rfc_3339())
                .with_writer(file_appender);

            registry.with(json_layer).init();
        } else {
            let fmt_layer = fmt::layer()
                .with_timer(ChronoUtc::rfc_3339())
                .with_ansi(false)
                .with_writer(file_appender);

            registry.with(fmt_layer).init();
        }
    } else if json {
        let json_layer = fmt::layer()
            .json()
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(io::stderr);

        registry.with(json_layer).init();
    } else {
        let fmt_layer = fmt::layer()
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(io::stderr);

        registry.with(fmt_layer).init();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_log_file() {
        let paths = PathManager::under(PathBuf::from("/srv/cinema"));

        assert_eq!(resolve_log_file(None, &paths), None);
        assert_eq!(
            resolve_log_file(Some(None), &paths),
            Some(PathBuf::from("/srv/cinema/logs/cinema.log"))
        );
        assert_eq!(
            resolve_log_file(Some(Some(PathBuf::from("/tmp/x.log"))), &paths),
            Some(PathBuf::from("/tmp/x.log"))
        );
        // The bare flag lands in the directory `clear --logs` empties
        let default = resolve_log_file(Some(None), &paths).unwrap();
        assert_eq!(default.parent(), Some(paths.log_dir()));
    }
}
