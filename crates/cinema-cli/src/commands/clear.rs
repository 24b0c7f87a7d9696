use super::prompts;
use crate::output::Output;
use cinema_config::PathManager;
use color_eyre::Result;
use std::fs;
use std::io::IsTerminal;

pub async fn run_clear(all: bool, credentials: bool, logs: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();

    if all {
        if output.is_human() && std::io::stdin().is_terminal() {
            let confirmed = prompts::prompt_yes_no("This signs you out and deletes all logs. Continue?", Some(false))?;
            if !confirmed {
                output.info("Nothing cleared");
                return Ok(());
            }
        }
        clear_credentials(&path_manager, output).await?;
        clear_logs(&path_manager, output).await?;
        output.success("Credentials and logs cleared");
        return Ok(());
    }

    let mut cleared_anything = false;

    if credentials {
        clear_credentials(&path_manager, output).await?;
        cleared_anything = true;
    }

    if logs {
        clear_logs(&path_manager, output).await?;
        cleared_anything = true;
    }

    if !cleared_anything {
        output.warn("No clear option specified. Use --credentials, --logs, or --all");
        output.println("\nExample: cinema clear --credentials");
    }

    Ok(())
}

async fn clear_credentials(path_manager: &PathManager, output: &Output) -> Result<()> {
    let credentials_file = path_manager.credentials_file();

    if credentials_file.exists() {
        fs::remove_file(&credentials_file)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to remove credentials file at {}: {}", credentials_file.display(), e))?;
        output.success(format!("Cleared credentials: {}", credentials_file.display()));
    } else {
        output.info("No credentials file found to clear");
    }

    Ok(())
}

async fn clear_logs(path_manager: &PathManager, output: &Output) -> Result<()> {
    let log_dir = path_manager.log_dir();

    if !log_dir.exists() {
        output.info("No log directory found to clear");
        return Ok(());
    }

    // Only files; the directory itself stays for the running appender
    let mut removed = 0usize;
    let entries = fs::read_dir(log_dir)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read log directory {}: {}", log_dir.display(), e))?;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_file() {
            fs::remove_file(&path)
                .map_err(|e| color_eyre::eyre::eyre!("Failed to remove log file {}: {}", path.display(), e))?;
            removed += 1;
        }
    }

    if removed == 0 {
        output.info("No log files found to clear");
    } else {
        output.success(format!("Cleared {} log file(s) in {}", removed, log_dir.display()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_clear_logs_empties_default_log_dir() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathManager::under(dir.path().to_path_buf());

        // Same location the bare `--log-file` flag writes to
        let log_file = crate::logging::resolve_log_file(Some(None), &paths).unwrap();
        let log_dir = log_file.parent().map(PathBuf::from).unwrap();
        fs::create_dir_all(&log_dir).unwrap();
        fs::write(log_dir.join("cinema.2026-10-18"), "old").unwrap();
        fs::write(log_dir.join("cinema.2026-10-19"), "new").unwrap();

        let output = Output::new(OutputFormat::Json, true);
        clear_logs(&paths, &output).await.unwrap();

        assert!(log_dir.exists());
        assert_eq!(fs::read_dir(&log_dir).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_clear_credentials_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathManager::under(dir.path().to_path_buf());
        fs::write(paths.credentials_file(), "[data]\n").unwrap();

        let output = Output::new(OutputFormat::Json, true);
        clear_credentials(&paths, &output).await.unwrap();
        assert!(!paths.credentials_file().exists());
    }
}
