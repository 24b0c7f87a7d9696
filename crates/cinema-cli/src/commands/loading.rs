use crate::output::Output;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::io::IsTerminal;
use std::time::Duration;

fn is_interactive(output: &Output) -> bool {
    output.is_human() && !output.is_quiet() && std::io::stderr().is_terminal()
}

fn spinner(msg: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .map(|s| s.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"))
    {
        spinner.set_style(style);
    }
    spinner.set_message(msg.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Await `fut` with a spinner on stderr when attached to a terminal.
pub async fn while_loading<F: Future>(output: &Output, msg: &str, fut: F) -> F::Output {
    if !is_interactive(output) {
        tracing::debug!(operation = "loading", message = %msg, "Loading");
        return fut.await;
    }

    let spinner = spinner(msg);
    let result = fut.await;
    spinner.finish_and_clear();
    result
}
