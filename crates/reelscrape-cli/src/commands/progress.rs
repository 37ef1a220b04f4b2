use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;

/// Progress for a run of sequential scrapes. Draws a bar on a terminal and
/// falls back to structured log lines otherwise.
pub struct ScrapeProgress {
    bar: ProgressBar,
    total: u64,
    interactive: bool,
}

impl ScrapeProgress {
    pub fn new(total: u64, quiet: bool) -> Self {
        let interactive = is_interactive() && !quiet;

        let bar = if interactive {
            let bar = ProgressBar::new(total);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("█▉▊▋▌▍▎▏  ")
            );
            bar
        } else {
            tracing::info!(
                operation = "ui_init",
                mode = "non_interactive",
                "Running in non-interactive mode - progress bars disabled, using structured logging"
            );
            ProgressBar::hidden()
        };

        Self { bar, total, interactive }
    }

    pub fn start(&self, current: u64, name: &str) {
        if self.interactive {
            self.bar.set_message(name.to_string());
        } else {
            tracing::info!(
                operation = "progress",
                current = current + 1,
                total = self.total,
                movie = %name,
                "Scraping movie"
            );
        }
    }

    pub fn advance(&self) {
        self.bar.inc(1);
    }

    pub fn finish(&self) {
        if self.interactive {
            self.bar.finish_with_message("Done");
        }
    }
}

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}

/// Spinner for a single long scrape; hidden when not on a terminal.
pub fn spinner(message: String, quiet: bool) -> ProgressBar {
    if !is_interactive() || quiet {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner
}
