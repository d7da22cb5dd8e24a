//! Progress reporting while waiting on the model and while watching

use crate::output::console::ConsoleFormatter;
use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use localcrew_application::WatchNotifier;
use localcrew_domain::FileRecord;
use std::path::Path;
use std::time::Duration;

/// Spinner shown while a request is in flight
pub struct ProgressReporter {
    bar: Option<ProgressBar>,
}

impl ProgressReporter {
    /// Start a spinner with `message`; a no-op when `quiet`
    pub fn start(message: impl Into<String>, quiet: bool) -> Self {
        if quiet {
            return Self { bar: None };
        }
        let bar = ProgressBar::new_spinner();
        bar.set_style(Self::spinner_style());
        bar.set_message(message.into());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar: Some(bar) }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} {elapsed:.dimmed}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Stop and erase the spinner
    pub fn finish(self) {
        if let Some(bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}

/// Prints each classified file as the watcher finds it
pub struct WatchReporter {
    formatter: ConsoleFormatter,
}

impl WatchReporter {
    pub fn new(formatter: ConsoleFormatter) -> Self {
        Self { formatter }
    }
}

impl WatchNotifier for WatchReporter {
    fn on_watch_start(&self, dir: &Path) {
        eprintln!(
            "{} {} {}",
            "->".cyan(),
            "Watching".bold(),
            dir.display()
        );
    }

    fn on_file_detected(&self, record: &FileRecord) {
        print!("{}", self.formatter.format_record(record));
    }

    fn on_scan_error(&self, message: &str) {
        eprintln!("{} {}", "x".red(), message);
    }

    fn on_watch_stop(&self, processed: usize) {
        eprintln!(
            "{} Stopped after {} file(s)",
            "->".cyan(),
            processed
        );
    }
}
