//! Progress rendering driven by polled download records.
//!
//! On a terminal every transfer gets an indicatif bar inside one shared
//! `MultiProgress`. Otherwise bars are hidden and only the final line of each
//! transfer is printed.

use std::io::{self, IsTerminal};
use std::time::Duration;

use indicatif::{HumanBytes, MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

use dltrack_core::DownloadRecord;

const BAR_TEMPLATE: &str =
    "{spinner:.green} {prefix:.bold} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";
const SPINNER_TEMPLATE: &str = "{spinner:.green} {prefix:.bold} {bytes} ({bytes_per_sec})";
const TICK: Duration = Duration::from_millis(120);

/// Human-readable byte count.
pub fn format_bytes(bytes: u64) -> String {
    HumanBytes(bytes).to_string()
}

/// Owner of every progress bar of one command.
pub struct ProgressBoard {
    multi: MultiProgress,
    fancy: bool,
}

impl ProgressBoard {
    /// Board that draws on stderr when it is a terminal.
    pub fn new() -> Self {
        let fancy = io::stderr().is_terminal();
        Self::with_fancy(fancy)
    }

    fn with_fancy(fancy: bool) -> Self {
        let target = if fancy {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };
        Self {
            multi: MultiProgress::with_draw_target(target),
            fancy,
        }
    }

    /// Add a bar labelled `label`. It starts as a spinner until a total is known.
    pub fn add(&self, label: &str) -> TransferBar {
        let bar = self.multi.add(ProgressBar::new_spinner());
        bar.set_style(spinner_style());
        bar.set_prefix(label.to_string());
        if self.fancy {
            bar.enable_steady_tick(TICK);
        }
        TransferBar {
            bar,
            label: label.to_string(),
            has_length: false,
            fancy: self.fancy,
        }
    }
}

impl Default for ProgressBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// One transfer's bar.
pub struct TransferBar {
    bar: ProgressBar,
    label: String,
    has_length: bool,
    fancy: bool,
}

impl TransferBar {
    /// Reflect a polled record.
    pub fn update(&mut self, record: &DownloadRecord) {
        if let Some(total) = record.total_bytes {
            if !self.has_length {
                self.has_length = true;
                self.bar.set_style(bar_style());
            }
            self.bar.set_length(total);
        }
        self.bar.set_position(record.received_bytes);
    }

    /// Bytes shown so far.
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Finish successfully.
    pub fn finish_ok(&self) {
        let message = format!("done, {}", format_bytes(self.bar.position()));
        if self.fancy {
            self.bar.finish_with_message(message);
        } else {
            self.bar.finish();
            println!("{}: {message}", self.label);
        }
    }

    /// Finish with an error, leaving the bar where it stopped.
    pub fn finish_err(&self, error: &str) {
        let message = format!("failed: {error}");
        if self.fancy {
            self.bar.abandon_with_message(message);
        } else {
            self.bar.abandon();
            eprintln!("{}: {message}", self.label);
        }
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template(&format!("{BAR_TEMPLATE} {{msg}}"))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓░")
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template(&format!("{SPINNER_TEMPLATE} {{msg}}"))
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}
