//! Spinner display for sync runs

use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};

use crate::sync::{SyncEvent, SyncObserver, TracingObserver};

/// Observer showing a spinner while references resolve and checkouts move
///
/// Every event is also logged through [`TracingObserver`], with the spinner
/// suspended so log lines never interleave with it.
pub struct ProgressObserver {
    spinner: ProgressBar,
    log: TracingObserver,
}

impl ProgressObserver {
    /// Spinner on stderr, hidden when `hidden` is set or stderr is not a terminal
    pub fn new(hidden: bool) -> Self {
        let spinner = if hidden || !Term::stderr().is_term() {
            ProgressBar::hidden()
        } else {
            let style = ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner());
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(style);
            spinner
        };

        Self {
            spinner,
            log: TracingObserver,
        }
    }

    fn start(&self, message: String) {
        self.spinner.set_message(message);
        self.spinner.enable_steady_tick(Duration::from_millis(100));
    }

    fn stop(&self) {
        self.spinner.disable_steady_tick();
        self.spinner.set_message("");
        self.spinner.tick();
    }

    /// Clear the spinner line for good
    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl SyncObserver for ProgressObserver {
    fn on_event(&self, event: &SyncEvent) {
        self.spinner.suspend(|| self.log.on_event(event));

        match event {
            SyncEvent::Resolving { identifier, origin } => {
                self.start(format!("Resolving {identifier} on {origin}"));
            }
            SyncEvent::Fetching { identifier, .. } => {
                self.start(format!("Fetching {identifier}"));
            }
            SyncEvent::Updating { identifier, .. } => {
                self.start(format!("Updating {identifier}"));
            }
            SyncEvent::Resolved { .. }
            | SyncEvent::StatusChecked { .. }
            | SyncEvent::EntryFailed { .. } => self.stop(),
            _ => {}
        }
    }
}

impl Drop for ProgressObserver {
    fn drop(&mut self) {
        self.finish();
    }
}
