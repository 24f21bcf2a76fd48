//! Terminal output

use tracing::Level;

use super::OutputHandler;
use crate::progress::ProgressObserver;
use crate::sync::SyncObserver;

/// Results on stdout; logs, errors and the sync spinner on stderr
#[derive(Debug, Clone, Copy)]
pub struct TtyOutput {
    level: Level,
}

impl TtyOutput {
    pub fn new(level: Level) -> Self {
        Self { level }
    }
}

impl OutputHandler for TtyOutput {
    fn init_logging(&self) {
        tracing_subscriber::fmt()
            .with_max_level(self.level)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .init();
    }

    fn send_output(&self, data: &str) {
        println!("{data}");
    }

    fn send_error(&self, message: &str) {
        eprintln!("Error: {message}");
    }

    fn sync_observer(&self) -> Box<dyn SyncObserver> {
        Box::new(ProgressObserver::new(self.level == Level::ERROR))
    }
}
