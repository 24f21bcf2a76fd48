//! Output handlers
//!
//! Everything a command prints goes through an [`OutputHandler`], picked with
//! the global `--output` option:
//!
//! - `tty`: results on stdout, logs and a spinner on stderr
//! - `vivado`: every line on stdout, as `SEVERITY:name:message` for logs and
//!   `OUTPUT:value` for results. Vivado treats any stderr output of an
//!   external tool as a failure, so nothing goes there.

mod tty;
mod vivado;

pub use tty::TtyOutput;
pub use vivado::VivadoOutput;

use tracing::Level;

use crate::sync::SyncObserver;

/// Output handler selected on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-friendly terminal output
    #[default]
    Tty,
    /// Line protocol for the Vivado Tcl console
    Vivado,
}

impl OutputFormat {
    /// Handler for this format, logging up to `level`
    pub fn handler(self, level: Level) -> Box<dyn OutputHandler> {
        match self {
            OutputFormat::Tty => Box::new(TtyOutput::new(level)),
            OutputFormat::Vivado => Box::new(VivadoOutput::new(level)),
        }
    }
}

/// Destination of logs, command results and sync progress
pub trait OutputHandler {
    /// Install the global `tracing` subscriber; call once, before logging
    fn init_logging(&self);

    /// Emit one command result, possibly spanning several lines
    fn send_output(&self, data: &str);

    /// Report the error that ended the command
    fn send_error(&self, message: &str);

    /// Observer for one sync run; dropping it clears any live display
    fn sync_observer(&self) -> Box<dyn SyncObserver>;
}
