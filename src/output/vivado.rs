//! Vivado console output
//!
//! Logs are `SEVERITY:name:message` lines and results are `OUTPUT:value`
//! lines. Inside a field `:` is doubled, `\r` is doubled and `\n` becomes
//! `\r`, so one record never spans two lines. In logger names `:` becomes `-`.

use std::fmt::{self, Write as _};
use std::io::{self, Write as _};
use std::sync::Mutex;

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use super::OutputHandler;
use crate::sync::{SyncEvent, SyncObserver, describe};

/// Logger name of sync progress records
const SYNC_NAME: &str = "sync";

/// Logger name of the error ending a command
const COMMAND_NAME: &str = "frundles";

fn encode_name(name: &str) -> String {
    name.replace(':', "-")
}

fn encode_text(text: &str) -> String {
    text.replace(':', "::")
        .replace('\r', "\r\r")
        .replace('\n', "\r")
}

fn severity(level: Level) -> &'static str {
    if level == Level::ERROR {
        "ERROR"
    } else if level == Level::WARN {
        "WARNING"
    } else if level == Level::INFO {
        "INFO"
    } else {
        "DEBUG"
    }
}

fn log_line(level: Level, name: &str, message: &str) -> String {
    format!(
        "{}:{}:{}",
        severity(level),
        encode_name(name),
        encode_text(message)
    )
}

fn output_line(data: &str) -> String {
    format!("OUTPUT:{}", encode_text(data))
}

/// Prints everything on stdout in the Vivado line format
#[derive(Debug, Clone, Copy)]
pub struct VivadoOutput {
    level: Level,
}

impl VivadoOutput {
    pub fn new(level: Level) -> Self {
        Self { level }
    }
}

impl OutputHandler for VivadoOutput {
    fn init_logging(&self) {
        console::set_colors_enabled(false);
        tracing_subscriber::fmt()
            .with_max_level(self.level)
            .with_writer(io::stdout)
            .event_format(VivadoFormat)
            .init();
    }

    fn send_output(&self, data: &str) {
        println!("{}", output_line(data));
    }

    fn send_error(&self, message: &str) {
        println!("{}", log_line(Level::ERROR, COMMAND_NAME, message));
    }

    fn sync_observer(&self) -> Box<dyn SyncObserver> {
        Box::new(VivadoObserver::new(io::stdout(), self.level))
    }
}

/// `tracing` event format: one Vivado log line per event, named after its target
#[derive(Debug, Clone, Copy, Default)]
pub struct VivadoFormat;

impl<S, N> FormatEvent<S, N> for VivadoFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut message = String::new();
        ctx.format_fields(Writer::new(&mut message), event)?;

        let metadata = event.metadata();
        writeln!(
            writer,
            "{}",
            log_line(*metadata.level(), metadata.target(), &message)
        )
    }
}

/// Sync observer writing Vivado log lines named `sync`
pub struct VivadoObserver<W: io::Write> {
    out: Mutex<W>,
    level: Level,
}

impl<W: io::Write> VivadoObserver<W> {
    /// Observer writing to `out` every event at `level` or more severe
    pub fn new(out: W, level: Level) -> Self {
        Self {
            out: Mutex::new(out),
            level,
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<W: io::Write> SyncObserver for VivadoObserver<W> {
    fn on_event(&self, event: &SyncEvent) {
        let Some((level, message)) = describe(event) else {
            return;
        };
        if level > self.level {
            return;
        }

        if let Ok(mut out) = self.out.lock() {
            // A closed console is not worth failing the sync for
            let _ = writeln!(out, "{}", log_line(level, SYNC_NAME, &message));
            let _ = out.flush();
        }
    }
}
