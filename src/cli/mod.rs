//! CLI definitions using clap derive API
//!
//! Each command's argument type lives in its own submodule.

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

pub mod bump;
pub mod completions;
pub mod list;
pub mod locate;
pub mod sync;

pub use bump::BumpArgs;
pub use completions::CompletionsArgs;
pub use list::ListArgs;
pub use locate::LocateArgs;
pub use sync::SyncArgs;

/// Frundles - workspace-level dependency manager
///
/// Fetch, pin and verify the version-controlled libraries a workspace depends on.
#[derive(Parser, Debug)]
#[command(
    name = "frundles",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Workspace-level dependency manager for version-controlled libraries",
    long_about = "Frundles fetches the libraries declared in frundles.yml into a local catalog, \
                  pins every branch and tag to a commit in frundles.lock, and walks nested \
                  workspaces recursively.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  frundles sync              \x1b[90m# Fetch the whole dependency tree\x1b[0m\n   \
                  frundles sync --update     \x1b[90m# Also move drifted checkouts\x1b[0m\n   \
                  frundles bump uart         \x1b[90m# Re-pin one library\x1b[0m\n   \
                  frundles bump-all          \x1b[90m# Re-pin everything\x1b[0m\n   \
                  frundles locate uart       \x1b[90m# Print a checkout path\x1b[0m\n   \
                  frundles list              \x1b[90m# List declared artifacts\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Directory to start workspace discovery from (defaults to current directory)
    #[arg(long, short = 'w', global = true, env = "FRUNDLES_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Output format: tty for terminals, vivado for the Vivado Tcl console
    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = OutputFormat::Tty,
        env = "FRUNDLES_OUTPUT"
    )]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch every dependency of the root workspace
    Sync(SyncArgs),

    /// Re-pin one artifact of the root workspace, then sync
    Bump(BumpArgs),

    /// Re-pin every artifact of the tree, then sync
    #[command(name = "bump-all")]
    BumpAll,

    /// Print the checkout path of an artifact of the current workspace
    Locate(LocateArgs),

    /// List the artifacts of the current workspace
    List(ListArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
