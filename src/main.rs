//! Frundles - workspace-level dependency manager
//!
//! Fetches the version-controlled libraries a workspace declares into a local
//! catalog, pins floating references to commits in a lock file, and walks
//! nested workspaces recursively.

use clap::Parser;
use tracing::Level;

mod cli;
mod commands;
mod config;
mod error;
mod git;
mod model;
mod output;
mod progress;
mod sync;
mod workspace;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};

/// Log level selected by the global verbosity flags
fn log_level(verbose: bool, quiet: bool) -> Level {
    if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

fn main() {
    let cli = Cli::parse();
    let output = cli.output.handler(log_level(cli.verbose, cli.quiet));
    output.init_logging();

    let out = output.as_ref();
    let quiet = cli.quiet;
    let result = match cli.command {
        Commands::Sync(args) => commands::sync::run(cli.workspace, &args, out, quiet),
        Commands::Bump(args) => commands::bump::run(cli.workspace, &args, out, quiet),
        Commands::BumpAll => commands::bump_all::run(cli.workspace, out, quiet),
        Commands::Locate(args) => commands::locate::run(cli.workspace, &args, out),
        Commands::List(args) => commands::list::run(cli.workspace, &args, out),
        Commands::Version => commands::version::run(out),
        Commands::Completions(args) => commands::completions::run(&args),
    };

    if let Err(e) = result {
        output.send_error(&e.to_string());
        std::process::exit(1);
    }
}
