use clap::Parser;

/// Arguments for the sync command
#[derive(Parser, Debug, Default)]
#[command(after_help = "EXAMPLES:\n  \
                  Fetch everything the lock file pins:\n    frundles sync\n\n\
                  Also move checkouts that drifted from their pin:\n    frundles sync --update")]
pub struct SyncArgs {
    /// Check out the pinned commit in checkouts that are at another commit
    #[arg(long, short = 'u')]
    pub update: bool,
}
