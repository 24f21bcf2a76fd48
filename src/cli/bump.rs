use clap::Parser;

/// Arguments for the bump command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Move uart to the current head of its branch:\n    frundles bump uart\n\n\
                  Skip artifacts fixed at a commit instead of failing:\n    frundles bump uart --ignore-commits")]
pub struct BumpArgs {
    /// Friendly name of the artifact, or `name:reference` when it has none
    pub name: String,

    /// Warn instead of failing when the artifact is fixed at a commit
    #[arg(long)]
    pub ignore_commits: bool,
}
