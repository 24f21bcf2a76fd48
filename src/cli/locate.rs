use clap::Parser;

/// Arguments for the locate command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Print where uart is checked out:\n    frundles locate uart\n\n\
                  Use it from a script:\n    cd \"$(frundles locate uart)\"")]
pub struct LocateArgs {
    /// Friendly name of the artifact, or `name:reference` when it has none
    pub name: String,
}
