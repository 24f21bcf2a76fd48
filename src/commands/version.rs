//! Version command implementation

use crate::error::Result;
use crate::output::OutputHandler;

/// Run version command
pub fn run(output: &dyn OutputHandler) -> Result<()> {
    output.send_output(&format!(
        "frundles {}\n\nBuild info:\n  Rust version: {}\n  Profile: {}\n  libgit2: {}",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_RUST_VERSION"),
        build_profile(),
        libgit2_version()
    ));

    Ok(())
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}

fn libgit2_version() -> String {
    let (major, minor, patch) = git2::Version::get().libgit2_version();
    format!("{major}.{minor}.{patch}")
}
