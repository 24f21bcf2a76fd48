//! Command implementations for Frundles CLI

pub mod bump;
pub mod bump_all;
pub mod completions;
mod helpers;
pub mod list;
pub mod locate;
pub mod sync;
pub mod version;
