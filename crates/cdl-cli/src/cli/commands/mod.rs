//! CLI command handlers, one file per command.

mod download;
mod help;

pub use download::run_download;
pub use help::run_help;
pub use test::run_test;

#[cfg(test)]
pub(crate) use download::summary;
#[cfg(test)]
pub(crate) use help::help_text;
#[cfg(test)]
pub(crate) use test::verdict;
