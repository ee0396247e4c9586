pub mod config;
pub mod fault;
pub mod frames;
pub mod report;
pub mod snippet;
pub mod source_file;

pub use config::*;
pub use fault::*;
pub use frames::*;
pub use report::*;
pub use snippet::*;
pub use source_file::*;

use thiserror::Error;

/// Failures while reading source lines for a snippet. Absorbed by
/// `SnippetExtractor::extract` into an empty snippet; they never cross the
/// pipeline boundary.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source file unavailable: {0}")]
    FileUnavailable(#[from] std::io::Error),
    #[error("invalid line number: {0}")]
    InvalidLineNumber(usize),
}
