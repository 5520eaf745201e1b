//! The in-memory document: logical lines, line-ending mode and encoding.
//!
//! This module handles:
//! - Rope-backed line storage that never holds zero lines
//! - Decoding/encoding file bytes ([`encoding`])
//! - Loading with tab expansion and CRLF detection, and crash-safe saving ([`io`])

pub mod encoding;
pub mod io;
mod types;

use std::path::PathBuf;

pub use encoding::Encoding;
pub use io::{SaveOptions, split_lines};
pub use types::{Document, LineEnding};

/// Errors reported by document load/save.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// No file name was given.
    #[error("no file name given")]
    NoPath,
    /// The file could not be read.
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The temporary file could not be written.
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Renaming the temporary file over the destination failed.
    #[error("failed to rename {from} to {to}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
