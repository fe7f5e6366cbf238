//! Host-side error types.

use std::io;
use std::path::PathBuf;

/// Errors surfaced to Rust-level callers of this crate.
///
/// Outcomes that VM code branches on travel as result codes
/// ([`fifth_sdk::VmStatus`], [`crate::FsStatus`]) and never through this
/// type.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Console or terminal I/O failure.
    #[error("{0}")]
    Io(#[from] io::Error),

    /// A file operation failed; the path gives context.
    #[error("{}: {source}", path.display())]
    File {
        /// The file the operation targeted.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}
