//! Error types for worksheet storage.
//!
//! [`SheetError`] is the single error type returned by all
//! [`SheetStore`](crate::SheetStore) methods. Callers match on the variant to
//! decide whether a failure can be absorbed (reads) or must surface (writes).

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by [`SheetStore`](crate::SheetStore) operations.
#[derive(Debug, Error)]
pub enum SheetError {
    /// The backing store could not be reached or refused the operation.
    #[error("worksheet `{worksheet}` unavailable: {message}")]
    Unavailable {
        /// The worksheet that was being accessed.
        worksheet: String,
        /// Details from the backend.
        message: String,
    },

    /// A worksheet name cannot be mapped onto the backend's namespace.
    #[error("invalid worksheet name `{name}`: {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// CSV encoding or decoding failed.
    #[error("csv error in {}: {source}", path.display())]
    Csv {
        /// File being read or written.
        path: PathBuf,
        /// Underlying csv error.
        #[source]
        source: csv::Error,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
