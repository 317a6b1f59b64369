//! Inventory error types.
//!
//! Defines [`InventoryError`], the error type of every fallible engine and
//! session operation. Each variant renders a description of what went wrong
//! followed by a "To fix:" hint, so the message shown at the top-level
//! handler is enough for the user to act on.
//!
//! Malformed cell values and missing columns are never errors: the
//! normalizer and decoder absorb them.

use std::fmt;
use std::path::PathBuf;

use glasstock_sheet::SheetError;

use crate::model::RecordId;

// ---------------------------------------------------------------------------
// InventoryError
// ---------------------------------------------------------------------------

/// Unified error type for inventory operations.
#[derive(Debug)]
pub enum InventoryError {
    /// Reading or writing the worksheet store failed during an operation
    /// that persists. Nothing was persisted.
    StorageUnavailable {
        /// The worksheet being accessed.
        worksheet: String,
        /// The underlying store error.
        source: SheetError,
    },

    /// The stored worksheet has rows without a stored id, so ids handed out
    /// by an earlier load cannot be matched against it.
    UnstableIds {
        /// The worksheet being modified.
        worksheet: String,
        /// Rows that had no usable id in storage.
        missing: usize,
    },

    /// No record matches the given id or id prefix.
    UnknownRecord {
        /// What the user typed.
        prefix: String,
    },

    /// More than one record matches the given id prefix.
    AmbiguousRecord {
        /// What the user typed.
        prefix: String,
        /// Every id that matched.
        matches: Vec<RecordId>,
    },

    /// An edit could not be interpreted.
    InvalidEdit {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The session is not authenticated, or the password was wrong.
    AccessDenied,

    /// A configuration file could not be loaded or parsed.
    ConfigError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Human-readable description of the problem.
        detail: String,
    },

    /// An I/O error outside the store (reading an import file, the prompt).
    Io(std::io::Error),
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for InventoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StorageUnavailable { worksheet, .. } => {
                write!(
                    f,
                    "could not access worksheet '{worksheet}'. Your changes were NOT saved.\n  To fix: check that the store is reachable and writable, then retry."
                )
            }
            Self::UnstableIds { worksheet, missing } => {
                write!(
                    f,
                    "worksheet '{worksheet}' has {missing} rows without a stored id, so the selection cannot be matched. Nothing was changed.\n  To fix: reload the inventory so ids are stored, then select again:\n    glasstock list"
                )
            }
            Self::UnknownRecord { prefix } => {
                write!(
                    f,
                    "no record matches '{prefix}'.\n  To fix: list records to find the id:\n    glasstock list"
                )
            }
            Self::AmbiguousRecord { prefix, matches } => {
                write!(f, "'{prefix}' matches {} records:", matches.len())?;
                for id in matches {
                    write!(f, "\n  - {id}")?;
                }
                write!(f, "\n  To fix: use a longer id prefix.")
            }
            Self::InvalidEdit { input, reason } => {
                write!(
                    f,
                    "invalid edit '{input}': {reason}\n  Edits look like Field=value, e.g. Quantity=4 or \"Location=Rek 2\"."
                )
            }
            Self::AccessDenied => {
                write!(
                    f,
                    "access denied.\n  To fix: set GLASSTOCK_PASSWORD or enter the shared password when prompted."
                )
            }
            Self::ConfigError { path, detail } => {
                write!(
                    f,
                    "configuration error in '{}': {}\n  To fix: edit the config file and correct the issue.",
                    path.display(),
                    detail
                )
            }
            Self::Io(err) => {
                write!(
                    f,
                    "I/O error: {err}\n  To fix: check the file path and permissions."
                )
            }
        }
    }
}

// ---------------------------------------------------------------------------
// std::error::Error
// ---------------------------------------------------------------------------

impl std::error::Error for InventoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::StorageUnavailable { source, .. } => Some(source),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// From impls
// ---------------------------------------------------------------------------

impl From<std::io::Error> for InventoryError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<crate::config::ConfigError> for InventoryError {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::ConfigError {
            path: err.path.unwrap_or_default(),
            detail: err.message,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
