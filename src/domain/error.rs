//! Domain Layer - Storage Errors
//!
//! The errors every storage backend reports.

use serde::{Deserialize, Serialize};

/// Common result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Failures reported by a storage backend.
///
/// The set is closed and carries no payload: details stay in the logs of
/// the backend that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageError {
    InternalError,
    CannotCreate,
    CannotDelete,
    CannotUpdate,
    CannotFetch,
}

impl StorageError {
    /// Whether the failure came from the backend itself rather than from
    /// the data it was asked to handle
    pub fn is_internal(&self) -> bool {
        matches!(self, StorageError::InternalError)
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::InternalError => write!(f, "Internal storage error"),
            StorageError::CannotCreate => write!(f, "Cannot create record"),
            StorageError::CannotDelete => write!(f, "Cannot delete record"),
            StorageError::CannotUpdate => write!(f, "Cannot update record"),
            StorageError::CannotFetch => write!(f, "Cannot fetch records"),
        }
    }
}

impl std::error::Error for StorageError {}
