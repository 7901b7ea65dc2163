//! Domain Layer
//!
//! Contains the domain entities and the storage error taxonomy.
//! This layer has NO external dependencies (except serde and uuid).

mod error;
mod identifier;
mod list;
mod task;

pub use error::{StorageError, StorageResult};
pub use identifier::Identifier;
pub use list::List;
pub use task::Task;
