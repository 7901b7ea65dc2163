//! Repository Layer - Core Traits
//!
//! Defines the abstract storage interfaces consumed by the interactors.
//! Implementations can use SQLite, in-memory, etc.

use async_trait::async_trait;

use crate::domain::{Identifier, List, StorageResult, Task};

/// CRUD over lists.
///
/// Every operation reports failure as a [`crate::domain::StorageError`]
/// without payload.
#[async_trait]
pub trait ListStorage: Send + Sync {
    /// All lists, in storage order
    async fn fetch_lists(&self) -> StorageResult<Vec<List>>;

    /// Persist a new list and return the identifier it was stored under
    async fn create_list(&self, list: &List) -> StorageResult<Identifier>;

    /// Rename a list. `None` leaves the name untouched.
    async fn update_list(&self, identifier: &Identifier, name: Option<&str>) -> StorageResult<()>;

    /// Delete a list together with all of its tasks
    async fn delete_list(&self, identifier: &Identifier) -> StorageResult<()>;
}

/// CRUD over the tasks of one list.
#[async_trait]
pub trait TaskStorage: Send + Sync {
    /// Tasks owned by `list_id`, in storage order
    async fn fetch_tasks(&self, list_id: &Identifier) -> StorageResult<Vec<Task>>;

    async fn create_task(&self, list_id: &Identifier, task: &Task) -> StorageResult<Identifier>;

    /// Update only the fields that are provided
    async fn update_task(
        &self,
        task_id: &Identifier,
        name: Option<&str>,
        is_done: Option<bool>,
    ) -> StorageResult<()>;

    async fn delete_task(&self, task_id: &Identifier) -> StorageResult<()>;
}
