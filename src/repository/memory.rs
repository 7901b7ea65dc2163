//! In-memory list and task store (non-persistent).

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::traits::{ListStorage, TaskStorage};
use crate::domain::{Identifier, List, StorageError, StorageResult, Task};

#[derive(Debug, Clone)]
struct StoredTask {
    list_id: Identifier,
    task: Task,
}

#[derive(Debug, Default)]
struct MemoryState {
    /// Insertion order is fetch order
    lists: Vec<(Identifier, String)>,
    tasks: Vec<StoredTask>,
}

impl MemoryState {
    fn has_list(&self, identifier: &Identifier) -> bool {
        self.lists.iter().any(|(id, _)| id == identifier)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryStorage {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListStorage for InMemoryStorage {
    async fn fetch_lists(&self) -> StorageResult<Vec<List>> {
        let state = self.state.read().await;
        Ok(state
            .lists
            .iter()
            .map(|(id, name)| List::with_identifier(id.clone(), name.clone()))
            .collect())
    }

    async fn create_list(&self, list: &List) -> StorageResult<Identifier> {
        let mut state = self.state.write().await;
        let identifier = list.identifier.clone().unwrap_or_else(Identifier::generate);
        if state.has_list(&identifier) {
            log::warn!("Duplicate list identifier {}", identifier);
            return Err(StorageError::CannotCreate);
        }
        state.lists.push((identifier.clone(), list.name.clone()));
        Ok(identifier)
    }

    async fn update_list(&self, identifier: &Identifier, name: Option<&str>) -> StorageResult<()> {
        let mut state = self.state.write().await;
        let (_, stored_name) = state
            .lists
            .iter_mut()
            .find(|(id, _)| id == identifier)
            .ok_or(StorageError::CannotUpdate)?;
        if let Some(name) = name {
            *stored_name = name.to_string();
        }
        Ok(())
    }

    async fn delete_list(&self, identifier: &Identifier) -> StorageResult<()> {
        let mut state = self.state.write().await;
        if !state.has_list(identifier) {
            return Err(StorageError::CannotDelete);
        }
        state.lists.retain(|(id, _)| id != identifier);
        state.tasks.retain(|stored| &stored.list_id != identifier);
        Ok(())
    }
}

#[async_trait]
impl TaskStorage for InMemoryStorage {
    async fn fetch_tasks(&self, list_id: &Identifier) -> StorageResult<Vec<Task>> {
        let state = self.state.read().await;
        if !state.has_list(list_id) {
            return Err(StorageError::CannotFetch);
        }
        Ok(state
            .tasks
            .iter()
            .filter(|stored| &stored.list_id == list_id)
            .map(|stored| stored.task.clone())
            .collect())
    }

    async fn create_task(&self, list_id: &Identifier, task: &Task) -> StorageResult<Identifier> {
        let mut state = self.state.write().await;
        let duplicate = state
            .tasks
            .iter()
            .any(|stored| stored.task.identifier == task.identifier);
        if !state.has_list(list_id) || duplicate {
            return Err(StorageError::CannotCreate);
        }
        state.tasks.push(StoredTask {
            list_id: list_id.clone(),
            task: task.clone(),
        });
        Ok(task.identifier.clone())
    }

    async fn update_task(
        &self,
        task_id: &Identifier,
        name: Option<&str>,
        is_done: Option<bool>,
    ) -> StorageResult<()> {
        let mut state = self.state.write().await;
        let stored = state
            .tasks
            .iter_mut()
            .find(|stored| &stored.task.identifier == task_id)
            .ok_or(StorageError::CannotUpdate)?;
        if let Some(name) = name {
            stored.task.name = name.to_string();
        }
        if let Some(is_done) = is_done {
            stored.task.is_done = is_done;
        }
        Ok(())
    }

    async fn delete_task(&self, task_id: &Identifier) -> StorageResult<()> {
        let mut state = self.state.write().await;
        let before = state.tasks.len();
        state.tasks.retain(|stored| &stored.task.identifier != task_id);
        if state.tasks.len() == before {
            return Err(StorageError::CannotDelete);
        }
        Ok(())
    }
}
