//! Requests, responses and view models of the task module.

use crate::domain::{Identifier, StorageResult, Task};
use crate::modules::{ViewModel, ViewState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskNameRequest {
    pub identifier: Identifier,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskDonenessRequest {
    pub identifier: Identifier,
    pub is_done: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTaskRequest {
    pub identifier: Identifier,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTaskActionsRequest {
    pub identifier: Identifier,
    pub name: String,
    pub is_done: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTaskEditingRequest {
    pub identifier: Identifier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShowTasksResponse {
    pub result: StorageResult<Vec<Task>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskViewModel {
    pub identifier: Identifier,
    pub name: String,
    pub is_done: bool,
}

impl From<Task> for TaskViewModel {
    fn from(task: Task) -> Self {
        Self {
            identifier: task.identifier,
            name: task.name,
            is_done: task.is_done,
        }
    }
}

impl ViewModel for TaskViewModel {
    fn identifier(&self) -> &Identifier {
        &self.identifier
    }
}

pub type TaskViewState = ViewState<TaskViewModel>;
