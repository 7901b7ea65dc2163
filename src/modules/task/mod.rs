//! Task Module
//!
//! Shows the tasks of one list; create, rename, complete and delete them.

mod data_flow;
mod interactor;
mod presenter;
mod view;

use std::sync::{Arc, Weak};

use crate::domain::Identifier;
use crate::repository::TaskStorage;

pub use data_flow::{
    CreateTaskRequest, DeleteTaskRequest, OpenTaskActionsRequest, OpenTaskEditingRequest,
    ShowTasksResponse, TaskViewModel, TaskViewState, UpdateTaskDonenessRequest,
    UpdateTaskNameRequest,
};
pub use interactor::TaskInteractor;
pub use presenter::{
    TaskPresenter, DELETE_TASK_TITLE, EDIT_TASK_TITLE, MARK_DONE_TITLE, MARK_NOT_DONE_TITLE,
};
pub use view::{TaskViewController, TaskViewInput};

/// Owns the interactor (and through it the presenter) of one task screen
pub struct TaskModule {
    interactor: Arc<TaskInteractor>,
}

impl TaskModule {
    /// Non-owning handle for the view
    pub fn interactor(&self) -> Weak<TaskInteractor> {
        Arc::downgrade(&self.interactor)
    }

    pub fn interactor_ref(&self) -> &TaskInteractor {
        &self.interactor
    }
}

/// Build presenter and interactor for the tasks of `list_identifier`
pub fn assemble(
    list_identifier: Identifier,
    storage: Arc<dyn TaskStorage>,
    view: Arc<dyn TaskViewInput>,
) -> TaskModule {
    let presenter = TaskPresenter::new(view);
    TaskModule {
        interactor: Arc::new(TaskInteractor::new(list_identifier, presenter, storage)),
    }
}
