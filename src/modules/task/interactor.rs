//! Turns task requests into storage calls scoped to one list.

use std::sync::Arc;

use super::data_flow::{
    CreateTaskRequest, DeleteTaskRequest, OpenTaskActionsRequest, OpenTaskEditingRequest,
    ShowTasksResponse, UpdateTaskDonenessRequest, UpdateTaskNameRequest,
};
use super::presenter::TaskPresenter;
use crate::domain::{Identifier, StorageError, StorageResult, Task};
use crate::modules::{InteractorError, RequestGuard};
use crate::repository::TaskStorage;

pub struct TaskInteractor {
    list_identifier: Identifier,
    presenter: TaskPresenter,
    storage: Arc<dyn TaskStorage>,
    guard: RequestGuard,
}

impl TaskInteractor {
    pub fn new(
        list_identifier: Identifier,
        presenter: TaskPresenter,
        storage: Arc<dyn TaskStorage>,
    ) -> Self {
        Self {
            list_identifier,
            presenter,
            storage,
            guard: RequestGuard::new(),
        }
    }

    pub fn list_identifier(&self) -> &Identifier {
        &self.list_identifier
    }

    pub fn is_busy(&self) -> bool {
        self.guard.is_busy()
    }

    pub async fn fetch_items(&self) -> Result<(), InteractorError> {
        let _permit = self.guard.try_begin("fetch_tasks")?;
        self.presenter.present_loading();
        self.show_items(None).await;
        Ok(())
    }

    /// Create a task and focus it for inline naming
    pub async fn create_item(&self, request: CreateTaskRequest) -> Result<(), InteractorError> {
        let _permit = self.guard.try_begin("create_task")?;
        self.presenter.present_loading();
        let task = Task::new(request.name);
        match self.storage.create_task(&self.list_identifier, &task).await {
            Ok(identifier) => self.show_items(Some(identifier)).await,
            Err(error) => self.fail("create_task", error),
        }
        Ok(())
    }

    pub async fn update_item_name(&self, request: UpdateTaskNameRequest) -> Result<(), InteractorError> {
        let _permit = self.guard.try_begin("update_task_name")?;
        self.presenter.present_loading();
        let result = self
            .storage
            .update_task(&request.identifier, Some(request.name.as_str()), None)
            .await;
        self.finish_mutation("update_task_name", result).await;
        Ok(())
    }

    pub async fn update_item_doneness(
        &self,
        request: UpdateTaskDonenessRequest,
    ) -> Result<(), InteractorError> {
        let _permit = self.guard.try_begin("update_task_doneness")?;
        self.presenter.present_loading();
        let result = self
            .storage
            .update_task(&request.identifier, None, Some(request.is_done))
            .await;
        self.finish_mutation("update_task_doneness", result).await;
        Ok(())
    }

    pub async fn delete_item(&self, request: DeleteTaskRequest) -> Result<(), InteractorError> {
        let _permit = self.guard.try_begin("delete_task")?;
        self.presenter.present_loading();
        let result = self.storage.delete_task(&request.identifier).await;
        self.finish_mutation("delete_task", result).await;
        Ok(())
    }

    pub fn open_item_actions(&self, request: OpenTaskActionsRequest) {
        self.presenter
            .present_task_actions(request.identifier, request.name, request.is_done);
    }

    pub fn open_item_editing(&self, request: OpenTaskEditingRequest) {
        self.presenter.present_task_editing(request.identifier);
    }

    async fn finish_mutation(&self, request: &str, result: StorageResult<()>) {
        match result {
            Ok(()) => self.show_items(None).await,
            Err(error) => self.fail(request, error),
        }
    }

    /// Re-fetch under the caller's permit. Loading was already presented by
    /// the request that owns the permit, so it is not emitted again here.
    async fn show_items(&self, focus: Option<Identifier>) {
        let result = self.storage.fetch_tasks(&self.list_identifier).await;
        if let Err(error) = &result {
            log::warn!("fetch_tasks for list {} failed: {}", self.list_identifier, error);
        }
        self.presenter
            .present_show_tasks(ShowTasksResponse { result }, focus);
    }

    fn fail(&self, request: &str, error: StorageError) {
        log::warn!("{} failed: {}", request, error);
        self.presenter.present_error(error);
    }
}
