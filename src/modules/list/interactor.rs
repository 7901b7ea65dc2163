//! Turns list requests into storage calls.
//!
//! Every successful mutation is followed by a full fetch, so the view only
//! ever shows what storage holds.

use std::sync::Arc;

use super::data_flow::{
    CreateListRequest, DeleteListRequest, OpenListActionsRequest, OpenListEditingRequest,
    ShowListsResponse, UpdateListRequest,
};
use super::presenter::ListPresenter;
use crate::domain::{Identifier, List, StorageError};
use crate::modules::{InteractorError, RequestGuard};
use crate::repository::ListStorage;

pub struct ListInteractor {
    presenter: ListPresenter,
    storage: Arc<dyn ListStorage>,
    guard: RequestGuard,
}

impl ListInteractor {
    pub fn new(presenter: ListPresenter, storage: Arc<dyn ListStorage>) -> Self {
        Self {
            presenter,
            storage,
            guard: RequestGuard::new(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.guard.is_busy()
    }

    pub async fn fetch_items(&self) -> Result<(), InteractorError> {
        let _permit = self.guard.try_begin("fetch_lists")?;
        self.presenter.present_loading();
        self.show_items(None).await;
        Ok(())
    }

    /// Create a list and focus it so the user can name it inline
    pub async fn create_item(&self, request: CreateListRequest) -> Result<(), InteractorError> {
        let _permit = self.guard.try_begin("create_list")?;
        self.presenter.present_loading();
        match self.storage.create_list(&List::new(request.name)).await {
            Ok(identifier) => self.show_items(Some(identifier)).await,
            Err(error) => self.fail("create_list", error),
        }
        Ok(())
    }

    pub async fn update_item(&self, request: UpdateListRequest) -> Result<(), InteractorError> {
        let _permit = self.guard.try_begin("update_list")?;
        self.presenter.present_loading();
        match self
            .storage
            .update_list(&request.identifier, Some(request.name.as_str()))
            .await
        {
            Ok(()) => self.show_items(None).await,
            Err(error) => self.fail("update_list", error),
        }
        Ok(())
    }

    pub async fn delete_item(&self, request: DeleteListRequest) -> Result<(), InteractorError> {
        let _permit = self.guard.try_begin("delete_list")?;
        self.presenter.present_loading();
        match self.storage.delete_list(&request.identifier).await {
            Ok(()) => self.show_items(None).await,
            Err(error) => self.fail("delete_list", error),
        }
        Ok(())
    }

    pub fn open_item_actions(&self, request: OpenListActionsRequest) {
        self.presenter
            .present_list_actions(request.identifier, request.name);
    }

    pub fn open_item_editing(&self, request: OpenListEditingRequest) {
        self.presenter.present_list_editing(request.identifier);
    }

    /// Re-fetch under the caller's permit. Loading was already presented by
    /// the request that owns the permit, so it is not emitted again here.
    async fn show_items(&self, focus: Option<Identifier>) {
        let result = self.storage.fetch_lists().await;
        if let Err(error) = &result {
            log::warn!("fetch_lists failed: {}", error);
        }
        self.presenter
            .present_show_lists(ShowListsResponse { result }, focus);
    }

    fn fail(&self, request: &str, error: StorageError) {
        log::warn!("{} failed: {}", request, error);
        self.presenter.present_error(error);
    }
}
