//! Requests, responses and view models of the list module.

use crate::domain::{Identifier, List, StorageResult};
use crate::modules::{ViewModel, ViewState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateListRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateListRequest {
    pub identifier: Identifier,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteListRequest {
    pub identifier: Identifier,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenListActionsRequest {
    pub identifier: Identifier,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenListEditingRequest {
    pub identifier: Identifier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShowListsResponse {
    pub result: StorageResult<Vec<List>>,
}

/// One row of the list screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListViewModel {
    pub identifier: Identifier,
    pub name: String,
}

impl ViewModel for ListViewModel {
    fn identifier(&self) -> &Identifier {
        &self.identifier
    }
}

pub type ListViewState = ViewState<ListViewModel>;
