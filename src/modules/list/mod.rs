//! List Module
//!
//! Shows every list, lets the user create, rename and delete lists and
//! drill into the tasks of one of them.

mod data_flow;
mod interactor;
mod presenter;
mod view;

use std::sync::{Arc, Weak};

use crate::repository::ListStorage;

pub use data_flow::{
    CreateListRequest, DeleteListRequest, ListViewModel, ListViewState, OpenListActionsRequest,
    OpenListEditingRequest, ShowListsResponse, UpdateListRequest,
};
pub use interactor::ListInteractor;
pub use presenter::{ListPresenter, DELETE_LIST_TITLE, EDIT_LIST_TITLE, LOOK_AT_TASKS_TITLE};
pub use view::{ListRouter, ListViewController, ListViewInput};

/// Owns the interactor (and through it the presenter) of one list screen
pub struct ListModule {
    interactor: Arc<ListInteractor>,
}

impl ListModule {
    /// Non-owning handle for the view
    pub fn interactor(&self) -> Weak<ListInteractor> {
        Arc::downgrade(&self.interactor)
    }

    pub fn interactor_ref(&self) -> &ListInteractor {
        &self.interactor
    }
}

/// Build presenter and interactor around `view` and `storage`
pub fn assemble(storage: Arc<dyn ListStorage>, view: Arc<dyn ListViewInput>) -> ListModule {
    let presenter = ListPresenter::new(view);
    ListModule {
        interactor: Arc::new(ListInteractor::new(presenter, storage)),
    }
}
