//! Projects list responses into view state and builds the list dialogs.

use std::sync::{Arc, Weak};

use super::data_flow::{ListViewModel, ListViewState, ShowListsResponse};
use super::view::ListViewInput;
use crate::domain::{Identifier, List, StorageError};
use crate::modules::dialog::CANCEL_TITLE;
use crate::modules::view_state::retain_focus;
use crate::modules::{ActionStyle, Dialog, DialogAction, DialogBuilder, ViewState};

pub const EDIT_LIST_TITLE: &str = "Edit list 📝";
pub const DELETE_LIST_TITLE: &str = "Delete list and all containing tasks 🗑";
pub const LOOK_AT_TASKS_TITLE: &str = "Look at tasks ▶️";

pub struct ListPresenter {
    view: Arc<dyn ListViewInput>,
}

impl ListPresenter {
    pub fn new(view: Arc<dyn ListViewInput>) -> Self {
        Self { view }
    }

    /// Show fetched lists, or the error that prevented fetching them.
    ///
    /// `focus` survives only if it names one of the fetched lists.
    pub fn present_show_lists(&self, response: ShowListsResponse, focus: Option<Identifier>) {
        let state = match response.result {
            Ok(lists) => match view_models(lists) {
                Some(items) => {
                    let focus = retain_focus(&items, focus);
                    ViewState::Result { items, focus }
                }
                None => {
                    log::warn!("Storage returned a list without identifier");
                    error_state(StorageError::InternalError)
                }
            },
            Err(error) => error_state(error),
        };
        self.view.render(state);
    }

    pub fn present_error(&self, error: StorageError) {
        self.view.render(error_state(error));
    }

    pub fn present_loading(&self) {
        self.view.render(ViewState::Loading);
    }

    /// Action sheet: edit, delete, look at tasks, cancel
    pub fn present_list_actions(&self, identifier: Identifier, name: String) {
        let view = Arc::downgrade(&self.view);

        let edit = {
            let (view, identifier) = (Weak::clone(&view), identifier.clone());
            DialogAction::new(EDIT_LIST_TITLE, ActionStyle::Default, move || {
                if let Some(view) = view.upgrade() {
                    view.show_editing(identifier.clone());
                }
            })
        };
        let delete = {
            let (view, identifier) = (Weak::clone(&view), identifier.clone());
            DialogAction::new(DELETE_LIST_TITLE, ActionStyle::Destructive, move || {
                if let Some(view) = view.upgrade() {
                    view.delete_item(identifier.clone());
                }
            })
        };
        let open_tasks = DialogAction::new(LOOK_AT_TASKS_TITLE, ActionStyle::Default, move || {
            if let Some(view) = view.upgrade() {
                view.open_tasks(identifier.clone(), name.clone());
            }
        });

        let dialog = DialogBuilder::new()
            .action(edit)
            .action(delete)
            .action(open_tasks)
            .action(DialogAction::dismiss(CANCEL_TITLE, ActionStyle::Cancel))
            .build();
        self.view.show_action_sheet(dialog);
    }

    pub fn present_list_editing(&self, identifier: Identifier) {
        self.view.render(ViewState::Editing(identifier));
    }
}

/// `None` if any list lacks an identifier
fn view_models(lists: Vec<List>) -> Option<Vec<ListViewModel>> {
    lists
        .into_iter()
        .map(|list| {
            list.identifier.map(|identifier| ListViewModel {
                identifier,
                name: list.name,
            })
        })
        .collect()
}

fn error_state(error: StorageError) -> ListViewState {
    ViewState::Error(Dialog::storage_error(error))
}
