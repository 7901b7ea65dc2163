//! Projects task responses into view state and builds the task dialogs.

use std::sync::{Arc, Weak};

use super::data_flow::{ShowTasksResponse, TaskViewModel, TaskViewState};
use super::view::TaskViewInput;
use crate::domain::{Identifier, StorageError};
use crate::modules::dialog::CANCEL_TITLE;
use crate::modules::view_state::retain_focus;
use crate::modules::{ActionStyle, Dialog, DialogAction, DialogBuilder, ViewState};

pub const EDIT_TASK_TITLE: &str = "Edit task 📝";
pub const DELETE_TASK_TITLE: &str = "Delete task 🗑";
pub const MARK_DONE_TITLE: &str = "Mark as done ✅";
pub const MARK_NOT_DONE_TITLE: &str = "Mark as not done ↩️";

pub struct TaskPresenter {
    view: Arc<dyn TaskViewInput>,
}

impl TaskPresenter {
    pub fn new(view: Arc<dyn TaskViewInput>) -> Self {
        Self { view }
    }

    pub fn present_show_tasks(&self, response: ShowTasksResponse, focus: Option<Identifier>) {
        let state = match response.result {
            Ok(tasks) => {
                let items: Vec<TaskViewModel> = tasks.into_iter().map(TaskViewModel::from).collect();
                let focus = retain_focus(&items, focus);
                ViewState::Result { items, focus }
            }
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

    /// Action sheet titled with the task name: edit, delete, toggle done, cancel
    pub fn present_task_actions(&self, identifier: Identifier, name: String, is_done: bool) {
        let view = Arc::downgrade(&self.view);

        let edit = {
            let (view, identifier) = (Weak::clone(&view), identifier.clone());
            DialogAction::new(EDIT_TASK_TITLE, ActionStyle::Default, move || {
                if let Some(view) = view.upgrade() {
                    view.show_editing(identifier.clone());
                }
            })
        };
        let delete = {
            let (view, identifier) = (Weak::clone(&view), identifier.clone());
            DialogAction::new(DELETE_TASK_TITLE, ActionStyle::Destructive, move || {
                if let Some(view) = view.upgrade() {
                    view.delete_item(identifier.clone());
                }
            })
        };
        let toggle_title = if is_done {
            MARK_NOT_DONE_TITLE
        } else {
            MARK_DONE_TITLE
        };
        let toggle = DialogAction::new(toggle_title, ActionStyle::Default, move || {
            if let Some(view) = view.upgrade() {
                view.set_done(identifier.clone(), !is_done);
            }
        });

        let dialog = DialogBuilder::new()
            .title(name)
            .action(edit)
            .action(delete)
            .action(toggle)
            .action(DialogAction::dismiss(CANCEL_TITLE, ActionStyle::Cancel))
            .build();
        self.view.show_action_sheet(dialog);
    }

    pub fn present_task_editing(&self, identifier: Identifier) {
        self.view.render(ViewState::Editing(identifier));
    }
}

fn error_state(error: StorageError) -> TaskViewState {
    ViewState::Error(Dialog::storage_error(error))
}
