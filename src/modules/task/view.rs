//! View contract of the task module and a headless view controller.

use std::future::Future;
use std::sync::{Arc, Mutex, Weak};

use tokio::task::JoinHandle;

use super::data_flow::{
    CreateTaskRequest, DeleteTaskRequest, OpenTaskActionsRequest, OpenTaskEditingRequest,
    TaskViewModel, TaskViewState, UpdateTaskDonenessRequest, UpdateTaskNameRequest,
};
use super::interactor::TaskInteractor;
use crate::domain::Identifier;
use crate::modules::{lock, Dialog, InteractorError, ViewState};

/// What the presenter drives
pub trait TaskViewInput: Send + Sync {
    fn render(&self, state: TaskViewState);
    fn show_action_sheet(&self, dialog: Dialog);
    fn show_editing(&self, identifier: Identifier);
    fn delete_item(&self, identifier: Identifier);
    fn set_done(&self, identifier: Identifier, is_done: bool);
}

#[derive(Debug, Default)]
struct Screen {
    state: TaskViewState,
    rows: Vec<TaskViewModel>,
    activity: bool,
    alert: Option<Dialog>,
    action_sheet: Option<Dialog>,
    focused: Option<Identifier>,
}

pub struct TaskViewController {
    /// Name of the list, shown as the screen title
    title: String,
    screen: Mutex<Screen>,
    interactor: Mutex<Weak<TaskInteractor>>,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl TaskViewController {
    pub fn new(title: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            title: title.into(),
            screen: Mutex::new(Screen::default()),
            interactor: Mutex::new(Weak::new()),
            pending: Mutex::new(Vec::new()),
        })
    }

    pub fn bind(&self, interactor: Weak<TaskInteractor>) {
        *lock(&self.interactor) = interactor;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn state(&self) -> TaskViewState {
        lock(&self.screen).state.clone()
    }

    pub fn rows(&self) -> Vec<TaskViewModel> {
        lock(&self.screen).rows.clone()
    }

    pub fn is_activity_visible(&self) -> bool {
        lock(&self.screen).activity
    }

    pub fn alert(&self) -> Option<Dialog> {
        lock(&self.screen).alert.clone()
    }

    pub fn action_sheet(&self) -> Option<Dialog> {
        lock(&self.screen).action_sheet.clone()
    }

    pub fn focused_row(&self) -> Option<Identifier> {
        lock(&self.screen).focused.clone()
    }

    pub async fn load(&self) -> Result<(), InteractorError> {
        match self.interactor() {
            Some(interactor) => interactor.fetch_items().await,
            None => Ok(()),
        }
    }

    /// Returns whether the tap opened the action sheet
    pub fn tap_row(&self, identifier: &Identifier) -> bool {
        let request = {
            let screen = lock(&self.screen);
            if screen.state.is_editing() {
                return false;
            }
            let Some(row) = screen.rows.iter().find(|row| &row.identifier == identifier) else {
                return false;
            };
            OpenTaskActionsRequest {
                identifier: row.identifier.clone(),
                name: row.name.clone(),
                is_done: row.is_done,
            }
        };
        match self.interactor() {
            Some(interactor) => {
                interactor.open_item_actions(request);
                true
            }
            None => false,
        }
    }

    pub async fn tap_add(&self) -> Result<(), InteractorError> {
        match self.interactor() {
            Some(interactor) => {
                interactor
                    .create_item(CreateTaskRequest { name: String::new() })
                    .await
            }
            None => Ok(()),
        }
    }

    pub async fn end_editing(&self, identifier: Identifier, name: String) -> Result<(), InteractorError> {
        lock(&self.screen).focused = None;
        match self.interactor() {
            Some(interactor) => {
                interactor
                    .update_item_name(UpdateTaskNameRequest { identifier, name })
                    .await
            }
            None => Ok(()),
        }
    }

    /// Checkbox tap: flip the shown doneness of a row
    pub async fn toggle_done(&self, identifier: Identifier) -> Result<(), InteractorError> {
        let is_done = {
            let screen = lock(&self.screen);
            match screen.rows.iter().find(|row| row.identifier == identifier) {
                Some(row) => !row.is_done,
                None => return Ok(()),
            }
        };
        match self.interactor() {
            Some(interactor) => {
                interactor
                    .update_item_doneness(UpdateTaskDonenessRequest { identifier, is_done })
                    .await
            }
            None => Ok(()),
        }
    }

    pub async fn swipe_to_delete(&self, identifier: Identifier) -> Result<(), InteractorError> {
        match self.interactor() {
            Some(interactor) => interactor.delete_item(DeleteTaskRequest { identifier }).await,
            None => Ok(()),
        }
    }

    pub fn tap_action_sheet(&self, index: usize) -> bool {
        let sheet = lock(&self.screen).action_sheet.take();
        sheet
            .and_then(|sheet| sheet.actions.get(index).cloned())
            .map(|action| action.tap())
            .unwrap_or(false)
    }

    pub fn tap_alert(&self, index: usize) -> bool {
        let alert = lock(&self.screen).alert.take();
        alert
            .and_then(|alert| alert.actions.get(index).cloned())
            .map(|action| action.tap())
            .unwrap_or(false)
    }

    /// Wait for requests started from dialog callbacks
    pub async fn settle(&self) {
        loop {
            let handles = std::mem::take(&mut *lock(&self.pending));
            if handles.is_empty() {
                break;
            }
            for handle in handles {
                if let Err(e) = handle.await {
                    log::error!("Task request task failed: {}", e);
                }
            }
        }
    }

    fn interactor(&self) -> Option<Arc<TaskInteractor>> {
        let interactor = lock(&self.interactor).upgrade();
        if interactor.is_none() {
            log::debug!("Task module is gone, ignoring intent");
        }
        interactor
    }

    fn spawn_request<F, Fut>(&self, request: F)
    where
        F: FnOnce(Arc<TaskInteractor>) -> Fut,
        Fut: Future<Output = Result<(), InteractorError>> + Send + 'static,
    {
        let Some(interactor) = self.interactor() else {
            return;
        };
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            log::warn!("No async runtime, dropping task request");
            return;
        };
        let request = request(interactor);
        let handle = runtime.spawn(async move {
            if let Err(e) = request.await {
                log::warn!("{}", e);
            }
        });
        let mut pending = lock(&self.pending);
        pending.retain(|handle| !handle.is_finished());
        pending.push(handle);
    }
}

impl TaskViewInput for TaskViewController {
    fn render(&self, state: TaskViewState) {
        let focus = {
            let mut screen = lock(&self.screen);
            let focus = match &state {
                ViewState::Loading => {
                    screen.activity = true;
                    None
                }
                ViewState::Error(dialog) => {
                    screen.activity = false;
                    screen.alert = Some(dialog.clone());
                    None
                }
                ViewState::Result { items, focus } => {
                    screen.activity = false;
                    screen.rows = items.clone();
                    screen.focused = None;
                    focus.clone()
                }
                ViewState::Editing(identifier) => {
                    screen.activity = false;
                    screen.focused = Some(identifier.clone());
                    None
                }
            };
            screen.state = state;
            focus
        };

        if let Some(identifier) = focus {
            if let Some(interactor) = self.interactor() {
                interactor.open_item_editing(OpenTaskEditingRequest { identifier });
            }
        }
    }

    fn show_action_sheet(&self, dialog: Dialog) {
        lock(&self.screen).action_sheet = Some(dialog);
    }

    fn show_editing(&self, identifier: Identifier) {
        self.render(ViewState::Editing(identifier));
    }

    fn delete_item(&self, identifier: Identifier) {
        self.spawn_request(move |interactor| async move {
            interactor.delete_item(DeleteTaskRequest { identifier }).await
        });
    }

    fn set_done(&self, identifier: Identifier, is_done: bool) {
        self.spawn_request(move |interactor| async move {
            interactor
                .update_item_doneness(UpdateTaskDonenessRequest { identifier, is_done })
                .await
        });
    }
}
