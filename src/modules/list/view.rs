//! View contract of the list module and a headless view controller.
//!
//! The controller keeps what a screen would draw (rows, activity
//! indicator, alert, action sheet, focused row) and forwards user intents
//! to the interactor through a non-owning handle.

use std::future::Future;
use std::sync::{Arc, Mutex, Weak};

use tokio::task::JoinHandle;

use super::data_flow::{
    CreateListRequest, DeleteListRequest, ListViewModel, ListViewState, OpenListActionsRequest,
    OpenListEditingRequest, UpdateListRequest,
};
use super::interactor::ListInteractor;
use crate::domain::Identifier;
use crate::modules::{lock, Dialog, InteractorError, ViewState};

/// What the presenter drives
pub trait ListViewInput: Send + Sync {
    fn render(&self, state: ListViewState);
    fn show_action_sheet(&self, dialog: Dialog);
    fn show_editing(&self, identifier: Identifier);
    fn delete_item(&self, identifier: Identifier);
    fn open_tasks(&self, identifier: Identifier, name: String);
}

/// Navigation out of the list screen
pub trait ListRouter: Send + Sync {
    fn open_tasks(&self, list_identifier: Identifier, name: String);
}

#[derive(Debug, Default)]
struct Screen {
    state: ListViewState,
    rows: Vec<ListViewModel>,
    activity: bool,
    alert: Option<Dialog>,
    action_sheet: Option<Dialog>,
    focused: Option<Identifier>,
}

pub struct ListViewController {
    screen: Mutex<Screen>,
    interactor: Mutex<Weak<ListInteractor>>,
    router: Arc<dyn ListRouter>,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl ListViewController {
    pub fn new(router: Arc<dyn ListRouter>) -> Arc<Self> {
        Arc::new(Self {
            screen: Mutex::new(Screen::default()),
            interactor: Mutex::new(Weak::new()),
            router,
            pending: Mutex::new(Vec::new()),
        })
    }

    pub fn bind(&self, interactor: Weak<ListInteractor>) {
        *lock(&self.interactor) = interactor;
    }

    pub fn state(&self) -> ListViewState {
        lock(&self.screen).state.clone()
    }

    pub fn rows(&self) -> Vec<ListViewModel> {
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

    /// Initial load of the screen
    pub async fn load(&self) -> Result<(), InteractorError> {
        match self.interactor() {
            Some(interactor) => interactor.fetch_items().await,
            None => Ok(()),
        }
    }

    /// Tap on a row opens its action sheet, except while a row is edited.
    /// Returns whether the tap was handled.
    pub fn tap_row(&self, identifier: &Identifier) -> bool {
        let request = {
            let screen = lock(&self.screen);
            if screen.state.is_editing() {
                return false;
            }
            let Some(row) = screen.rows.iter().find(|row| &row.identifier == identifier) else {
                return false;
            };
            OpenListActionsRequest {
                identifier: row.identifier.clone(),
                name: row.name.clone(),
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
                    .create_item(CreateListRequest { name: String::new() })
                    .await
            }
            None => Ok(()),
        }
    }

    /// Inline rename finished
    pub async fn end_editing(&self, identifier: Identifier, name: String) -> Result<(), InteractorError> {
        lock(&self.screen).focused = None;
        match self.interactor() {
            Some(interactor) => {
                interactor
                    .update_item(UpdateListRequest { identifier, name })
                    .await
            }
            None => Ok(()),
        }
    }

    pub async fn swipe_to_delete(&self, identifier: Identifier) -> Result<(), InteractorError> {
        match self.interactor() {
            Some(interactor) => interactor.delete_item(DeleteListRequest { identifier }).await,
            None => Ok(()),
        }
    }

    /// Tap an action of the visible action sheet, closing it
    pub fn tap_action_sheet(&self, index: usize) -> bool {
        let sheet = lock(&self.screen).action_sheet.take();
        sheet
            .and_then(|sheet| sheet.actions.get(index).cloned())
            .map(|action| action.tap())
            .unwrap_or(false)
    }

    /// Tap an action of the visible alert, closing it
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
                    log::error!("List request task failed: {}", e);
                }
            }
        }
    }

    fn interactor(&self) -> Option<Arc<ListInteractor>> {
        let interactor = lock(&self.interactor).upgrade();
        if interactor.is_none() {
            log::debug!("List module is gone, ignoring intent");
        }
        interactor
    }

    fn spawn_request<F, Fut>(&self, request: F)
    where
        F: FnOnce(Arc<ListInteractor>) -> Fut,
        Fut: Future<Output = Result<(), InteractorError>> + Send + 'static,
    {
        let Some(interactor) = self.interactor() else {
            return;
        };
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            log::warn!("No async runtime, dropping list request");
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

impl ListViewInput for ListViewController {
    fn render(&self, state: ListViewState) {
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

        // A freshly created list opens straight into inline editing
        if let Some(identifier) = focus {
            if let Some(interactor) = self.interactor() {
                interactor.open_item_editing(OpenListEditingRequest { identifier });
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
            interactor.delete_item(DeleteListRequest { identifier }).await
        });
    }

    fn open_tasks(&self, identifier: Identifier, name: String) {
        self.router.open_tasks(identifier, name);
    }
}
