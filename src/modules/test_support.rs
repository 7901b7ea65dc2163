//! Recording views and scriptable storage for module tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tokio::sync::Semaphore;

use super::list::{ListRouter, ListViewInput, ListViewState};
use super::task::{TaskViewInput, TaskViewState};
use super::{lock, Dialog};
use crate::domain::{Identifier, List, StorageError, StorageResult, Task};
use crate::repository::{InMemoryStorage, ListStorage, TaskStorage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListViewEvent {
    ShowEditing(Identifier),
    DeleteItem(Identifier),
    OpenTasks(Identifier, String),
}

#[derive(Default)]
pub struct RecordingListView {
    states: Mutex<Vec<ListViewState>>,
    action_sheets: Mutex<Vec<Dialog>>,
    intents: Mutex<Vec<ListViewEvent>>,
}

impl RecordingListView {
    pub fn states(&self) -> Vec<ListViewState> {
        lock(&self.states).clone()
    }

    pub fn last_state(&self) -> Option<ListViewState> {
        lock(&self.states).last().cloned()
    }

    pub fn last_action_sheet(&self) -> Option<Dialog> {
        lock(&self.action_sheets).last().cloned()
    }

    pub fn intents(&self) -> Vec<ListViewEvent> {
        lock(&self.intents).clone()
    }
}

impl ListViewInput for RecordingListView {
    fn render(&self, state: ListViewState) {
        lock(&self.states).push(state);
    }

    fn show_action_sheet(&self, dialog: Dialog) {
        lock(&self.action_sheets).push(dialog);
    }

    fn show_editing(&self, identifier: Identifier) {
        lock(&self.intents).push(ListViewEvent::ShowEditing(identifier));
    }

    fn delete_item(&self, identifier: Identifier) {
        lock(&self.intents).push(ListViewEvent::DeleteItem(identifier));
    }

    fn open_tasks(&self, identifier: Identifier, name: String) {
        lock(&self.intents).push(ListViewEvent::OpenTasks(identifier, name));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskViewEvent {
    ShowEditing(Identifier),
    DeleteItem(Identifier),
    SetDone(Identifier, bool),
}

#[derive(Default)]
pub struct RecordingTaskView {
    states: Mutex<Vec<TaskViewState>>,
    action_sheets: Mutex<Vec<Dialog>>,
    intents: Mutex<Vec<TaskViewEvent>>,
}

impl RecordingTaskView {
    pub fn states(&self) -> Vec<TaskViewState> {
        lock(&self.states).clone()
    }

    pub fn last_state(&self) -> Option<TaskViewState> {
        lock(&self.states).last().cloned()
    }

    pub fn last_action_sheet(&self) -> Option<Dialog> {
        lock(&self.action_sheets).last().cloned()
    }

    pub fn intents(&self) -> Vec<TaskViewEvent> {
        lock(&self.intents).clone()
    }
}

impl TaskViewInput for RecordingTaskView {
    fn render(&self, state: TaskViewState) {
        lock(&self.states).push(state);
    }

    fn show_action_sheet(&self, dialog: Dialog) {
        lock(&self.action_sheets).push(dialog);
    }

    fn show_editing(&self, identifier: Identifier) {
        lock(&self.intents).push(TaskViewEvent::ShowEditing(identifier));
    }

    fn delete_item(&self, identifier: Identifier) {
        lock(&self.intents).push(TaskViewEvent::DeleteItem(identifier));
    }

    fn set_done(&self, identifier: Identifier, is_done: bool) {
        lock(&self.intents).push(TaskViewEvent::SetDone(identifier, is_done));
    }
}

#[derive(Default)]
pub struct RecordingRouter {
    opened: Mutex<Vec<(Identifier, String)>>,
}

impl RecordingRouter {
    pub fn opened(&self) -> Vec<(Identifier, String)> {
        lock(&self.opened).clone()
    }
}

impl ListRouter for RecordingRouter {
    fn open_tasks(&self, list_identifier: Identifier, name: String) {
        lock(&self.opened).push((list_identifier, name));
    }
}

/// In-memory storage that records calls, fails on demand and can hold
/// every call until released.
pub struct ScriptedStorage {
    inner: InMemoryStorage,
    calls: Mutex<Vec<&'static str>>,
    failures: Mutex<HashMap<&'static str, StorageError>>,
    next_identifier: Mutex<Option<Identifier>>,
    held: AtomicBool,
    gate: Semaphore,
}

impl ScriptedStorage {
    pub fn new() -> Self {
        Self {
            inner: InMemoryStorage::new(),
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
            next_identifier: Mutex::new(None),
            held: AtomicBool::new(false),
            gate: Semaphore::new(0),
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        lock(&self.calls).clone()
    }

    /// Make the next `operation` call fail with `error`
    pub fn fail(&self, operation: &'static str, error: StorageError) {
        lock(&self.failures).insert(operation, error);
    }

    /// Identifier assigned by the next create call
    pub fn next_list_identifier(&self, identifier: &str) {
        *lock(&self.next_identifier) = Some(Identifier::new(identifier));
    }

    pub async fn seed_list(&self, identifier: &str, name: &str) {
        self.inner
            .create_list(&List::with_identifier(Identifier::new(identifier), name))
            .await
            .expect("seed list");
    }

    pub async fn seed_task(&self, list_id: &str, identifier: &str, name: &str, is_done: bool) {
        let task = Task {
            identifier: Identifier::new(identifier),
            name: name.to_string(),
            is_done,
        };
        self.inner
            .create_task(&Identifier::new(list_id), &task)
            .await
            .expect("seed task");
    }

    pub fn hold(&self) {
        self.held.store(true, Ordering::SeqCst);
    }

    pub fn release(&self) {
        self.held.store(false, Ordering::SeqCst);
        self.gate.add_permits(1024);
    }

    pub async fn wait_for_calls(&self, count: usize) {
        for _ in 0..1000 {
            if lock(&self.calls).len() >= count {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("storage never saw {} calls", count);
    }

    async fn enter(&self, operation: &'static str) -> StorageResult<()> {
        lock(&self.calls).push(operation);
        if self.held.load(Ordering::SeqCst) {
            let _ = self.gate.acquire().await;
        }
        match lock(&self.failures).remove(operation) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ListStorage for ScriptedStorage {
    async fn fetch_lists(&self) -> StorageResult<Vec<List>> {
        self.enter("fetch_lists").await?;
        self.inner.fetch_lists().await
    }

    async fn create_list(&self, list: &List) -> StorageResult<Identifier> {
        self.enter("create_list").await?;
        let mut list = list.clone();
        if let Some(identifier) = lock(&self.next_identifier).take() {
            list.identifier = Some(identifier);
        }
        self.inner.create_list(&list).await
    }

    async fn update_list(&self, identifier: &Identifier, name: Option<&str>) -> StorageResult<()> {
        self.enter("update_list").await?;
        self.inner.update_list(identifier, name).await
    }

    async fn delete_list(&self, identifier: &Identifier) -> StorageResult<()> {
        self.enter("delete_list").await?;
        self.inner.delete_list(identifier).await
    }
}

#[async_trait]
impl TaskStorage for ScriptedStorage {
    async fn fetch_tasks(&self, list_id: &Identifier) -> StorageResult<Vec<Task>> {
        self.enter("fetch_tasks").await?;
        self.inner.fetch_tasks(list_id).await
    }

    async fn create_task(&self, list_id: &Identifier, task: &Task) -> StorageResult<Identifier> {
        self.enter("create_task").await?;
        self.inner.create_task(list_id, task).await
    }

    async fn update_task(
        &self,
        task_id: &Identifier,
        name: Option<&str>,
        is_done: Option<bool>,
    ) -> StorageResult<()> {
        self.enter("update_task").await?;
        self.inner.update_task(task_id, name, is_done).await
    }

    async fn delete_task(&self, task_id: &Identifier) -> StorageResult<()> {
        self.enter("delete_task").await?;
        self.inner.delete_task(task_id).await
    }
}
