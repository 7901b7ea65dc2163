//! Module assembly root.
//!
//! Owns the storage and builds list and task screens on demand.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::domain::Identifier;
use crate::error::{AppError, AppResult};
use crate::modules::list::{self, ListModule, ListRouter, ListViewController};
use crate::modules::task::{self, TaskModule, TaskViewController};
use crate::repository::{InMemoryStorage, ListStorage, SqliteStorage, TaskStorage};

pub struct TodoApp {
    config: AppConfig,
    lists: Arc<dyn ListStorage>,
    tasks: Arc<dyn TaskStorage>,
}

impl TodoApp {
    /// Start logging, then open storage
    pub async fn launch(config: AppConfig) -> AppResult<Self> {
        init_logging(&config)?;
        Self::open(config).await
    }

    /// Open the storage selected by `config`
    pub async fn open(config: AppConfig) -> AppResult<Self> {
        if config.in_memory {
            log::info!("Using in-memory storage");
            return Ok(Self::with_storage(config, Arc::new(InMemoryStorage::new())));
        }

        std::fs::create_dir_all(&config.data_dir).map_err(|source| AppError::CreateDir {
            path: config.data_dir.clone(),
            source,
        })?;
        let storage = SqliteStorage::open(&config.db_path()).await?;
        Ok(Self::with_storage(config, Arc::new(storage)))
    }

    pub fn with_storage<S>(config: AppConfig, storage: Arc<S>) -> Self
    where
        S: ListStorage + TaskStorage + 'static,
    {
        let lists: Arc<dyn ListStorage> = storage.clone();
        let tasks: Arc<dyn TaskStorage> = storage;
        Self {
            config,
            lists,
            tasks,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Build the list screen; the caller keeps the module alive
    pub fn list_module(&self, router: Arc<dyn ListRouter>) -> (ListModule, Arc<ListViewController>) {
        let view = ListViewController::new(router);
        let module = list::assemble(Arc::clone(&self.lists), view.clone());
        view.bind(module.interactor());
        (module, view)
    }

    /// Build the task screen of one list
    pub fn task_module(
        &self,
        list_identifier: Identifier,
        list_name: &str,
    ) -> (TaskModule, Arc<TaskViewController>) {
        let view = TaskViewController::new(list_name);
        let module = task::assemble(list_identifier, Arc::clone(&self.tasks), view.clone());
        view.bind(module.interactor());
        (module, view)
    }
}

/// Install the rolling file logger
pub fn init_logging(config: &AppConfig) -> AppResult<()> {
    rolling_logger::init_logger(config.log_dir.clone(), &config.app_name).map_err(AppError::Logger)?;
    let _ = rolling_logger::info(&format!("{} logging started", config.app_name));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::ViewState;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Navigator {
        opened: Mutex<Vec<(Identifier, String)>>,
    }

    impl ListRouter for Navigator {
        fn open_tasks(&self, list_identifier: Identifier, name: String) {
            self.opened.lock().unwrap().push((list_identifier, name));
        }
    }

    #[tokio::test]
    async fn test_lists_and_tasks_share_storage() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_dir: dir.path().join("data"),
            ..AppConfig::default()
        };
        let app = TodoApp::open(config).await.expect("app opens");
        let navigator = Arc::new(Navigator::default());

        let (_lists_module, lists_view) = app.list_module(navigator.clone());
        lists_view.tap_add().await.unwrap();
        let list_id = lists_view.rows()[0].identifier.clone();
        lists_view.end_editing(list_id.clone(), "Groceries".into()).await.unwrap();

        assert!(lists_view.tap_row(&list_id));
        assert!(lists_view.tap_action_sheet(2));
        let (opened_id, opened_name) = navigator.opened.lock().unwrap()[0].clone();
        assert_eq!(opened_name, "Groceries");

        let (_tasks_module, tasks_view) = app.task_module(opened_id, &opened_name);
        tasks_view.tap_add().await.unwrap();
        let task_id = tasks_view.rows()[0].identifier.clone();
        tasks_view.end_editing(task_id.clone(), "Milk".into()).await.unwrap();
        tasks_view.toggle_done(task_id).await.unwrap();
        assert!(tasks_view.rows()[0].is_done);

        // Deleting the list takes its tasks with it
        lists_view.swipe_to_delete(list_id).await.unwrap();
        assert_eq!(lists_view.state(), ViewState::Result { items: vec![], focus: None });
        tasks_view.load().await.unwrap();
        assert!(matches!(tasks_view.state(), ViewState::Error(_)));
        assert!(app.config().db_path().exists());
    }

    #[tokio::test]
    async fn test_in_memory_config_skips_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_dir: dir.path().join("data"),
            in_memory: true,
            ..AppConfig::default()
        };
        let app = TodoApp::open(config).await.unwrap();
        let (_module, view) = app.list_module(Arc::new(Navigator::default()));

        view.load().await.unwrap();

        assert_eq!(view.state(), ViewState::Result { items: vec![], focus: None });
        assert!(!app.config().db_path().exists());
    }
}
