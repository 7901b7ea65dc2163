//! Todo Application Layer
//!
//! Layered architecture:
//! - domain: Lists, tasks and storage errors
//! - repository: Storage contracts and implementations
//! - modules: Interactors, presenters and views of the list and task screens
//! - app: Assembly root wiring storage, logging and modules

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod modules;
pub mod repository;

pub use app::{init_logging, TodoApp};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
