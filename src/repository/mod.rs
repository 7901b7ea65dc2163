//! Repository Layer
//!
//! Storage collaborator contracts and their implementations.

mod traits;
mod db;
mod list_repo;
mod task_repo;
mod memory;


pub use traits::{ListStorage, TaskStorage};
pub use db::{open_connection, SqliteStorage};
pub use memory::InMemoryStorage;
