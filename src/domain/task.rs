//! Task Entity
//!
//! A named, completable item owned by exactly one list.

use serde::{Deserialize, Serialize};

use super::Identifier;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub identifier: Identifier,
    pub name: String,
    /// Completion status
    pub is_done: bool,
}

impl Task {
    /// Create a new, not yet completed task with a fresh identifier
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            identifier: Identifier::generate(),
            name: name.into(),
            is_done: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_creation() {
        let task = Task::new("Milk");
        assert_eq!(task.name, "Milk");
        assert!(!task.is_done);
    }
}
