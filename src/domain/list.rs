//! List Entity
//!
//! A named container of tasks. Tasks reference their list by identifier;
//! a list never holds task values itself.

use serde::{Deserialize, Serialize};

use super::Identifier;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    /// Assigned by storage on creation
    pub identifier: Option<Identifier>,
    pub name: String,
}

impl List {
    /// Create a list that has not been persisted yet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            identifier: None,
            name: name.into(),
        }
    }

    pub fn with_identifier(identifier: Identifier, name: impl Into<String>) -> Self {
        Self {
            identifier: Some(identifier),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_creation() {
        let list = List::new("Groceries");
        assert_eq!(list.name, "Groceries");
        assert!(list.identifier.is_none());

        let stored = List::with_identifier(Identifier::new("L1"), "Groceries");
        assert_eq!(stored.identifier, Some(Identifier::new("L1")));
    }
}
