//! Dialog models for alerts and action sheets.
//!
//! A dialog is built fresh for every event and never persisted.

use std::fmt;
use std::sync::Arc;

use crate::domain::StorageError;

pub const OK_TITLE: &str = "OK";
pub const CANCEL_TITLE: &str = "Cancel";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal error 😕 Please try again!";
pub const INCORRECT_INPUT_MESSAGE: &str = "Incorrect input in the database 🤔";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStyle {
    Default,
    Cancel,
    Destructive,
}

pub type ActionCallback = Arc<dyn Fn() + Send + Sync>;

/// One button of a dialog
#[derive(Clone)]
pub struct DialogAction {
    pub title: String,
    pub style: ActionStyle,
    on_tap: Option<ActionCallback>,
}

impl DialogAction {
    pub fn new<F>(title: impl Into<String>, style: ActionStyle, on_tap: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            title: title.into(),
            style,
            on_tap: Some(Arc::new(on_tap)),
        }
    }

    /// An action that only closes the dialog
    pub fn dismiss(title: impl Into<String>, style: ActionStyle) -> Self {
        Self {
            title: title.into(),
            style,
            on_tap: None,
        }
    }

    pub fn has_callback(&self) -> bool {
        self.on_tap.is_some()
    }

    /// Run the callback, if any. Returns whether one ran.
    pub fn tap(&self) -> bool {
        match &self.on_tap {
            Some(on_tap) => {
                on_tap();
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for DialogAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogAction")
            .field("title", &self.title)
            .field("style", &self.style)
            .field("has_callback", &self.has_callback())
            .finish()
    }
}

/// Callbacks are opaque, so two actions are equal when they look the same
impl PartialEq for DialogAction {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
            && self.style == other.style
            && self.has_callback() == other.has_callback()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dialog {
    pub title: Option<String>,
    pub message: Option<String>,
    pub actions: Vec<DialogAction>,
}

impl Dialog {
    /// Alert for a failed storage call, with a single "OK" dismissal
    pub fn storage_error(error: StorageError) -> Self {
        DialogBuilder::new()
            .message(error_message(error))
            .action(DialogAction::dismiss(OK_TITLE, ActionStyle::Default))
            .build()
    }
}

/// User-visible text for a storage failure
pub fn error_message(error: StorageError) -> &'static str {
    if error.is_internal() {
        INTERNAL_ERROR_MESSAGE
    } else {
        INCORRECT_INPUT_MESSAGE
    }
}

#[derive(Debug, Default)]
pub struct DialogBuilder {
    dialog: Dialog,
}

impl DialogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.dialog.title = Some(title.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.dialog.message = Some(message.into());
        self
    }

    pub fn action(mut self, action: DialogAction) -> Self {
        self.dialog.actions.push(action);
        self
    }

    pub fn build(self) -> Dialog {
        self.dialog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_error_dialog_for_every_kind() {
        let cases = [
            (StorageError::InternalError, INTERNAL_ERROR_MESSAGE),
            (StorageError::CannotCreate, INCORRECT_INPUT_MESSAGE),
            (StorageError::CannotDelete, INCORRECT_INPUT_MESSAGE),
            (StorageError::CannotUpdate, INCORRECT_INPUT_MESSAGE),
            (StorageError::CannotFetch, INCORRECT_INPUT_MESSAGE),
        ];
        for (error, text) in cases {
            let dialog = Dialog::storage_error(error);
            assert_eq!(dialog.message.as_deref(), Some(text));
            assert_eq!(dialog.actions.len(), 1);
            assert_eq!(dialog.actions[0].title, OK_TITLE);
            assert!(!dialog.actions[0].tap());
        }
    }

    #[test]
    fn test_action_tap_runs_callback() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let action = DialogAction::new("Go", ActionStyle::Default, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(action.tap());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_builder_keeps_action_order() {
        let dialog = DialogBuilder::new()
            .title("Pick")
            .action(DialogAction::dismiss("first", ActionStyle::Default))
            .action(DialogAction::dismiss("second", ActionStyle::Cancel))
            .build();
        let titles: Vec<_> = dialog.actions.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["first", "second"]);
        assert_eq!(dialog.title.as_deref(), Some("Pick"));
        assert!(dialog.message.is_none());
    }
}
