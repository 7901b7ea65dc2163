//! Display state shared by the list and task modules.

use super::dialog::Dialog;
use crate::domain::Identifier;

/// A row the view can display and address by identifier
pub trait ViewModel: Clone + PartialEq + Send + Sync {
    fn identifier(&self) -> &Identifier;
}

/// The single authoritative display mode of a module's view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    /// A request is outstanding
    Loading,
    /// Fresh items from storage, optionally with a row to focus for editing
    Result {
        items: Vec<T>,
        focus: Option<Identifier>,
    },
    Error(Dialog),
    /// The row being edited inline
    Editing(Identifier),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Loading
    }
}

impl<T> ViewState<T> {
    pub fn is_editing(&self) -> bool {
        matches!(self, ViewState::Editing(_))
    }
}

/// Keep `focus` only if it names one of `items`
pub(crate) fn retain_focus<T: ViewModel>(items: &[T], focus: Option<Identifier>) -> Option<Identifier> {
    let focus = focus?;
    if items.iter().any(|item| item.identifier() == &focus) {
        Some(focus)
    } else {
        log::warn!("Focus target {} missing from fetched items, dropping it", focus);
        None
    }
}
