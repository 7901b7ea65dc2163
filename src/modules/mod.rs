//! Feature Modules
//!
//! Each module wires a view to an interactor (requests, storage calls) and
//! a presenter (responses to view state):
//! - list: all lists
//! - task: the tasks of one list

pub mod dialog;
mod guard;
pub mod list;
pub mod task;
mod view_state;

#[cfg(test)]
pub(crate) mod test_support;

pub use dialog::{ActionStyle, Dialog, DialogAction, DialogBuilder};
pub use guard::{InteractorError, RequestGuard, RequestPermit};
pub use view_state::{ViewModel, ViewState};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a view-side mutex, recovering the data if a holder panicked
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
