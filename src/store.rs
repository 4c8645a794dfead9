//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;
use todo_sync::{Filter, Todo, TodoCollection};

use crate::models::Theme;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Full todo collection, mirrored from the server
    pub todos: Vec<Todo>,
    /// Selected filter; resets to All on reload
    pub filter: Filter,
    /// Light/dark switch, not persisted
    pub theme: Theme,
    /// Last failure shown to the user, cleared by the next success
    pub status_message: Option<String>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// The store's `todos` field as the state manager's collection.
///
/// Writes go through the store so every view reading `todos` re-renders.
#[derive(Clone, Copy)]
pub struct StoreTodos(pub AppStore);

impl TodoCollection for StoreTodos {
    fn snapshot(&self) -> Vec<Todo> {
        self.0.todos().get_untracked()
    }

    fn replace(&self, todos: Vec<Todo>) {
        *self.0.todos().write() = todos;
    }

    fn update<R>(&self, f: impl FnOnce(&mut Vec<Todo>) -> R) -> R {
        let field = self.0.todos();
        let mut todos = field.write();
        f(&mut *todos)
    }
}
