//! Filter Utilities
//!
//! Derives the visible subset of todos from the full collection.

use crate::model::{Status, Todo};

/// Which todos are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

/// Filter options in display order
pub const FILTERS: &[(Filter, &str)] = &[
    (Filter::All, "All"),
    (Filter::Active, "Active"),
    (Filter::Completed, "Completed"),
];

impl Filter {
    pub fn matches(&self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => todo.status == Status::Active,
            Filter::Completed => todo.status == Status::Completed,
        }
    }

    /// Visible subset, in the collection's order
    pub fn apply(&self, todos: &[Todo]) -> Vec<Todo> {
        todos.iter().filter(|todo| self.matches(todo)).cloned().collect()
    }
}
