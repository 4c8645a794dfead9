//! UI Components
//!
//! Leptos components of the todo page.

mod composer;
mod filter_bar;
mod status_line;
mod theme_toggle;
mod todo_footer;
mod todo_item;

pub use composer::Composer;
pub use filter_bar::FilterBar;
pub use status_line::StatusLine;
pub use theme_toggle::ThemeToggle;
pub use todo_footer::TodoFooter;
pub use todo_item::TodoItem;
