//! Todo Model
//!
//! Data structures matching the remote todo API.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned todo identifier.
///
/// Opaque to the client. The API may hand out numbers or strings; both are
/// kept in their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<u64> for TodoId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for TodoId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Unsigned(u64),
            Signed(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => TodoId(s),
            RawId::Unsigned(n) => TodoId(n.to_string()),
            RawId::Signed(n) => TodoId(n.to_string()),
        })
    }
}

/// Completion status of a todo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Active,
    Completed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Completed => "completed",
        }
    }

    /// The status a toggle moves to
    pub fn flipped(self) -> Self {
        match self {
            Status::Active => Status::Completed,
            Status::Completed => Status::Active,
        }
    }

    pub fn is_completed(self) -> bool {
        self == Status::Completed
    }
}

/// A todo item as stored by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    /// Display text. The API names this field `todo`.
    #[serde(rename = "todo")]
    pub text: String,
    pub status: Status,
}

impl Todo {
    pub fn new(id: impl Into<TodoId>, text: impl Into<String>, status: Status) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            status,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }
}

// ========================
// Request Bodies
// ========================

/// Body of `POST /api/todos`
#[derive(Debug, Serialize)]
pub struct NewTodo<'a> {
    pub todo: &'a str,
    pub status: Status,
}

/// Body of `PUT /api/todos/{id}`
#[derive(Debug, Serialize)]
pub struct StatusUpdate {
    pub status: Status,
}

/// Number of todos not yet completed
pub fn items_left(todos: &[Todo]) -> usize {
    todos.iter().filter(|todo| !todo.is_completed()).count()
}
