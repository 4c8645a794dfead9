//! In-flight Operation Registry
//!
//! Allows at most one pending mutation per key. Acquiring returns a guard
//! that frees the key when dropped, whether the request succeeded or not.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use crate::model::TodoId;

/// Key identifying a pending mutation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OpKey {
    /// Creating a new todo from the composer
    Create,
    /// Any mutation of an existing todo
    Todo(TodoId),
}

impl fmt::Display for OpKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpKey::Create => f.write_str("create"),
            OpKey::Todo(id) => write!(f, "update of todo {}", id),
        }
    }
}

/// Shared set of keys with a request in progress
#[derive(Clone, Default)]
pub struct InFlight {
    keys: Rc<RefCell<HashSet<OpKey>>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `key`, or `None` if it is already claimed
    pub fn try_acquire(&self, key: OpKey) -> Option<InFlightGuard> {
        if !self.keys.borrow_mut().insert(key.clone()) {
            return None;
        }
        Some(InFlightGuard {
            keys: Rc::clone(&self.keys),
            key,
        })
    }

    pub fn is_pending(&self, key: &OpKey) -> bool {
        self.keys.borrow().contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.borrow().is_empty()
    }
}

impl fmt::Debug for InFlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.keys.borrow().iter()).finish()
    }
}

/// Releases its key on drop
pub struct InFlightGuard {
    keys: Rc<RefCell<HashSet<OpKey>>>,
    key: OpKey,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.keys.borrow_mut().remove(&self.key);
    }
}
