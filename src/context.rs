//! Application Context
//!
//! Shared state manager provided via Leptos Context API.

use leptos::prelude::*;
use todo_sync::{
    ClearReport, Filter, RestClient, Status, SyncError, Todo, TodoApi, TodoId, TodoManager,
};

use crate::store::{AppStateStoreFields, AppStore, StoreTodos};

/// State manager bound to the app store
pub type Manager<A> = TodoManager<A, StoreTodos>;

/// App-wide handle for todo operations.
///
/// Each method runs one state manager operation and records its outcome in
/// the status line.
pub struct AppContext<A: 'static = RestClient> {
    store: AppStore,
    /// The manager holds `Rc`s, so it lives in local arena storage
    manager: StoredValue<Manager<A>, LocalStorage>,
}

impl<A: 'static> Clone for AppContext<A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: 'static> Copy for AppContext<A> {}

impl<A: TodoApi + 'static> AppContext<A> {
    pub fn new(store: AppStore, manager: Manager<A>) -> Self {
        Self {
            store,
            manager: StoredValue::new_local(manager),
        }
    }

    fn manager(&self) -> Manager<A> {
        self.manager.get_value()
    }

    /// Reload the whole collection; resets the filter on success
    pub async fn load(self) -> Result<usize, SyncError> {
        let result = self.manager().load().await;
        if result.is_ok() {
            self.store.filter().set(Filter::All);
        }
        self.report("load todos", &result);
        result
    }

    pub async fn create(self, text: String) -> Result<Todo, SyncError> {
        let result = self.manager().create(&text).await;
        self.report("add todo", &result);
        result
    }

    pub async fn toggle(self, id: TodoId) -> Result<Status, SyncError> {
        let result = self.manager().toggle(&id).await;
        self.report("update todo", &result);
        result
    }

    pub async fn delete(self, id: TodoId) -> Result<(), SyncError> {
        let result = self.manager().delete(&id).await;
        self.report("delete todo", &result);
        result
    }

    pub async fn clear_completed(self) -> ClearReport {
        let report = self.manager().clear_completed().await;
        let message = match report.failed.len() {
            0 => None,
            1 => Some("Could not delete 1 completed todo on the server".to_string()),
            n => Some(format!("Could not delete {} completed todos on the server", n)),
        };
        self.store.status_message().set(message);
        report
    }

    /// Show a failure in the status line, or clear it on success
    fn report<T>(&self, action: &str, result: &Result<T, SyncError>) {
        match result {
            Ok(_) => self.store.status_message().set(None),
            Err(err) if err.is_reportable() => {
                self.store
                    .status_message()
                    .set(Some(format!("Could not {}: {}", action, err)));
            }
            Err(_) => {}
        }
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
