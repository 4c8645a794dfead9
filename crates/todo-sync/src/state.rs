//! Todo List State Manager
//!
//! Keeps the local todo collection in step with the remote store. Every
//! mutation goes through here: the request is issued first and the local
//! collection follows the outcome, except for toggle, which applies a
//! tentative flip and rolls it back if the server refuses it.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use futures::future::join_all;

use crate::api::TodoApi;
use crate::error::{ApiError, SyncError};
use crate::inflight::{InFlight, OpKey};
use crate::model::{Status, Todo, TodoId};

/// Storage for the local todo collection.
///
/// The UI implements this on its reactive store so writes re-render views.
pub trait TodoCollection {
    /// Copy of the current collection
    fn snapshot(&self) -> Vec<Todo>;

    /// Replace the whole collection
    fn replace(&self, todos: Vec<Todo>);

    /// Mutate the collection in place
    fn update<R>(&self, f: impl FnOnce(&mut Vec<Todo>) -> R) -> R;
}

impl TodoCollection for Rc<RefCell<Vec<Todo>>> {
    fn snapshot(&self) -> Vec<Todo> {
        self.borrow().clone()
    }

    fn replace(&self, todos: Vec<Todo>) {
        *self.borrow_mut() = todos;
    }

    fn update<R>(&self, f: impl FnOnce(&mut Vec<Todo>) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

/// Outcome of clearing completed todos
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearReport {
    /// Todos removed from the local collection
    pub removed: usize,
    /// Deletions the server did not confirm. These todos are gone locally
    /// but may still exist remotely.
    pub failed: Vec<(TodoId, ApiError)>,
}

impl ClearReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Synchronizes user intents with the remote todo store
pub struct TodoManager<A, C> {
    api: Rc<A>,
    todos: C,
    in_flight: InFlight,
}

impl<A, C: Clone> Clone for TodoManager<A, C> {
    fn clone(&self) -> Self {
        Self {
            api: Rc::clone(&self.api),
            todos: self.todos.clone(),
            in_flight: self.in_flight.clone(),
        }
    }
}

impl<A: TodoApi, C: TodoCollection> TodoManager<A, C> {
    pub fn new(api: A, todos: C) -> Self {
        Self {
            api: Rc::new(api),
            todos,
            in_flight: InFlight::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn todos(&self) -> &C {
        &self.todos
    }

    pub fn in_flight(&self) -> &InFlight {
        &self.in_flight
    }

    /// Replace the local collection with the server's.
    ///
    /// On failure the local collection is left as it was.
    pub async fn load(&self) -> Result<usize, SyncError> {
        let loaded = self
            .api
            .list()
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "failed to load todos"))?;

        let todos = dedup_by_id(loaded);
        let count = todos.len();
        self.todos.replace(todos);
        tracing::info!(count, "loaded todos");
        Ok(count)
    }

    /// Create a todo from user input and prepend the server's copy.
    ///
    /// Blank input is rejected without a request.
    pub async fn create(&self, text: &str) -> Result<Todo, SyncError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SyncError::EmptyText);
        }
        let _guard = self.acquire(OpKey::Create)?;

        let created = self
            .api
            .create(text)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "failed to create todo"))?;

        self.todos.update(|todos| {
            if todos.iter().any(|todo| todo.id == created.id) {
                tracing::warn!(id = %created.id, "server returned an id already present");
            } else {
                todos.insert(0, created.clone());
            }
        });
        tracing::info!(id = %created.id, "created todo");
        Ok(created)
    }

    /// Flip a todo between active and completed.
    ///
    /// The flip is shown immediately and reverted if the server rejects it.
    pub async fn toggle(&self, id: &TodoId) -> Result<Status, SyncError> {
        let _guard = self.acquire(OpKey::Todo(id.clone()))?;

        // Tentative phase
        let confirmed = self
            .todos
            .update(|todos| {
                todos.iter_mut().find(|todo| &todo.id == id).map(|todo| {
                    let previous = todo.status;
                    todo.status = previous.flipped();
                    previous
                })
            })
            .ok_or_else(|| SyncError::UnknownTodo(id.clone()))?;
        let tentative = confirmed.flipped();

        // Confirmation phase
        match self.api.update_status(id, tentative).await {
            Ok(()) => {
                tracing::debug!(%id, status = tentative.as_str(), "toggled todo");
                Ok(tentative)
            }
            Err(err) => {
                tracing::warn!(%id, error = %err, "failed to update todo status, rolling back");
                self.todos.update(|todos| {
                    if let Some(todo) = todos.iter_mut().find(|todo| &todo.id == id) {
                        todo.status = confirmed;
                    }
                });
                Err(err.into())
            }
        }
    }

    /// Delete one todo; the local copy goes only once the server confirms
    pub async fn delete(&self, id: &TodoId) -> Result<(), SyncError> {
        let _guard = self.acquire(OpKey::Todo(id.clone()))?;

        self.api
            .delete(id)
            .await
            .inspect_err(|e| tracing::warn!(%id, error = %e, "failed to delete todo"))?;

        self.todos.update(|todos| todos.retain(|todo| &todo.id != id));
        tracing::info!(%id, "deleted todo");
        Ok(())
    }

    /// Delete every completed todo concurrently.
    ///
    /// Once all requests settle, every attempted todo is dropped locally,
    /// whether or not its deletion succeeded. Completed todos with another
    /// update pending are skipped.
    pub async fn clear_completed(&self) -> ClearReport {
        let mut guards = Vec::new();
        let mut attempted = Vec::new();
        for todo in self.todos.snapshot().into_iter().filter(Todo::is_completed) {
            match self.in_flight.try_acquire(OpKey::Todo(todo.id.clone())) {
                Some(guard) => {
                    guards.push(guard);
                    attempted.push(todo.id);
                }
                None => tracing::debug!(id = %todo.id, "skipping todo with pending update"),
            }
        }
        if attempted.is_empty() {
            return ClearReport::default();
        }

        let results = join_all(attempted.iter().map(|id| self.api.delete(id))).await;
        let failed: Vec<(TodoId, ApiError)> = attempted
            .iter()
            .zip(results)
            .filter_map(|(id, result)| result.err().map(|e| (id.clone(), e)))
            .collect();

        let removed: HashSet<&TodoId> = attempted.iter().collect();
        self.todos.update(|todos| todos.retain(|todo| !removed.contains(&todo.id)));
        drop(guards);

        if failed.is_empty() {
            tracing::info!(removed = attempted.len(), "cleared completed todos");
        } else {
            tracing::warn!(
                removed = attempted.len(),
                failed = failed.len(),
                "cleared completed todos, some deletions failed"
            );
        }
        ClearReport {
            removed: attempted.len(),
            failed,
        }
    }

    fn acquire(&self, key: OpKey) -> Result<crate::inflight::InFlightGuard, SyncError> {
        self.in_flight.try_acquire(key.clone()).ok_or_else(|| {
            tracing::debug!(%key, "rejected overlapping request");
            SyncError::Busy(key)
        })
    }
}

/// Keep the first todo for each id
fn dedup_by_id(todos: Vec<Todo>) -> Vec<Todo> {
    let mut seen = HashSet::new();
    todos
        .into_iter()
        .filter(|todo| seen.insert(todo.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiResult;
    use async_trait::async_trait;
    use std::cell::Cell;

    /// In-memory remote store
    #[derive(Default)]
    struct FakeApi {
        server: RefCell<Vec<Todo>>,
        next_id: Cell<u32>,
        requests: Cell<usize>,
        fail_all: RefCell<Option<ApiError>>,
        fail_delete_of: RefCell<HashSet<TodoId>>,
    }

    impl FakeApi {
        fn with_todos(todos: Vec<Todo>) -> Self {
            let api = Self::default();
            api.next_id.set(100);
            *api.server.borrow_mut() = todos;
            api
        }

        fn fail_with(&self, err: ApiError) {
            *self.fail_all.borrow_mut() = Some(err);
        }

        fn recover(&self) {
            *self.fail_all.borrow_mut() = None;
        }

        async fn begin(&self) -> ApiResult<()> {
            self.requests.set(self.requests.get() + 1);
            tokio::task::yield_now().await;
            match self.fail_all.borrow().clone() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }
    }

    #[async_trait(?Send)]
    impl TodoApi for FakeApi {
        async fn list(&self) -> ApiResult<Vec<Todo>> {
            self.begin().await?;
            Ok(self.server.borrow().clone())
        }

        async fn create(&self, text: &str) -> ApiResult<Todo> {
            self.begin().await?;
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            let todo = Todo::new(id.to_string().as_str(), text, Status::Active);
            self.server.borrow_mut().insert(0, todo.clone());
            Ok(todo)
        }

        async fn update_status(&self, id: &TodoId, status: Status) -> ApiResult<()> {
            self.begin().await?;
            let mut server = self.server.borrow_mut();
            let todo = server.iter_mut().find(|t| &t.id == id).ok_or(ApiError::NotFound)?;
            todo.status = status;
            Ok(())
        }

        async fn delete(&self, id: &TodoId) -> ApiResult<()> {
            self.begin().await?;
            if self.fail_delete_of.borrow().contains(id) {
                return Err(ApiError::Server { status: 500 });
            }
            let mut server = self.server.borrow_mut();
            let before = server.len();
            server.retain(|t| &t.id != id);
            if server.len() == before {
                return Err(ApiError::NotFound);
            }
            Ok(())
        }
    }

    type Manager = TodoManager<FakeApi, Rc<RefCell<Vec<Todo>>>>;

    fn make_todo(id: &str, status: Status) -> Todo {
        Todo::new(id, format!("Todo {}", id), status)
    }

    async fn setup(todos: Vec<Todo>) -> Manager {
        let manager = TodoManager::new(
            FakeApi::with_todos(todos),
            Rc::new(RefCell::new(Vec::new())),
        );
        manager.load().await.expect("initial load");
        manager.api().requests.set(0);
        manager
    }

    fn local_ids(manager: &Manager) -> Vec<String> {
        manager.todos().snapshot().into_iter().map(|t| t.id.to_string()).collect()
    }

    fn status_of(manager: &Manager, id: &str) -> Status {
        manager
            .todos()
            .snapshot()
            .into_iter()
            .find(|t| t.id.as_str() == id)
            .map(|t| t.status)
            .expect("todo present")
    }

    // ========================
    // Load
    // ========================

    #[tokio::test]
    async fn test_load_replaces_collection() {
        let manager = setup(vec![
            make_todo("1", Status::Active),
            make_todo("2", Status::Completed),
        ])
        .await;
        assert_eq!(local_ids(&manager), vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_load_twice_is_identical() {
        let manager = setup(vec![
            make_todo("1", Status::Active),
            make_todo("2", Status::Completed),
        ])
        .await;
        let first = manager.todos().snapshot();
        assert_eq!(manager.load().await, Ok(2));
        assert_eq!(manager.todos().snapshot(), first);
    }

    #[tokio::test]
    async fn test_load_failure_keeps_state() {
        let manager = setup(vec![make_todo("1", Status::Active)]).await;
        manager.api().fail_with(ApiError::Unreachable("offline".into()));

        let result = manager.load().await;

        assert!(matches!(result, Err(SyncError::Api(ApiError::Unreachable(_)))));
        assert_eq!(local_ids(&manager), vec!["1"]);
    }

    #[tokio::test]
    async fn test_load_drops_duplicate_ids() {
        let manager = setup(vec![
            make_todo("1", Status::Active),
            make_todo("1", Status::Completed),
            make_todo("2", Status::Active),
        ])
        .await;
        assert_eq!(local_ids(&manager), vec!["1", "2"]);
        assert_eq!(status_of(&manager, "1"), Status::Active);
    }

    // ========================
    // Create
    // ========================

    #[tokio::test]
    async fn test_create_blank_sends_nothing() {
        let manager = setup(vec![make_todo("1", Status::Active)]).await;

        assert_eq!(manager.create("").await, Err(SyncError::EmptyText));
        assert_eq!(manager.create("   ").await, Err(SyncError::EmptyText));

        assert_eq!(manager.api().requests.get(), 0);
        assert_eq!(local_ids(&manager), vec!["1"]);
    }

    #[tokio::test]
    async fn test_create_prepends_server_copy() {
        let manager = setup(vec![make_todo("1", Status::Active)]).await;

        let created = manager.create("  buy milk ").await.unwrap();

        assert_eq!(created.text, "buy milk");
        assert_eq!(created.status, Status::Active);
        assert_eq!(created.id.as_str(), "100");
        assert_eq!(local_ids(&manager), vec!["100", "1"]);
        assert_eq!(manager.api().requests.get(), 1);
    }

    #[tokio::test]
    async fn test_create_failure_keeps_state() {
        let manager = setup(vec![make_todo("1", Status::Active)]).await;
        manager.api().fail_with(ApiError::Server { status: 500 });

        let result = manager.create("buy milk").await;

        assert_eq!(result, Err(SyncError::Api(ApiError::Server { status: 500 })));
        assert_eq!(local_ids(&manager), vec!["1"]);
        assert!(manager.in_flight().is_empty());
    }

    #[tokio::test]
    async fn test_overlapping_create_rejected() {
        let manager = setup(vec![]).await;

        let (first, second) = futures::join!(manager.create("a"), manager.create("b"));

        assert!(first.is_ok());
        assert_eq!(second, Err(SyncError::Busy(OpKey::Create)));
        assert_eq!(manager.api().requests.get(), 1);
        assert_eq!(manager.todos().snapshot().len(), 1);
    }

    // ========================
    // Toggle
    // ========================

    #[tokio::test]
    async fn test_toggle_flips_and_back() {
        let manager = setup(vec![make_todo("1", Status::Active)]).await;

        assert_eq!(manager.toggle(&"1".into()).await, Ok(Status::Completed));
        assert_eq!(status_of(&manager, "1"), Status::Completed);
        assert_eq!(manager.api().server.borrow()[0].status, Status::Completed);

        assert_eq!(manager.toggle(&"1".into()).await, Ok(Status::Active));
        assert_eq!(status_of(&manager, "1"), Status::Active);
    }

    #[tokio::test]
    async fn test_toggle_failure_rolls_back() {
        let manager = setup(vec![
            make_todo("1", Status::Active),
            make_todo("2", Status::Completed),
        ])
        .await;
        manager.api().fail_with(ApiError::Timeout);

        let result = manager.toggle(&"2".into()).await;

        assert_eq!(result, Err(SyncError::Api(ApiError::Timeout)));
        assert_eq!(status_of(&manager, "2"), Status::Completed);
        assert_eq!(status_of(&manager, "1"), Status::Active);
    }

    #[tokio::test]
    async fn test_toggle_is_tentative_while_pending() {
        let manager = setup(vec![make_todo("1", Status::Active)]).await;
        let id: TodoId = "1".into();

        let (toggled, seen_during) =
            futures::join!(manager.toggle(&id), async { status_of(&manager, "1") });

        assert_eq!(toggled, Ok(Status::Completed));
        assert_eq!(seen_during, Status::Completed);
    }

    #[tokio::test]
    async fn test_toggle_unknown_id() {
        let manager = setup(vec![make_todo("1", Status::Active)]).await;

        let result = manager.toggle(&"9".into()).await;

        assert_eq!(result, Err(SyncError::UnknownTodo("9".into())));
        assert_eq!(manager.api().requests.get(), 0);
    }

    #[tokio::test]
    async fn test_overlapping_toggle_rejected() {
        let manager = setup(vec![make_todo("1", Status::Active)]).await;
        let id: TodoId = "1".into();

        let (first, second) = futures::join!(manager.toggle(&id), manager.toggle(&id));

        assert_eq!(first, Ok(Status::Completed));
        assert_eq!(second, Err(SyncError::Busy(OpKey::Todo(id))));
        assert_eq!(status_of(&manager, "1"), Status::Completed);
    }

    // ========================
    // Delete
    // ========================

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let manager = setup(vec![
            make_todo("1", Status::Active),
            make_todo("2", Status::Active),
            make_todo("3", Status::Completed),
        ])
        .await;

        manager.delete(&"2".into()).await.unwrap();

        assert_eq!(local_ids(&manager), vec!["1", "3"]);
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_state() {
        let manager = setup(vec![
            make_todo("1", Status::Active),
            make_todo("2", Status::Active),
        ])
        .await;
        manager.api().fail_with(ApiError::NotFound);

        let result = manager.delete(&"2".into()).await;

        assert_eq!(result, Err(SyncError::Api(ApiError::NotFound)));
        assert_eq!(local_ids(&manager), vec!["1", "2"]);

        manager.api().recover();
        assert!(manager.delete(&"2".into()).await.is_ok());
    }

    // ========================
    // Clear completed
    // ========================

    #[tokio::test]
    async fn test_clear_completed_keeps_active() {
        let manager = setup(vec![
            make_todo("1", Status::Active),
            make_todo("2", Status::Completed),
            make_todo("3", Status::Completed),
        ])
        .await;

        let report = manager.clear_completed().await;

        assert_eq!(report.removed, 2);
        assert!(report.is_complete());
        assert_eq!(manager.todos().snapshot(), vec![make_todo("1", Status::Active)]);
        assert_eq!(manager.api().requests.get(), 2);
    }

    #[tokio::test]
    async fn test_clear_completed_partial_failure_still_removes() {
        let manager = setup(vec![
            make_todo("1", Status::Active),
            make_todo("2", Status::Completed),
            make_todo("3", Status::Completed),
        ])
        .await;
        manager.api().fail_delete_of.borrow_mut().insert("3".into());

        let report = manager.clear_completed().await;

        assert_eq!(report.removed, 2);
        assert_eq!(report.failed, vec![(TodoId::from("3"), ApiError::Server { status: 500 })]);
        assert_eq!(local_ids(&manager), vec!["1"]);
        // Server still has the failed one
        assert_eq!(manager.api().server.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_clear_completed_skips_pending() {
        let manager = setup(vec![
            make_todo("1", Status::Completed),
            make_todo("2", Status::Completed),
        ])
        .await;
        let _pending = manager.in_flight().try_acquire(OpKey::Todo("1".into())).unwrap();

        let report = manager.clear_completed().await;

        assert_eq!(report.removed, 1);
        assert_eq!(local_ids(&manager), vec!["1"]);
    }

    #[tokio::test]
    async fn test_clear_completed_nothing_to_do() {
        let manager = setup(vec![make_todo("1", Status::Active)]).await;

        let report = manager.clear_completed().await;

        assert_eq!(report, ClearReport::default());
        assert_eq!(manager.api().requests.get(), 0);
    }
}
