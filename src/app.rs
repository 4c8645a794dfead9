//! Todo Frontend App
//!
//! Main application component: header, composer, list and footer.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use todo_sync::{items_left, ApiConfig, RestClient, TodoManager};

use crate::components::{Composer, StatusLine, ThemeToggle, TodoFooter, TodoItem};
use crate::context::AppContext;
use crate::store::{AppState, AppStateStoreFields, StoreTodos};

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::default());
    provide_context(store);

    let client = match ApiConfig::from_build_env().and_then(RestClient::new) {
        Ok(client) => client,
        Err(err) => {
            tracing::error!(error = %err, "cannot reach todo API");
            return view! {
                <div class="todos light-theme">
                    <p class="status-line" role="alert">
                        {format!("Cannot reach todo API: {}", err)}
                    </p>
                </div>
            }
            .into_any();
        }
    };
    tracing::info!(base_url = %client.config().base_url, "todo client ready");

    let ctx = AppContext::new(store, TodoManager::new(client, StoreTodos(store)));
    provide_context(ctx);

    // Load todos on mount
    Effect::new(move |_| {
        spawn_local(async move {
            let _ = ctx.load().await;
        });
    });

    // Derived views of the collection
    let visible = Memo::new(move |_| store.filter().get().apply(&store.todos().read()));
    let left_count = Memo::new(move |_| items_left(&store.todos().read()));

    view! {
        <div class=move || format!("todos {}", store.theme().get().class())>
            <div class="todos-header">
                <h1>"TODO"</h1>
                <ThemeToggle />
            </div>

            <Composer />
            <StatusLine />

            <div class="todos-container">
                <For
                    each=move || visible.get()
                    key=|todo| (todo.id.clone(), todo.status, todo.text.clone())
                    children=move |todo| view! { <TodoItem todo=todo /> }
                />
                <TodoFooter items_left=left_count />
            </div>
        </div>
    }
    .into_any()
}
