//! Todo Item Component
//!
//! Individual todo row in the list.

use leptos::prelude::*;
use leptos::task::spawn_local;
use todo_sync::Todo;

use crate::context::use_app_context;

/// A single todo row: indicator and text toggle, cross deletes
#[component]
pub fn TodoItem(todo: Todo) -> impl IntoView {
    let ctx = use_app_context();

    let completed = todo.is_completed();
    let toggle_id = todo.id.clone();
    let delete_id = todo.id.clone();

    view! {
        <div class="todo-item">
            <div class="input-container">
                <div
                    class="btn-n-text"
                    on:click=move |_| {
                        let id = toggle_id.clone();
                        spawn_local(async move {
                            let _ = ctx.toggle(id).await;
                        });
                    }
                >
                    <div class=if completed { "circle completed-circle" } else { "circle" }>
                        {completed.then(|| view! { <span class="check">"✓"</span> })}
                    </div>
                    <p class=if completed { "completed" } else { "" }>{todo.text}</p>
                </div>

                // Delete button
                <button
                    class="cross"
                    title="Delete"
                    on:click=move |_| {
                        let id = delete_id.clone();
                        spawn_local(async move {
                            let _ = ctx.delete(id).await;
                        });
                    }
                >
                    "×"
                </button>
            </div>
            <hr />
        </div>
    }
}
