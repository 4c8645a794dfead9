//! Composer Component
//!
//! Input form for creating new todos.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;

/// Form for creating a new todo.
///
/// The input is cleared and blurred only once the server accepted the todo.
#[component]
pub fn Composer() -> impl IntoView {
    let ctx = use_app_context();

    let (new_text, set_new_text) = signal(String::new());
    let input_ref = NodeRef::<html::Input>::new();

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = new_text.get_untracked();
        if text.trim().is_empty() {
            return;
        }

        spawn_local(async move {
            if ctx.create(text).await.is_ok() {
                set_new_text.set(String::new());
                if let Some(input) = input_ref.get_untracked() {
                    let _ = input.blur();
                }
            }
        });
    };

    view! {
        <div class="input-container">
            <div class="circle"></div>
            <form class="composer" on:submit=submit>
                <input
                    type="text"
                    class="input"
                    placeholder="Create a new todo.."
                    node_ref=input_ref
                    prop:value=move || new_text.get()
                    on:input=move |ev| set_new_text.set(event_target_value(&ev))
                />
            </form>
        </div>
    }
}
