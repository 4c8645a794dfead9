//! Todo Footer Component
//!
//! Items-left counter, filters and bulk clear.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::FilterBar;
use crate::context::use_app_context;
use crate::models::items_left_label;

#[component]
pub fn TodoFooter(items_left: Memo<usize>) -> impl IntoView {
    let ctx = use_app_context();

    let clear_completed = move |_| {
        spawn_local(async move {
            let _ = ctx.clear_completed().await;
        });
    };

    view! {
        <div class="todos-footer">
            <p class="count">{move || items_left_label(items_left.get())}</p>
            <FilterBar />
            <button class="clear" on:click=clear_completed>"Clear Completed"</button>
        </div>
    }
}
