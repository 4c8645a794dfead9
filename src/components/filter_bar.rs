//! Filter Bar Component
//!
//! All / Active / Completed selector.

use leptos::prelude::*;
use todo_sync::FILTERS;

use crate::store::{use_app_store, AppStateStoreFields};

/// Filter buttons; the selected one is highlighted
#[component]
pub fn FilterBar() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="types">
            {FILTERS.iter().map(|(filter, label)| {
                let filter = *filter;
                let is_selected = move || store.filter().get() == filter;
                view! {
                    <button
                        class=move || if is_selected() { "type-btn active" } else { "type-btn" }
                        on:click=move |_| store.filter().set(filter)
                    >
                        {*label}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}
