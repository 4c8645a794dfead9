//! Status Line Component
//!
//! Shows the last failed operation until the next success or dismissal.

use leptos::prelude::*;

use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn StatusLine() -> impl IntoView {
    let store = use_app_store();

    view! {
        {move || store.status_message().get().map(|message| view! {
            <div class="status-line" role="alert">
                <span>{message}</span>
                <button class="dismiss-btn" on:click=move |_| store.status_message().set(None)>
                    "×"
                </button>
            </div>
        })}
    }
}
