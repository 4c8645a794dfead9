//! Theme Toggle Component

use leptos::prelude::*;

use crate::store::{use_app_store, AppStateStoreFields};

/// Light/dark switch. Purely presentational.
#[component]
pub fn ThemeToggle() -> impl IntoView {
    let store = use_app_store();

    view! {
        <button
            class="theme-toggle"
            title="Toggle theme"
            on:click=move |_| store.theme().update(|theme| *theme = theme.toggled())
        >
            {move || store.theme().get().icon()}
        </button>
    }
}
