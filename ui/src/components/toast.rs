//! Toast notifications

use crate::state::AppState;
use crate::types::ToastKind;
use leptos::prelude::*;

/// Renders the toast stack from global state
#[component]
pub fn ToastHost() -> impl IntoView {
    let state = expect_context::<AppState>();
    let toasts = state.toasts;

    view! {
        <div class="fixed bottom-4 right-4 z-50 flex flex-col gap-2">
            <For
                each=move || toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let state = state.clone();
                    let class = match toast.kind {
                        ToastKind::Success => "toast toast-success",
                        ToastKind::Error => "toast toast-error",
                    };
                    let id = toast.id;
                    view! {
                        <div class=class role="status">
                            <span>{toast.message}</span>
                            <button on:click=move |_| state.dismiss_toast(id) class="ml-3 opacity-70">"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}
