//! Connection settings panel

use crate::state::AppState;
use crate::types::Connection;
use leptos::prelude::*;

/// Edits the API base, the three routes and the reject body setting.
///
/// Saving validates first; an invalid draft stays open with the message.
#[component]
pub fn SettingsPanel(on_close: Callback<()>) -> impl IntoView {
    let state = expect_context::<AppState>();
    let draft = RwSignal::new(state.connection.get_untracked());
    let error = RwSignal::new(Option::<String>::None);

    let save = {
        let state = state.clone();
        move |_| match state.set_connection(draft.get()) {
            Ok(()) => {
                error.set(None);
                on_close.run(());
            }
            Err(message) => error.set(Some(message)),
        }
    };

    let field = move |label: &'static str, get: fn(&Connection) -> String, set: fn(&mut Connection, String)| {
        view! {
            <label class="block text-sm">
                <span class="text-[var(--text-muted)]">{label}</span>
                <input
                    prop:value=move || draft.with(get)
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|c| set(c, value));
                        error.set(None);
                    }
                    class="input w-full mt-1 font-mono text-xs"
                />
            </label>
        }
    };

    view! {
        <div class="absolute right-4 top-16 card w-[28rem] p-5 space-y-3 z-50 animate-fade-in">
            <h2 class="text-base font-semibold">"Connection"</h2>
            {field("API base URL", |c| c.api_base.clone(), |c, v| c.api_base = v)}
            {field("List route", |c| c.list_path.clone(), |c, v| c.list_path = v)}
            {field("Approve route", |c| c.approve_path.clone(), |c, v| c.approve_path = v)}
            {field("Reject route", |c| c.reject_path.clone(), |c, v| c.reject_path = v)}
            <label class="flex items-center gap-2 text-sm">
                <input
                    type="checkbox"
                    prop:checked=move || draft.with(|c| c.send_rejection_reason)
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        draft.update(|c| c.send_rejection_reason = checked);
                    }
                />
                "Send the rejection reason with reject calls"
            </label>

            <Show when=move || error.get().is_some()>
                <p class="text-sm text-[var(--accent-error)]">
                    {move || error.get().unwrap_or_default()}
                </p>
            </Show>

            <div class="flex justify-between pt-2">
                <button
                    on:click=move |_| {
                        draft.set(Connection::default());
                        error.set(None);
                    }
                    class="btn btn-ghost"
                >
                    "Defaults"
                </button>
                <div class="flex gap-2">
                    <button on:click=move |_| on_close.run(()) class="btn btn-ghost">"Cancel"</button>
                    <button on:click=save class="btn btn-primary">"Save"</button>
                </div>
            </div>
        </div>
    }
}
