//! Header component

use super::SettingsPanel;
use crate::state::AppState;
use leptos::prelude::*;

/// Admin header with the token field and connection settings
#[component]
pub fn Header() -> impl IntoView {
    let state = expect_context::<AppState>();
    let editing = RwSignal::new(false);
    let draft = RwSignal::new(String::new());
    let settings_open = RwSignal::new(false);

    let token = state.token;
    let has_token = Signal::derive(move || token.get().is_some());

    let state_for_save = state.clone();
    let save = move |_| {
        let value = draft.get().trim().to_string();
        state_for_save.set_token((!value.is_empty()).then_some(value));
        draft.set(String::new());
        editing.set(false);
    };

    view! {
        <header class="header h-16 sticky top-0 z-40">
            <div class="relative h-full max-w-7xl mx-auto px-4 flex items-center justify-between">
                <a href="/registrations" class="logo hover:opacity-80 transition-opacity">
                    <div>
                        <h1 class="text-xl font-bold text-gradient">"Mentor Review"</h1>
                        <p class="text-xs text-[var(--text-muted)] -mt-0.5">"Registration approvals"</p>
                    </div>
                </a>

                <nav class="flex items-center gap-2">
                    <a href="/registrations" class="btn btn-ghost">"Registrations"</a>
                    <Show
                        when=move || editing.get()
                        fallback=move || view! {
                            <button on:click=move |_| editing.set(true) class="btn btn-ghost">
                                {move || if has_token.get() { "Admin token ✓" } else { "Set admin token" }}
                            </button>
                        }
                    >
                        <input
                            type="password"
                            prop:value=move || draft.get()
                            on:input=move |ev| draft.set(event_target_value(&ev))
                            placeholder="Bearer token"
                            class="input w-56"
                        />
                        <button on:click=save.clone() class="btn btn-primary">"Save"</button>
                    </Show>
                    <button
                        on:click=move |_| settings_open.update(|open| *open = !*open)
                        class="btn btn-ghost"
                        title="Connection settings"
                    >
                        "Settings"
                    </button>
                </nav>
                <Show when=move || settings_open.get()>
                    <SettingsPanel on_close=Callback::new(move |_| settings_open.set(false)) />
                </Show>
            </div>
        </header>
    }
}
