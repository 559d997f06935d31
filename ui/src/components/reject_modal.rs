//! Reject confirmation modal

use leptos::prelude::*;
use mentor_review_model::RejectionReason;

/// Asks for a rejection reason.
///
/// Confirming with a blank reason shows the validation message and never
/// calls `on_confirm`.
#[component]
pub fn RejectModal(
    /// Applicant name for the title
    #[prop(into)]
    name: Signal<String>,
    /// Disables the buttons while the call is pending
    #[prop(into)]
    busy: Signal<bool>,
    on_confirm: Callback<RejectionReason>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let reason = RwSignal::new(String::new());
    let error = RwSignal::new(Option::<String>::None);

    let confirm = move |_| match RejectionReason::parse(&reason.get()) {
        Ok(valid) => {
            error.set(None);
            on_confirm.run(valid);
        }
        Err(e) => error.set(Some(e.to_string())),
    };

    view! {
        <div
            class="fixed inset-0 bg-slate-900/80 backdrop-blur-sm flex items-center justify-center z-50"
            on:keydown=move |ev: web_sys::KeyboardEvent| {
                if ev.key() == "Escape" && !busy.get_untracked() {
                    on_cancel.run(());
                }
            }
        >
            <div class="card w-full max-w-lg p-6 animate-fade-in">
                <h2 class="text-lg font-semibold mb-2">
                    {move || format!("Reject registration of {}", name.get())}
                </h2>
                <p class="text-sm text-[var(--text-secondary)] mb-4">
                    "Tell the applicant why the registration cannot be approved."
                </p>

                <textarea
                    prop:value=move || reason.get()
                    on:input=move |ev| {
                        reason.set(event_target_value(&ev));
                        error.set(None);
                    }
                    rows="4"
                    placeholder="Reason for rejection"
                    class="input w-full"
                ></textarea>

                <Show when=move || error.get().is_some()>
                    <p class="mt-2 text-sm text-[var(--accent-error)]">
                        {move || error.get().unwrap_or_default()}
                    </p>
                </Show>

                <div class="mt-6 flex justify-end gap-2">
                    <button
                        on:click=move |_| on_cancel.run(())
                        disabled=move || busy.get()
                        class="btn btn-ghost"
                    >
                        "Cancel"
                    </button>
                    <button
                        on:click=confirm
                        disabled=move || busy.get()
                        class="btn btn-danger"
                    >
                        {move || if busy.get() { "Processing…" } else { "Reject" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
