//! Registration detail page

use super::{is_alive, page_liveness, DATE_FORMAT, PROCESSING_LABEL};
use crate::api::{fetch_registrations, run_action, ApiTarget};
use crate::components::{LoadingSpinner, RejectModal, StatusBadge};
use crate::state::AppState;
use crate::types::{ApiError, LoadState, StatusChange};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;
use mentor_review_model::{Registration, RejectionReason, ReviewAction, ReviewStatus};
use std::sync::atomic::AtomicBool;

type Detail = RwSignal<LoadState<Registration>>;

/// Fetch the collection and select the record matching `key`.
///
/// Returns the derived status of the record when it was found. A failed
/// re-fetch leaves a record already on screen in place.
async fn load_detail(
    state: &AppState,
    target: &ApiTarget,
    key: &str,
    detail: Detail,
    alive: &AtomicBool,
) -> Option<ReviewStatus> {
    let result = fetch_registrations(target).await;
    if !is_alive(alive) {
        return None;
    }
    match result {
        Ok(list) => match list.into_iter().find(|r| r.matches_id(key)) {
            Some(registration) => {
                let status = registration.status();
                detail.set(LoadState::Ready(registration));
                Some(status)
            }
            None => {
                detail.set(LoadState::NotFound);
                None
            }
        },
        Err(e) => {
            tracing::error!(registration_id = %key, error = ?e, "Failed to load registration");
            if detail.with_untracked(|d| matches!(d, LoadState::Ready(_))) {
                state.toast_error(e.page_message());
            } else {
                detail.set(LoadState::Failed(e.page_message()));
            }
            None
        }
    }
}

/// Full profile of one registration with approve/reject controls.
///
/// `on_status_update` fires after a confirmed action and the re-fetch that
/// follows it, before the success toast.
#[component]
pub fn RegistrationDetailPage(
    #[prop(optional)] on_status_update: Option<Callback<StatusChange>>,
) -> impl IntoView {
    let state = expect_context::<AppState>();
    let alive = page_liveness();
    let params = use_params_map();

    let key = Memo::new(move |_| {
        params.with(|p| p.get("id").unwrap_or_default().trim().to_string())
    });
    let detail: Detail = RwSignal::new(LoadState::Loading);
    let rejecting = RwSignal::new(false);

    {
        let state = state.clone();
        let alive = alive.clone();
        Effect::new(move |_| {
            let key = key.get();
            state.connection.track();
            let state = state.clone();
            let alive = alive.clone();
            let target = ApiTarget::from_state(&state);
            detail.set(LoadState::Loading);
            rejecting.set(false);
            spawn_local(async move {
                load_detail(&state, &target, &key, detail, &alive).await;
            });
        });
    }

    let act = {
        let state = state.clone();
        let alive = alive.clone();
        Callback::new(
            move |(action, reason): (ReviewAction, Option<RejectionReason>)| {
                let Some(registration) = detail.with_untracked(|d| match d {
                    LoadState::Ready(r) => Some(r.clone()),
                    _ => None,
                }) else {
                    return;
                };
                let state = state.clone();
                let alive = alive.clone();
                let target = ApiTarget::from_state(&state);
                let key = key.get_untracked();
                spawn_local(async move {
                    let result =
                        run_action(&state, &target, &registration.id, action, reason.as_ref()).await;
                    if !is_alive(&alive) {
                        return;
                    }
                    match result {
                        Ok(_) => {
                            rejecting.set(false);
                            let status = load_detail(&state, &target, &key, detail, &alive).await;
                            if !is_alive(&alive) {
                                return;
                            }
                            if let Some(callback) = on_status_update {
                                callback.run(StatusChange::after_refetch(&registration, action, status));
                            }
                            state.toast_success(action.success_message());
                        }
                        Err(ApiError::InFlight) => {}
                        Err(e) => state.toast_error(action.failure_message(e.backend_message())),
                    }
                });
            },
        )
    };

    let body = move || match detail.get() {
        LoadState::Loading => view! {
            <div class="flex justify-center py-20">
                <LoadingSpinner size="w-8 h-8" />
            </div>
        }
        .into_any(),
        LoadState::NotFound => view! {
            <div class="card p-10 text-center">
                <h2 class="text-xl font-semibold mb-2">"Registration not found"</h2>
                <p class="text-[var(--text-secondary)] mb-6">
                    {move || format!("No registration matches \"{}\".", key.get())}
                </p>
                <a href="/registrations" class="btn btn-primary">"Back to registrations"</a>
            </div>
        }
        .into_any(),
        LoadState::Failed(message) => view! {
            <div class="card p-10 text-center">
                <p class="text-[var(--accent-error)] mb-6">{message}</p>
                <a href="/registrations" class="btn btn-ghost">"Back to registrations"</a>
            </div>
        }
        .into_any(),
        LoadState::Ready(registration) => view! {
            <Profile registration=registration act=act rejecting=rejecting />
        }
        .into_any(),
    };

    view! {
        <div class="max-w-4xl mx-auto px-4 py-8">
            <a href="/registrations" class="text-sm text-[var(--text-muted)] hover:underline">
                "← All registrations"
            </a>
            <div class="mt-4">{body}</div>
        </div>
    }
}

#[component]
fn Profile(
    registration: Registration,
    act: Callback<(ReviewAction, Option<RejectionReason>)>,
    rejecting: RwSignal<bool>,
) -> impl IntoView {
    let state = expect_context::<AppState>();
    let busy = {
        let id = registration.id.clone();
        Signal::derive(move || state.is_busy(&id))
    };

    let status = registration.status();
    let actionable = registration.is_actionable();
    let applied = Registration::display_date(registration.applied_at.as_ref(), DATE_FORMAT);
    let updated = Registration::display_date(registration.updated_at.as_ref(), DATE_FORMAT);
    let proof = registration
        .kyc
        .proof_type
        .as_ref()
        .map(|p| p.label().to_string())
        .unwrap_or_else(|| "Not provided".to_string());
    let document = registration.kyc.document_url.clone().filter(|u| !u.trim().is_empty());
    let name = registration.name.clone();

    let controls = actionable.then(move || {
        view! {
            <div class="flex gap-2">
                <button
                    class="btn btn-success"
                    disabled=move || busy.get()
                    on:click=move |_| act.run((ReviewAction::Approve, None))
                >
                    {move || if busy.get() { PROCESSING_LABEL } else { "Approve" }}
                </button>
                <button
                    class="btn btn-danger"
                    disabled=move || busy.get()
                    on:click=move |_| rejecting.set(true)
                >
                    "Reject"
                </button>
            </div>
        }
    });

    let modal_name = name.clone();
    let modal = move || {
        let name = modal_name.clone();
        rejecting.get().then(|| view! {
            <RejectModal
                name=Signal::derive(move || name.clone())
                busy=busy
                on_confirm=Callback::new(move |reason: RejectionReason| {
                    act.run((ReviewAction::Reject, Some(reason)))
                })
                on_cancel=Callback::new(move |_| rejecting.set(false))
            />
        })
    };

    view! {
        <div class="space-y-6">
            <section class="card p-6 flex flex-wrap items-center gap-6">
                <img src=registration.avatar_url.clone() alt="" class="w-20 h-20 rounded-full" />
                <div class="flex-1 min-w-0">
                    <div class="flex items-center gap-3">
                        <h2 class="text-2xl font-semibold">{name}</h2>
                        <StatusBadge status=Signal::derive(move || status) />
                    </div>
                    <p class="font-mono text-xs text-[var(--text-muted)] mt-1">
                        {registration.registration_id.clone()}
                    </p>
                    <dl class="mt-3 grid grid-cols-2 gap-x-6 gap-y-1 text-sm">
                        <dt class="text-[var(--text-muted)]">"Email"</dt>
                        <dd>{registration.email.clone().unwrap_or_else(|| "—".to_string())}</dd>
                        <dt class="text-[var(--text-muted)]">"Phone"</dt>
                        <dd>{registration.phone.clone().unwrap_or_else(|| "—".to_string())}</dd>
                        <dt class="text-[var(--text-muted)]">"Applied"</dt>
                        <dd>{applied}</dd>
                        <dt class="text-[var(--text-muted)]">"Last updated"</dt>
                        <dd>{updated}</dd>
                    </dl>
                </div>
                {controls}
            </section>

            <section class="card p-6 space-y-4">
                <h3 class="text-lg font-semibold">"Professional details"</h3>
                <p class="text-sm">
                    <span class="text-[var(--text-muted)]">"Experience: "</span>
                    {registration.experience_label()}
                </p>
                {registration.bio.clone().map(|bio| view! {
                    <p class="text-sm whitespace-pre-line">{bio}</p>
                })}
                <TagList title="Qualifications" items=registration.qualifications.clone() />
                <TagList title="Specializations" items=registration.specializations.clone() />
                <TagList title="Achievements" items=registration.achievements.clone() />
                <TagList title="Publications" items=registration.publications.clone() />
            </section>

            <section class="card p-6">
                <h3 class="text-lg font-semibold mb-3">"KYC"</h3>
                <dl class="grid grid-cols-2 gap-x-6 gap-y-1 text-sm">
                    <dt class="text-[var(--text-muted)]">"Proof type"</dt>
                    <dd>{proof}</dd>
                    <dt class="text-[var(--text-muted)]">"Document"</dt>
                    <dd>
                        {match document {
                            Some(url) => view! {
                                <a href=url target="_blank" rel="noopener noreferrer" class="text-blue-400 hover:underline">
                                    "View document"
                                </a>
                            }
                            .into_any(),
                            None => view! { <span>"Not provided"</span> }.into_any(),
                        }}
                    </dd>
                    <dt class="text-[var(--text-muted)]">"Verified"</dt>
                    <dd>{if registration.kyc.verified { "Yes" } else { "No" }}</dd>
                </dl>
            </section>

            {modal}
        </div>
    }
}

/// Titled list, omitted when empty
#[component]
fn TagList(title: &'static str, items: Vec<String>) -> impl IntoView {
    (!items.is_empty()).then(|| {
        view! {
            <div>
                <h4 class="text-sm text-[var(--text-muted)] mb-1">{title}</h4>
                <ul class="flex flex-wrap gap-2">
                    {items
                        .into_iter()
                        .map(|item| view! { <li class="px-2 py-0.5 rounded bg-slate-800 text-sm">{item}</li> })
                        .collect_view()}
                </ul>
            </div>
        }
    })
}
