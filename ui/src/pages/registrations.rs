//! Registration list page

use super::{is_alive, page_liveness, DATE_FORMAT, PROCESSING_LABEL};
use crate::api::{fetch_registrations, run_action, ApiTarget};
use crate::components::{RejectModal, Skeleton, StatusBadge};
use crate::state::AppState;
use crate::types::{ApiError, LoadState};
use leptos::prelude::*;
use leptos::task::spawn_local;
use mentor_review_model::{
    Page, Registration, RegistrationQuery, RejectionReason, ReviewAction, ReviewStatus,
    StatusCounts, StatusFilter,
};
use std::sync::atomic::AtomicBool;

const FILTERS: [StatusFilter; 4] = [
    StatusFilter::All,
    StatusFilter::Only(ReviewStatus::Pending),
    StatusFilter::Only(ReviewStatus::Approved),
    StatusFilter::Only(ReviewStatus::Rejected),
];

type Registrations = RwSignal<LoadState<Vec<Registration>>>;

/// Fetch the collection into `registrations`.
///
/// A failed re-fetch keeps the rows already on screen and raises a toast.
async fn refresh(state: &AppState, target: &ApiTarget, registrations: Registrations, alive: &AtomicBool) {
    let result = fetch_registrations(target).await;
    if !is_alive(alive) {
        return;
    }
    match result {
        Ok(list) => registrations.set(LoadState::Ready(list)),
        Err(e) => {
            tracing::error!(error = ?e, "Failed to fetch registrations");
            let showing_rows = registrations.with_untracked(|s| matches!(s, LoadState::Ready(_)));
            if showing_rows {
                state.toast_error(e.page_message());
            } else {
                registrations.set(LoadState::Failed(e.page_message()));
            }
        }
    }
}

#[derive(Clone, PartialEq)]
enum Phase {
    Loading,
    Ready,
    Failed(String),
}

/// Filterable, searchable, paginated registration list
#[component]
pub fn RegistrationsPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let alive = page_liveness();

    let registrations: Registrations = RwSignal::new(LoadState::Loading);
    let query = RwSignal::new(RegistrationQuery::default());
    let search = RwSignal::new(String::new());
    let rejecting = RwSignal::new(Option::<Registration>::None);

    let reload = {
        let state = state.clone();
        let alive = alive.clone();
        Callback::new(move |()| {
            let state = state.clone();
            let alive = alive.clone();
            let target = ApiTarget::from_state(&state);
            spawn_local(async move {
                refresh(&state, &target, registrations, &alive).await;
            });
        })
    };

    let act = {
        let state = state.clone();
        let alive = alive.clone();
        Callback::new(
            move |(id, action, reason): (String, ReviewAction, Option<RejectionReason>)| {
                let state = state.clone();
                let alive = alive.clone();
                let target = ApiTarget::from_state(&state);
                spawn_local(async move {
                    let result = run_action(&state, &target, &id, action, reason.as_ref()).await;
                    if !is_alive(&alive) {
                        return;
                    }
                    match result {
                        Ok(_) => {
                            rejecting.set(None);
                            refresh(&state, &target, registrations, &alive).await;
                            if is_alive(&alive) {
                                state.toast_success(action.success_message());
                            }
                        }
                        Err(ApiError::InFlight) => {}
                        Err(e) => state.toast_error(action.failure_message(e.backend_message())),
                    }
                });
            },
        )
    };

    // refetch whenever the connection settings change
    let connection = state.connection;
    Effect::new(move |_| {
        connection.track();
        reload.run(());
    });

    let counts = Memo::new(move |_| {
        registrations.with(|s| match s {
            LoadState::Ready(list) => StatusCounts::tally(list),
            _ => StatusCounts::default(),
        })
    });

    let page = Memo::new(move |_| {
        registrations.with(|s| match s {
            LoadState::Ready(list) => query.with(|q| {
                let page = q.apply(list);
                Some(Page {
                    items: page.items.into_iter().cloned().collect::<Vec<_>>(),
                    page: page.page,
                    total_pages: page.total_pages,
                    total_items: page.total_items,
                })
            }),
            _ => None,
        })
    });

    let phase = Memo::new(move |_| {
        registrations.with(|s| match s {
            LoadState::Loading => Phase::Loading,
            LoadState::Failed(message) => Phase::Failed(message.clone()),
            _ => Phase::Ready,
        })
    });

    let served_page = move || page.with_untracked(|p| p.as_ref().map(|p| p.page).unwrap_or(1));

    let filter_tabs = FILTERS
        .into_iter()
        .map(|filter| {
            let active = move || query.with(|q| q.status == filter);
            view! {
                <button
                    class=move || if active() { "btn btn-primary" } else { "btn btn-ghost" }
                    on:click=move |_| query.update(|q| {
                        q.status = filter;
                        q.page = 1;
                    })
                >
                    {filter.label()}
                    <span class="ml-1.5 text-xs opacity-70">{move || counts.get().for_filter(filter)}</span>
                </button>
            }
        })
        .collect_view();

    let on_approve = Callback::new(move |id: String| act.run((id, ReviewAction::Approve, None)));
    let on_reject = Callback::new(move |registration: Registration| rejecting.set(Some(registration)));

    let modal_state = state.clone();
    let reject_modal = move || {
        rejecting.get().map(|registration| {
            let busy = {
                let state = modal_state.clone();
                let id = registration.id.clone();
                Signal::derive(move || state.is_busy(&id))
            };
            let name = registration.name.clone();
            let id = registration.id.clone();
            view! {
                <RejectModal
                    name=Signal::derive(move || name.clone())
                    busy=busy
                    on_confirm=Callback::new(move |reason: RejectionReason| {
                        act.run((id.clone(), ReviewAction::Reject, Some(reason)))
                    })
                    on_cancel=Callback::new(move |_| rejecting.set(None))
                />
            }
        })
    };

    view! {
        <div class="max-w-7xl mx-auto px-4 py-8">
            <div class="flex items-center justify-between mb-6">
                <h2 class="text-2xl font-semibold">"Mentor registrations"</h2>
                <button on:click=move |_| reload.run(()) class="btn btn-ghost">"Refresh"</button>
            </div>

            <div class="flex flex-wrap items-center gap-2 mb-4">
                {filter_tabs}
                <input
                    type="search"
                    placeholder="Search name, email or id"
                    class="input ml-auto w-64"
                    prop:value=move || search.get()
                    on:input=move |ev| {
                        let term = event_target_value(&ev);
                        search.set(term.clone());
                        query.update(|q| *q = q.clone().with_search(term).with_page(1));
                    }
                />
            </div>

            {move || match phase.get() {
                Phase::Loading => view! {
                    <div class="card p-4 space-y-3">
                        <Skeleton class="h-10 w-full" />
                        <Skeleton class="h-10 w-full" />
                        <Skeleton class="h-10 w-full" />
                    </div>
                }
                .into_any(),
                Phase::Failed(message) => view! {
                    <div class="card p-6 text-center">
                        <p class="text-[var(--accent-error)] mb-4">{message}</p>
                        <button on:click=move |_| reload.run(()) class="btn btn-primary">"Try again"</button>
                    </div>
                }
                .into_any(),
                Phase::Ready => view! {
                    <div class="card overflow-x-auto">
                        <table class="w-full text-sm">
                            <thead class="text-left text-[var(--text-muted)]">
                                <tr>
                                    <th class="py-3 px-4">"Applicant"</th>
                                    <th class="py-3 px-4">"Registration"</th>
                                    <th class="py-3 px-4">"Status"</th>
                                    <th class="py-3 px-4">"Applied"</th>
                                    <th class="py-3 px-4"></th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || page.get().map(|p| p.items).unwrap_or_default()
                                    key=|r| (r.id.clone(), r.status())
                                    children=move |registration| view! {
                                        <RegistrationRow
                                            registration=registration
                                            on_approve=on_approve
                                            on_reject=on_reject
                                        />
                                    }
                                />
                            </tbody>
                        </table>
                        <Show when=move || page.with(|p| p.as_ref().is_some_and(|p| p.items.is_empty()))>
                            <p class="py-10 text-center text-[var(--text-muted)]">"No registrations match."</p>
                        </Show>
                    </div>

                    <div class="flex items-center justify-between mt-4 text-sm text-[var(--text-secondary)]">
                        <span>
                            {move || page.get().map(|p| format!(
                                "Page {} of {} · {} registrations",
                                p.page, p.total_pages, p.total_items,
                            )).unwrap_or_default()}
                        </span>
                        <div class="flex gap-2">
                            <button
                                class="btn btn-ghost"
                                disabled=move || page.with(|p| p.as_ref().map_or(true, |p| p.page <= 1))
                                on:click=move |_| {
                                    let current = served_page();
                                    query.update(|q| q.page = current.saturating_sub(1).max(1));
                                }
                            >
                                "Previous"
                            </button>
                            <button
                                class="btn btn-ghost"
                                disabled=move || page.with(|p| p.as_ref().map_or(true, |p| p.page >= p.total_pages))
                                on:click=move |_| {
                                    let current = served_page();
                                    query.update(|q| q.page = current + 1);
                                }
                            >
                                "Next"
                            </button>
                        </div>
                    </div>
                }
                .into_any(),
            }}

            {reject_modal}
        </div>
    }
}

/// One table row; controls only for pending registrations
#[component]
fn RegistrationRow(
    registration: Registration,
    on_approve: Callback<String>,
    on_reject: Callback<Registration>,
) -> impl IntoView {
    let state = expect_context::<AppState>();
    let id = registration.id.clone();
    let busy = {
        let id = id.clone();
        Signal::derive(move || state.is_busy(&id))
    };

    let status = registration.status();
    let href = format!("/registrations/{}", registration.id);
    let applied = Registration::display_date(registration.applied_at.as_ref(), DATE_FORMAT);
    let email = registration.email.clone().unwrap_or_else(|| "—".to_string());
    let name = registration.name.clone();
    let avatar = registration.avatar_url.clone();
    let registration_id = registration.registration_id.clone();

    let controls = registration.is_actionable().then(move || {
        view! {
            <div class="flex justify-end gap-2">
                <button
                    class="btn btn-success"
                    disabled=move || busy.get()
                    on:click=move |_| on_approve.run(id.clone())
                >
                    {move || if busy.get() { PROCESSING_LABEL } else { "Approve" }}
                </button>
                <button
                    class="btn btn-danger"
                    disabled=move || busy.get()
                    on:click=move |_| on_reject.run(registration.clone())
                >
                    "Reject"
                </button>
            </div>
        }
    });

    view! {
        <tr class="border-t border-slate-800">
            <td class="py-3 px-4">
                <div class="flex items-center gap-3">
                    <img src=avatar alt="" class="w-9 h-9 rounded-full" />
                    <div>
                        <a href=href class="font-medium hover:underline">{name}</a>
                        <p class="text-xs text-[var(--text-muted)]">{email}</p>
                    </div>
                </div>
            </td>
            <td class="py-3 px-4 font-mono text-xs">{registration_id}</td>
            <td class="py-3 px-4">
                <StatusBadge status=Signal::derive(move || status) />
            </td>
            <td class="py-3 px-4">{applied}</td>
            <td class="py-3 px-4 text-right">{controls}</td>
        </tr>
    }
}
