//! Derived-status badge

use leptos::prelude::*;
use mentor_review_model::ReviewStatus;

#[component]
pub fn StatusBadge(#[prop(into)] status: Signal<ReviewStatus>) -> impl IntoView {
    let class = move || {
        let tone = match status.get() {
            ReviewStatus::Pending => "bg-amber-500/15 text-amber-300 border-amber-500/40",
            ReviewStatus::Approved => "bg-emerald-500/15 text-emerald-300 border-emerald-500/40",
            ReviewStatus::Rejected => "bg-rose-500/15 text-rose-300 border-rose-500/40",
        };
        format!("px-2.5 py-0.5 rounded-full border text-xs font-medium {}", tone)
    };

    view! { <span class=class>{move || status.get().label()}</span> }
}
