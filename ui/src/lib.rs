//! Mentor registration review console.
//!
//! Browser frontend over the admin registration API: a filterable list
//! and a detail page, both with approve/reject controls.

pub mod api;
pub mod components;
pub mod pages;
pub mod state;
pub mod types;

use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::{
    components::{Redirect, Route, Router, Routes},
    path,
};

use components::{Header, ToastHost};
use pages::{registration_detail::RegistrationDetailPage, registrations::RegistrationsPage};
use state::AppState;

/// Main application component
#[component]
pub fn App() -> impl IntoView {
    let app_state = AppState::new();
    provide_context(app_state);
    provide_meta_context();

    view! {
        <Title text="Mentor Review" />
        <Router>
            <main class="min-h-screen bg-slate-900 text-slate-100">
                <Header />
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=|| view! { <Redirect path="/registrations" /> } />
                    <Route path=path!("/registrations") view=RegistrationsPage />
                    <Route
                        path=path!("/registrations/:id")
                        view=|| view! { <RegistrationDetailPage /> }
                    />
                </Routes>
                <ToastHost />
            </main>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="min-h-[70vh] flex items-center justify-center">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-slate-500 mb-4">"404"</h1>
                <p class="text-xl text-slate-400 mb-8">"Page not found"</p>
                <a
                    href="/registrations"
                    class="px-6 py-3 bg-blue-600 hover:bg-blue-700 rounded-lg font-medium transition-colors"
                >
                    "Back to registrations"
                </a>
            </div>
        </div>
    }
}
