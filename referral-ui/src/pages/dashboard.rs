//! Dashboard Page
//!
//! Shows the login form, a loading state, or the referral card and links,
//! depending on session and summary presence.

use leptos::*;

use crate::components::{Loading, LoginForm, ReferralCard, ReferralLinks};
use crate::state::{DashboardState, ViewMode};

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");

    view! {
        <div class="space-y-8">
            {move || match state.view_mode() {
                ViewMode::Anonymous => view! { <LoginForm /> }.into_view(),
                ViewMode::Loading => view! { <Loading /> }.into_view(),
                ViewMode::Loaded => {
                    let summary = state.summary.get().unwrap_or_default();
                    let links = summary.referral_links.clone();
                    view! {
                        <ReferralCard summary=summary />
                        <ReferralLinks links=links />
                    }
                    .into_view()
                }
            }}
        </div>
    }
}
