//! Loading Component

use leptos::*;

/// Spinner shown while referral data loads
#[component]
pub fn Loading(
    #[prop(default = "Loading referral data...")]
    label: &'static str,
) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center py-12 space-y-3">
            <div class="loading-spinner w-8 h-8" />
            <span class="text-sm text-gray-400">{label}</span>
        </div>
    }
}
