//! Referral Card Component
//!
//! Referral code with copy and regenerate actions, plus earnings stats.

use leptos::*;

use crate::models::ReferralSummary;
use crate::state::global::copy_to_clipboard;
use crate::state::DashboardState;

/// Code and statistics for the signed-in user
#[component]
pub fn ReferralCard(summary: ReferralSummary) -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");

    let code = summary.referral_code.clone();
    let has_code = !code.is_empty();
    let shown_code = if has_code { code.clone() } else { "-".to_string() };

    view! {
        <section class="bg-gray-800 rounded-xl p-6 space-y-6">
            <div class="flex items-center justify-between">
                <div>
                    <p class="text-sm text-gray-400">"Your referral code"</p>
                    <p class="text-3xl font-mono font-bold">{shown_code}</p>
                </div>

                <div class="flex space-x-2">
                    <button
                        disabled=!has_code
                        on:click=move |_| copy_to_clipboard(code.clone())
                        class="px-4 py-2 bg-gray-600 hover:bg-gray-500 disabled:bg-gray-700
                               rounded-lg font-medium transition-colors"
                    >
                        "Copy"
                    </button>
                    <button
                        on:click=move |_| state.regenerate_code()
                        class="px-4 py-2 bg-primary-600 hover:bg-primary-700
                               rounded-lg font-medium transition-colors"
                    >
                        "Generate new code"
                    </button>
                </div>
            </div>

            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                <Stat label="Referred users" value=summary.referred_users.to_string() />
                <Stat label="Total earnings" value=format!("{:.2}", summary.total_earnings) />
                <Stat label="Pending earnings" value=format!("{:.2}", summary.pending_earnings) />
            </div>

            {move || state.error.get().map(|message| view! {
                <p class="text-sm text-red-400">{message}</p>
            })}
        </section>
    }
}

#[component]
fn Stat(label: &'static str, #[prop(into)] value: String) -> impl IntoView {
    view! {
        <div class="bg-gray-700 rounded-lg p-4">
            <p class="text-sm text-gray-400">{label}</p>
            <p class="text-2xl font-bold mt-1">{value}</p>
        </div>
    }
}
