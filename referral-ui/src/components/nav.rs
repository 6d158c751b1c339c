//! Navigation Component
//!
//! Header bar with brand, signed-in user and logout.

use leptos::*;

use crate::state::DashboardState;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <div class="flex items-center space-x-3">
                        <span class="text-2xl">"🔗"</span>
                        <span class="text-xl font-bold text-white">"Referrals"</span>
                    </div>

                    {move || {
                        state.user.get().map(|user| view! {
                            <div class="flex items-center space-x-4">
                                <span class="text-gray-300">{user.display_name()}</span>
                                <button
                                    on:click=move |_| state.logout()
                                    class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
                                >
                                    "Logout"
                                </button>
                            </div>
                        })
                    }}
                </div>
            </div>
        </nav>
    }
}
