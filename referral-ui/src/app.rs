//! App Root Component
//!
//! Main application component with the dashboard state provider.

use leptos::*;

use crate::components::Nav;
use crate::pages::Dashboard;
use crate::state::provide_dashboard_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Restores the stored session and starts the first fetch
    provide_dashboard_state();

    view! {
        <div class="min-h-screen bg-gray-900 text-white flex flex-col">
            <Nav />

            <main class="flex-1 container mx-auto px-4 py-8">
                <Dashboard />
            </main>
        </div>
    }
}
