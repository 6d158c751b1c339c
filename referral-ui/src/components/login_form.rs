//! Login Form Component
//!
//! Email (and full name when registering) with a login/register toggle.

use leptos::*;

use crate::models::AuthMode;
use crate::state::DashboardState;

/// Login / register form
#[component]
pub fn LoginForm() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");

    let (email, set_email) = create_signal(String::new());
    let (full_name, set_full_name) = create_signal(String::new());

    let registering = move || state.mode.get() == AuthMode::Register;

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        state.submit(email.get_untracked(), full_name.get_untracked());
    };

    view! {
        <div class="max-w-md mx-auto bg-gray-800 rounded-xl p-8">
            <h1 class="text-2xl font-bold mb-6">
                {move || if registering() { "Create your account" } else { "Sign in" }}
            </h1>

            <form on:submit=on_submit class="space-y-4">
                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Email"</label>
                    <input
                        type="email"
                        required=true
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-4 py-3
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>

                <Show when=registering>
                    <div>
                        <label class="block text-sm text-gray-400 mb-2">"Full name"</label>
                        <input
                            type="text"
                            required=true
                            prop:value=move || full_name.get()
                            on:input=move |ev| set_full_name.set(event_target_value(&ev))
                            class="w-full bg-gray-700 rounded-lg px-4 py-3
                                   border border-gray-600 focus:border-primary-500 focus:outline-none"
                        />
                    </div>
                </Show>

                {move || state.error.get().map(|message| view! {
                    <p class="text-sm text-red-400">{message}</p>
                })}

                <button
                    type="submit"
                    disabled=move || state.loading.get()
                    class="w-full px-4 py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-700
                           rounded-lg font-medium transition-colors"
                >
                    {move || match (state.loading.get(), registering()) {
                        (true, _) => "Please wait...",
                        (false, true) => "Register",
                        (false, false) => "Login",
                    }}
                </button>
            </form>

            <p class="text-sm text-gray-400 mt-6 text-center">
                {move || if registering() { "Already have an account? " } else { "New here? " }}
                <button
                    on:click=move |_| state.toggle_mode()
                    class="text-primary-400 hover:underline"
                >
                    {move || if registering() { "Login" } else { "Register" }}
                </button>
            </p>
        </div>
    }
}
