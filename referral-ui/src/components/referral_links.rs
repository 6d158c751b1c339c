//! Referral Links Component

use leptos::*;

use crate::models::ReferralLink;
use crate::state::global::copy_to_clipboard;

/// One row per referral link, each with a copy button
#[component]
pub fn ReferralLinks(links: Vec<ReferralLink>) -> impl IntoView {
    if links.is_empty() {
        return view! {
            <section class="bg-gray-800 rounded-xl p-6 text-gray-400">"No referral links yet."</section>
        }
        .into_view();
    }

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Referral links"</h2>
            <ul class="space-y-3">
                {links.into_iter().map(|link| {
                    let name = if link.name.is_empty() { link.target.clone() } else { link.name.clone() };
                    let url = link.url.clone();

                    view! {
                        <li class="flex items-center justify-between bg-gray-700 rounded-lg px-4 py-3">
                            <div class="min-w-0">
                                <p class="font-medium">{name}</p>
                                <p class="text-sm text-gray-400 truncate">{link.url}</p>
                            </div>
                            <button
                                on:click=move |_| copy_to_clipboard(url.clone())
                                class="ml-4 px-3 py-2 bg-gray-600 hover:bg-gray-500 rounded-lg text-sm font-medium transition-colors"
                            >
                                "Copy link"
                            </button>
                        </li>
                    }
                }).collect_view()}
            </ul>
        </section>
    }
    .into_view()
}
