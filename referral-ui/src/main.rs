//! Referral Dashboard
//!
//! Referral management page built with Leptos (WASM).
//!
//! # Features
//!
//! - Login and registration with an email
//! - Referral code, links and earnings
//! - Copy to clipboard and code regeneration
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It talks to the referral API over HTTP and keeps the signed-in
//! user in `localStorage`.

use leptos::*;

mod api;
mod app;
mod components;
mod models;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
