//! Dashboard State
//!
//! Reactive state shared by every component, and the actions that change it.

use leptos::*;
use wasm_bindgen_futures::JsFuture;

use crate::api;
use crate::models::{AuthMode, ReferralSummary, User};
use crate::state::session;

/// Acknowledgment shown after a copy
pub const COPIED_MESSAGE: &str = "Copied to clipboard!";

/// Dashboard state provided to all components
#[derive(Clone, Copy)]
pub struct DashboardState {
    /// Signed-in user, mirrored in localStorage
    pub user: RwSignal<Option<User>>,
    /// Referral data for the signed-in user
    pub summary: RwSignal<Option<ReferralSummary>>,
    /// Login or register form
    pub mode: RwSignal<AuthMode>,
    /// A submission is in flight
    pub loading: RwSignal<bool>,
    /// Error slot under the form or card
    pub error: RwSignal<Option<String>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    Anonymous,
    Loading,
    Loaded,
}

/// Derive the view mode from session and summary presence
pub fn view_mode(user: Option<&User>, summary: Option<&ReferralSummary>) -> ViewMode {
    match (user, summary) {
        (None, _) => ViewMode::Anonymous,
        (Some(_), None) => ViewMode::Loading,
        (Some(_), Some(_)) => ViewMode::Loaded,
    }
}

/// Provide dashboard state to the component tree, restoring any stored
/// session and fetching its referral data.
pub fn provide_dashboard_state() {
    let state = DashboardState {
        user: create_rw_signal(None),
        summary: create_rw_signal(None),
        mode: create_rw_signal(AuthMode::default()),
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
    };

    provide_context(state);
    state.bootstrap();
}

impl DashboardState {
    pub fn view_mode(&self) -> ViewMode {
        self.user
            .with(|user| self.summary.with(|summary| view_mode(user.as_ref(), summary.as_ref())))
    }

    fn bootstrap(&self) {
        if let Some(user) = session::load() {
            let user_id = user.id.clone();
            self.user.set(Some(user));
            self.refresh(user_id);
        }
    }

    /// Flip between the login and register forms
    pub fn toggle_mode(&self) {
        self.mode.update(|mode| *mode = mode.toggled());
        self.error.set(None);
    }

    /// Submit the login or register form
    pub fn submit(&self, email: String, full_name: String) {
        if self.loading.get_untracked() {
            return;
        }

        let mode = self.mode.get_untracked();
        let email = email.trim().to_string();
        let full_name = full_name.trim().to_string();

        if email.is_empty() {
            self.error.set(Some("Email is required".to_string()));
            return;
        }
        if mode == AuthMode::Register && full_name.is_empty() {
            self.error.set(Some("Full name is required".to_string()));
            return;
        }

        self.loading.set(true);
        self.error.set(None);

        let state = *self;
        spawn_local(async move {
            let result = match mode {
                AuthMode::Register => api::register(&email, &full_name).await,
                AuthMode::Login => api::login(&email).await,
            };
            state.loading.set(false);

            match result {
                Ok(user) => {
                    session::persist(&user);
                    let user_id = user.id.clone();
                    state.summary.set(None);
                    state.user.set(Some(user));
                    state.refresh(user_id);
                }
                Err(message) => state.error.set(Some(message)),
            }
        });
    }

    /// Fetch the referral summary again. Failures go to the console only.
    ///
    /// A response that lands after logout or a sign-in as someone else is
    /// dropped.
    pub fn refresh(&self, user_id: String) {
        let state = *self;
        spawn_local(async move {
            match api::fetch_summary(&user_id).await {
                Ok(data) if state.user.with_untracked(|u| is_current(u.as_ref(), &user_id)) => {
                    state.summary.set(Some(data))
                }
                Ok(_) => {
                    web_sys::console::warn_1(&"Dropping referral data for a stale session".into());
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch referral data: {}", e).into());
                }
            }
        });
    }

    /// Generate a new code, then fetch the whole summary again
    pub fn regenerate_code(&self) {
        let Some(user_id) = self.user.with_untracked(|u| u.as_ref().map(|u| u.id.clone())) else {
            return;
        };

        let state = *self;
        spawn_local(async move {
            match api::generate_code(&user_id).await {
                Ok(()) => {
                    state.error.set(None);
                    state.refresh(user_id);
                }
                Err(message) => state.error.set(Some(message)),
            }
        });
    }

    /// Drop the session from memory and localStorage
    pub fn logout(&self) {
        session::clear();
        self.user.set(None);
        self.summary.set(None);
        self.error.set(None);
        self.loading.set(false);
    }
}

/// Whether `user_id` is still the signed-in user
pub fn is_current(user: Option<&User>, user_id: &str) -> bool {
    user.is_some_and(|user| user.id == user_id)
}

/// Write text to the system clipboard, then acknowledge with a blocking alert
pub fn copy_to_clipboard(text: String) {
    let Some(window) = web_sys::window() else {
        return;
    };

    spawn_local(async move {
        let promise = window.navigator().clipboard().write_text(&text);
        match JsFuture::from(promise).await {
            Ok(_) => {
                let _ = window.alert_with_message(COPIED_MESSAGE);
            }
            Err(e) => web_sys::console::error_2(&"Clipboard write failed".into(), &e),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_mode() {
        let user: User = serde_json::from_str(r#"{"id":"u1"}"#).unwrap();
        let summary = ReferralSummary::default();

        assert_eq!(view_mode(None, Some(&summary)), ViewMode::Anonymous);
        assert_eq!(view_mode(Some(&user), None), ViewMode::Loading);
        assert_eq!(view_mode(Some(&user), Some(&summary)), ViewMode::Loaded);
    }

    #[test]
    fn test_stale_summary_is_not_current() {
        let user: User = serde_json::from_str(r#"{"_id":"u2"}"#).unwrap();

        assert!(is_current(Some(&user), "u2"));
        assert!(!is_current(Some(&user), "u1"));
        assert!(!is_current(None, "u2"));
    }
}
