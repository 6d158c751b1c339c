//! Dashboard Controller
//!
//! The referral dashboard's state and actions: session bootstrap,
//! register/login submission, referral summary fetch, code generation,
//! clipboard copy and logout.
//!
//! Every failure shown to the user is reduced to one string in the error
//! slot. Background fetches log failures instead.

use crate::client::{ClientError, ReferralApi};
use crate::clipboard::{Clipboard, COPIED_MESSAGE};
use crate::error::{DashboardError, DashboardResult};
use crate::models::{ReferralSummary, User};
use crate::session::{clear_session, load_session, persist_session, SessionStorage};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Shown when a submission fails without a server message
pub const SUBMIT_FALLBACK: &str = "Something went wrong. Please try again.";

/// Shown when code generation fails without a server message
pub const GENERATE_FALLBACK: &str = "Failed to generate referral code";

/// Which form the anonymous view shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        }
    }
}

/// What the view renders, derived from session and summary presence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Anonymous,
    Loading,
    Loaded,
}

/// Form submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    Register { email: String, full_name: String },
    Login { email: String },
}

impl Credentials {
    fn missing_field(&self) -> Option<&'static str> {
        let (email, full_name) = match self {
            Credentials::Register { email, full_name } => (email, Some(full_name)),
            Credentials::Login { email } => (email, None),
        };

        if email.trim().is_empty() {
            Some("Email is required")
        } else if full_name.is_some_and(|name| name.trim().is_empty()) {
            Some("Full name is required")
        } else {
            None
        }
    }
}

/// What to put on the clipboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    Code,
    /// Zero-based index into the summary's links
    Link(usize),
}

impl CopyTarget {
    /// Link by its 1-based number as shown in the rendered list
    pub fn link_number(number: usize) -> DashboardResult<Self> {
        number
            .checked_sub(1)
            .map(CopyTarget::Link)
            .ok_or_else(|| DashboardError::NothingToCopy(format!("link {}", number)))
    }
}

/// View state
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub user: Option<User>,
    pub summary: Option<ReferralSummary>,
    pub mode: AuthMode,
    /// Set while a submission is in flight; further submissions are ignored
    pub loading: bool,
    /// The error slot
    pub error: Option<String>,
    /// Time of the last successful summary fetch
    pub last_fetched: Option<DateTime<Utc>>,
}

impl DashboardState {
    pub fn view_mode(&self) -> ViewMode {
        match (&self.user, &self.summary) {
            (None, _) => ViewMode::Anonymous,
            (Some(_), None) => ViewMode::Loading,
            (Some(_), Some(_)) => ViewMode::Loaded,
        }
    }
}

/// Referral dashboard over an API and a session store
pub struct Dashboard {
    api: Arc<dyn ReferralApi>,
    storage: Arc<dyn SessionStorage>,
    state: DashboardState,
}

impl Dashboard {
    pub fn new(api: Arc<dyn ReferralApi>, storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            api,
            storage,
            state: DashboardState::default(),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn view_mode(&self) -> ViewMode {
        self.state.view_mode()
    }

    /// Restore the persisted session and, when there is one, fetch its
    /// referral summary once.
    pub async fn bootstrap(&mut self) {
        let Some(user) = load_session(self.storage.as_ref()) else {
            tracing::debug!("No persisted session");
            return;
        };

        tracing::info!(user_id = %user.id, "Restored session");
        self.state.user = Some(user);
        self.refresh().await;
    }

    /// Flip between the login and register forms
    pub fn toggle_mode(&mut self) {
        self.state.mode = self.state.mode.toggled();
        self.state.error = None;
    }

    /// Submit the login or register form.
    ///
    /// Returns `true` when a session was established. On failure the session
    /// is untouched and the error slot holds the server's message or
    /// [`SUBMIT_FALLBACK`].
    pub async fn submit(&mut self, credentials: Credentials) -> bool {
        if self.state.loading {
            tracing::debug!("Submission already in flight, ignoring");
            return false;
        }

        if let Some(message) = credentials.missing_field() {
            self.state.error = Some(message.to_string());
            return false;
        }

        self.state.loading = true;
        self.state.error = None;

        let result = match &credentials {
            Credentials::Register { email, full_name } => {
                self.api.register(email.trim(), full_name.trim()).await
            }
            Credentials::Login { email } => self.api.login(email.trim()).await,
        };

        self.state.loading = false;

        match result {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "Signed in");
                if let Err(e) = persist_session(self.storage.as_ref(), &user) {
                    tracing::error!(error = %e, "Failed to persist session");
                }
                self.state.user = Some(user);
                self.state.summary = None;
                self.state.last_fetched = None;
                self.refresh().await;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Submission failed");
                self.state.error = Some(slot_message(&e, SUBMIT_FALLBACK));
                false
            }
        }
    }

    /// Re-fetch the referral summary. Failures are logged only.
    pub async fn refresh(&mut self) -> bool {
        match self.fetch_summary().await {
            Ok(fetched) => fetched,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch referral summary");
                false
            }
        }
    }

    /// Generate a new referral code, then fetch the whole summary again.
    pub async fn regenerate_code(&mut self) -> bool {
        let Some(user_id) = self.state.user.as_ref().map(|u| u.id.clone()) else {
            return false;
        };

        if let Err(e) = self.api.generate_code(&user_id).await {
            tracing::warn!(error = %e, "Code generation failed");
            self.state.error = Some(slot_message(&e, GENERATE_FALLBACK));
            return false;
        }

        tracing::info!(user_id = %user_id, "Generated new referral code");
        self.state.error = None;
        self.refresh().await
    }

    /// Copy the code or a link and return the acknowledgment to show
    pub fn copy(&self, target: CopyTarget, clipboard: &dyn Clipboard) -> DashboardResult<&'static str> {
        let summary = self
            .state
            .summary
            .as_ref()
            .ok_or_else(|| DashboardError::NothingToCopy("no referral data loaded".to_string()))?;

        let text = match target {
            CopyTarget::Code if !summary.referral_code.is_empty() => summary.referral_code.as_str(),
            CopyTarget::Code => {
                return Err(DashboardError::NothingToCopy("no referral code".to_string()))
            }
            CopyTarget::Link(index) => summary
                .referral_links
                .get(index)
                .map(|link| link.url.as_str())
                .ok_or_else(|| DashboardError::NothingToCopy(format!("link {}", index + 1)))?,
        };

        clipboard.write_text(text)?;
        Ok(COPIED_MESSAGE)
    }

    /// Drop the session from memory and storage
    pub fn logout(&mut self) -> DashboardResult<()> {
        if let Some(user) = self.state.user.take() {
            tracing::info!(user_id = %user.id, "Logged out");
        }
        self.state.summary = None;
        self.state.error = None;
        self.state.last_fetched = None;
        self.state.loading = false;

        clear_session(self.storage.as_ref())?;
        Ok(())
    }

    /// Returns `Ok(false)` when there is no session to fetch for
    async fn fetch_summary(&mut self) -> Result<bool, ClientError> {
        let Some(user_id) = self.state.user.as_ref().map(|u| u.id.clone()) else {
            return Ok(false);
        };

        let summary = self.api.summary(&user_id).await?;
        tracing::debug!(
            referred_users = summary.referred_users,
            links = summary.referral_links.len(),
            "Referral summary loaded"
        );

        self.state.summary = Some(summary);
        self.state.last_fetched = Some(Utc::now());
        Ok(true)
    }
}

fn slot_message(error: &ClientError, fallback: &str) -> String {
    error
        .server_message()
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}
