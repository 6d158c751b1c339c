//! # Referral Dashboard
//!
//! Client for a referral API: register or log in with an email, then view
//! referral codes, links and earnings, and generate new codes.
//!
//! ## Modules
//!
//! - [`dashboard`]: View state and actions (bootstrap, submit, refresh,
//!   regenerate, copy, logout)
//! - [`client`]: HTTP client for the referral API
//! - [`session`]: Persisted session storage
//! - [`render`]: Terminal presentation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use referral_dashboard::{ClientConfig, Credentials, Dashboard, FileStorage, ReferralClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ReferralClient::new(ClientConfig::default())?;
//!     let storage = FileStorage::new("session.json");
//!     let mut dashboard = Dashboard::new(Arc::new(client), Arc::new(storage));
//!
//!     // Picks up a previous session and fetches its summary
//!     dashboard.bootstrap().await;
//!
//!     if dashboard.state().user.is_none() {
//!         let email = "ada@example.com".to_string();
//!         if !dashboard.submit(Credentials::Login { email }).await {
//!             eprintln!("{}", dashboard.state().error.as_deref().unwrap_or_default());
//!         }
//!     }
//!
//!     if let Some(summary) = &dashboard.state().summary {
//!         println!("Your code: {}", summary.referral_code);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod clipboard;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod render;
pub mod session;

pub use client::{ClientConfig, ClientError, ReferralApi, ReferralClient};

pub use clipboard::{Clipboard, ClipboardError, Osc52Clipboard, COPIED_MESSAGE};

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig, SessionConfig};

pub use dashboard::{
    AuthMode, CopyTarget, Credentials, Dashboard, DashboardState, ViewMode, GENERATE_FALLBACK,
    SUBMIT_FALLBACK,
};

pub use error::{DashboardError, DashboardResult};

pub use models::{ReferralLink, ReferralSummary, User};

pub use render::{render, OutputFormat};

pub use session::{
    clear_session, load_session, persist_session, FileStorage, MemoryStorage, SessionStorage,
    StorageError, SESSION_KEY,
};
