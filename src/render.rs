//! Terminal Rendering
//!
//! Text rendition of the dashboard view.

use crate::dashboard::{AuthMode, DashboardState, ViewMode};
use crate::models::{ReferralSummary, User};
use std::fmt::Write;

/// Output format for rendered views
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Render the view for the current state
pub fn render(state: &DashboardState, format: OutputFormat) -> String {
    match format {
        OutputFormat::Table => render_table(state),
        OutputFormat::Json => render_json(state),
    }
}

fn render_json(state: &DashboardState) -> String {
    let value = serde_json::json!({
        "user": state.user,
        "summary": state.summary,
        "lastFetched": state.last_fetched,
        "error": state.error,
    });
    // Serializing a json! value cannot fail
    serde_json::to_string_pretty(&value).unwrap_or_default()
}

fn render_table(state: &DashboardState) -> String {
    let mut out = String::new();

    match state.view_mode() {
        ViewMode::Anonymous => render_anonymous(&mut out, state.mode),
        ViewMode::Loading => {
            if let Some(user) = &state.user {
                render_user(&mut out, user);
            }
            out.push_str("Loading referral data...\n");
        }
        ViewMode::Loaded => {
            if let (Some(user), Some(summary)) = (&state.user, &state.summary) {
                render_user(&mut out, user);
                render_summary(&mut out, summary);
            }
            if let Some(at) = state.last_fetched {
                let _ = writeln!(out);
                let _ = writeln!(out, "Last refreshed: {}", at.format("%Y-%m-%d %H:%M:%S UTC"));
            }
        }
    }

    if let Some(error) = &state.error {
        let _ = writeln!(out);
        let _ = writeln!(out, "Error: {}", error);
    }

    out
}

fn render_anonymous(out: &mut String, mode: AuthMode) {
    match mode {
        AuthMode::Login => {
            out.push_str("Not signed in.\n\n");
            out.push_str("Sign in with:\n  referral login --email <EMAIL>\n\n");
            out.push_str("No account yet? Register with:\n");
            out.push_str("  referral register --email <EMAIL> --name <FULL NAME>\n");
        }
        AuthMode::Register => {
            out.push_str("Create an account with:\n");
            out.push_str("  referral register --email <EMAIL> --name <FULL NAME>\n");
        }
    }
}

fn render_user(out: &mut String, user: &User) {
    let badge = if user.is_verified { "verified" } else { "unverified" };
    let _ = writeln!(out, "Welcome, {} ({})", user.display_name(), badge);
    let _ = writeln!(out, "  Email: {}", user.email);
    if let Some(role) = &user.role {
        let _ = writeln!(out, "  Role:  {}", role);
    }
    out.push('\n');
}

fn render_summary(out: &mut String, summary: &ReferralSummary) {
    let code = if summary.referral_code.is_empty() {
        "-"
    } else {
        summary.referral_code.as_str()
    };

    let _ = writeln!(out, "{:<18} {}", "Referral code", code);
    let _ = writeln!(out, "{:<18} {}", "Referred users", summary.referred_users);
    let _ = writeln!(out, "{:<18} {:.2}", "Total earnings", summary.total_earnings);
    let _ = writeln!(out, "{:<18} {:.2}", "Pending earnings", summary.pending_earnings);

    out.push('\n');
    if summary.referral_links.is_empty() {
        out.push_str("No referral links yet.\n");
        return;
    }

    let _ = writeln!(out, "{:<4} {:<20} {}", "#", "Link", "URL");
    let _ = writeln!(out, "{}", "-".repeat(60));
    for (i, link) in summary.referral_links.iter().enumerate() {
        let name = if link.name.is_empty() { &link.target } else { &link.name };
        let _ = writeln!(out, "{:<4} {:<20} {}", i + 1, name, link.url);
    }
}
