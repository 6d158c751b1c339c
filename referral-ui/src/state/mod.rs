//! State Management
//!
//! Dashboard state and the persisted session.

pub mod global;
pub mod session;

pub use global::{provide_dashboard_state, DashboardState, ViewMode};
