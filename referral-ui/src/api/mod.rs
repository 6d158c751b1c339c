//! HTTP API
//!
//! Functions for communicating with the referral API.

mod client;

pub use client::{fetch_summary, generate_code, login, register};
