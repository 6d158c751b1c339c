//! UI Components
//!
//! Leptos components for the referral dashboard.

pub mod nav;
pub mod login_form;
pub mod referral_card;
pub mod referral_links;
pub mod loading;

pub use nav::Nav;
pub use login_form::LoginForm;
pub use referral_card::ReferralCard;
pub use referral_links::ReferralLinks;
pub use loading::Loading;
