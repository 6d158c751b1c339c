//! Persisted Session
//!
//! The signed-in user lives in `localStorage` under a fixed key, with no
//! expiry. Other tabs write the same key; the last write wins.

use crate::models::User;

/// Storage key holding the serialized session
pub const SESSION_KEY: &str = "referralUser";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Parse a stored session. Anything unusable reads as no session.
pub fn parse_session(raw: &str) -> Option<User> {
    serde_json::from_str::<User>(raw)
        .ok()
        .filter(|user| !user.id.is_empty())
}

/// Read the stored session, dropping it if it does not parse
pub fn load() -> Option<User> {
    let storage = local_storage()?;
    let raw = storage.get_item(SESSION_KEY).ok().flatten()?;

    let user = parse_session(&raw);
    if user.is_none() {
        let _ = storage.remove_item(SESSION_KEY);
    }
    user
}

/// Store the user exactly as received
pub fn persist(user: &User) {
    let Some(storage) = local_storage() else {
        return;
    };

    match serde_json::to_string(user) {
        Ok(raw) => {
            let _ = storage.set_item(SESSION_KEY, &raw);
        }
        Err(e) => {
            web_sys::console::error_1(&format!("Failed to store session: {}", e).into());
        }
    }
}

/// Forget the stored session
pub fn clear() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(SESSION_KEY);
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn malformed_session_is_removed() {
        let storage = local_storage().unwrap();
        storage.set_item(SESSION_KEY, "not json").unwrap();

        assert!(load().is_none());
        assert_eq!(storage.get_item(SESSION_KEY).unwrap(), None);
    }

    #[wasm_bindgen_test]
    fn persist_load_clear() {
        let user = parse_session(r#"{"id":"u7","email":"x@y.z","isVerified":true}"#).unwrap();

        persist(&user);
        assert_eq!(load(), Some(user));

        clear();
        assert!(load().is_none());
    }
}
