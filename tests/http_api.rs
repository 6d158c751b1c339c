//! End-to-end tests of `ReferralClient` and `Dashboard` against an
//! in-process stub of the referral API.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use referral_dashboard::{
    load_session, ClientConfig, ClientError, Credentials, Dashboard, MemoryStorage, ReferralApi,
    ReferralClient, SessionStorage, ViewMode, SESSION_KEY, SUBMIT_FALLBACK,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct StubState {
    /// email -> user json
    users: HashMap<String, Value>,
    /// user id -> referral code
    codes: HashMap<String, String>,
    summary_calls: usize,
    code_calls: usize,
}

type Shared = Arc<Mutex<StubState>>;

fn new_code() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_uppercase()
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "success": false, "message": message }))).into_response()
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

async fn register(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    let full_name = body["fullName"].as_str().unwrap_or_default().to_string();

    let mut state = state.lock().unwrap();
    if state.users.contains_key(&email) {
        return error(StatusCode::CONFLICT, "An account with this email already exists");
    }

    let id = uuid::Uuid::new_v4().to_string();
    let user = json!({
        "_id": id,
        "email": email,
        "fullName": full_name,
        "isVerified": false,
        "role": "admin",
        "createdAt": "2024-06-01T12:00:00Z"
    });
    state.users.insert(email, user.clone());
    state.codes.insert(id, new_code());

    (StatusCode::CREATED, Json(json!({ "success": true, "user": user }))).into_response()
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();

    let state = state.lock().unwrap();
    match state.users.get(email) {
        Some(user) => Json(json!({ "success": true, "user": user })).into_response(),
        None => error(StatusCode::NOT_FOUND, "User not found"),
    }
}

async fn summary(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut state = state.lock().unwrap();
    state.summary_calls += 1;

    let Some(code) = bearer(&headers).and_then(|id| state.codes.get(&id).cloned()) else {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    };

    Json(json!({
        "success": true,
        "data": {
            "referralCode": code,
            "referralLinks": [
                { "target": "web", "name": "Website", "url": format!("https://example.com/join?ref={}", code) },
                { "target": "ios", "name": "iOS app", "url": format!("https://apps.example.com/ios?ref={}", code) }
            ],
            "referredUsers": 4,
            "totalEarnings": 80.0,
            "pendingEarnings": 20.0
        }
    }))
    .into_response()
}

async fn code(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut state = state.lock().unwrap();
    state.code_calls += 1;

    match bearer(&headers) {
        Some(id) if state.codes.contains_key(&id) => {
            state.codes.insert(id, new_code());
            Json(json!({ "success": true })).into_response()
        }
        _ => error(StatusCode::UNAUTHORIZED, "Unauthorized"),
    }
}

/// Body-less 500 for the fallback message path
async fn broken() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn spawn_stub() -> (String, Shared) {
    let state = Shared::default();

    let app = Router::new()
        .route("/api/auth/admin/register", post(register))
        .route("/api/auth/admin/login", post(login))
        .route("/api/referral/admin/summary", get(summary))
        .route("/api/referral/admin/code", get(code))
        .route("/broken/auth/admin/login", post(broken))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), state)
}

fn client(base: &str, prefix: &str) -> ReferralClient {
    ReferralClient::new(ClientConfig {
        base_url: format!("{}{}", base, prefix),
        request_timeout_ms: 5000,
    })
    .unwrap()
}

#[tokio::test]
async fn test_client_register_login_summary() {
    let (base, _state) = spawn_stub().await;
    let api = client(&base, "/api");

    let user = api.register("mo@example.com", "Mo Salah").await.unwrap();
    assert_eq!(user.email, "mo@example.com");
    assert_eq!(user.full_name.as_deref(), Some("Mo Salah"));
    assert!(!user.id.is_empty());

    let again = api.login("mo@example.com").await.unwrap();
    assert_eq!(again.id, user.id);

    let summary = api.summary(&user.id).await.unwrap();
    assert_eq!(summary.referral_links.len(), 2);
    assert_eq!(summary.referred_users, 4);
    assert!(summary.referral_links[0].url.ends_with(&summary.referral_code));
}

#[tokio::test]
async fn test_client_surfaces_server_messages() {
    let (base, _state) = spawn_stub().await;
    let api = client(&base, "/api");

    let err = api.login("ghost@example.com").await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 404, .. }));
    assert_eq!(err.server_message(), Some("User not found"));

    api.register("dup@example.com", "Dup").await.unwrap();
    let err = api.register("dup@example.com", "Dup").await.unwrap_err();
    assert_eq!(err.server_message(), Some("An account with this email already exists"));

    let err = api.summary("not-a-user").await.unwrap_err();
    assert_eq!(err.server_message(), Some("Unauthorized"));
}

#[tokio::test]
async fn test_client_connection_refused_is_unavailable() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = client(&format!("http://{}", addr), "");
    let err = api.login("a@b.c").await.unwrap_err();
    assert!(matches!(err, ClientError::Unavailable));
    assert_eq!(err.server_message(), None);
}

#[tokio::test]
async fn test_dashboard_full_flow() {
    let (base, state) = spawn_stub().await;
    let storage = Arc::new(MemoryStorage::new());

    let mut dash = Dashboard::new(Arc::new(client(&base, "/api")), storage.clone());
    dash.bootstrap().await;
    assert_eq!(dash.view_mode(), ViewMode::Anonymous);

    dash.toggle_mode();
    let ok = dash
        .submit(Credentials::Register {
            email: "ana@example.com".to_string(),
            full_name: "Ana Lima".to_string(),
        })
        .await;
    assert!(ok);
    assert_eq!(dash.view_mode(), ViewMode::Loaded);
    assert_eq!(state.lock().unwrap().summary_calls, 1);

    // The persisted blob is the user object the API returned, key for key
    let stored: Value = serde_json::from_str(&storage.get_item(SESSION_KEY).unwrap().unwrap()).unwrap();
    let api_user = state.lock().unwrap().users["ana@example.com"].clone();
    assert_eq!(stored, api_user);
    assert_eq!(load_session(storage.as_ref()).unwrap().id, api_user["_id"].as_str().unwrap());

    let old_code = dash.state().summary.as_ref().unwrap().referral_code.clone();
    assert!(dash.regenerate_code().await);
    let new_code = dash.state().summary.as_ref().unwrap().referral_code.clone();
    assert_ne!(old_code, new_code);
    {
        let state = state.lock().unwrap();
        assert_eq!(state.code_calls, 1);
        assert_eq!(state.summary_calls, 2);
    }

    // A fresh dashboard over the same storage restores the session
    let mut reopened = Dashboard::new(Arc::new(client(&base, "/api")), storage.clone());
    reopened.bootstrap().await;
    assert_eq!(reopened.view_mode(), ViewMode::Loaded);
    assert_eq!(reopened.state().summary.as_ref().unwrap().referral_code, new_code);

    reopened.logout().unwrap();
    assert!(load_session(storage.as_ref()).is_none());
    assert_eq!(reopened.view_mode(), ViewMode::Anonymous);
}

#[tokio::test]
async fn test_dashboard_fallback_message() {
    let (base, _state) = spawn_stub().await;
    let storage = Arc::new(MemoryStorage::new());

    let mut dash = Dashboard::new(Arc::new(client(&base, "/broken")), storage);
    let ok = dash
        .submit(Credentials::Login {
            email: "ana@example.com".to_string(),
        })
        .await;

    assert!(!ok);
    assert_eq!(dash.state().error.as_deref(), Some(SUBMIT_FALLBACK));
    assert_eq!(dash.view_mode(), ViewMode::Anonymous);
}
