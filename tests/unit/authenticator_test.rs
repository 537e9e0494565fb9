//! Unit tests for the authenticator, driven through a scripted transport.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use ptdash::database::connection::Database;
use ptdash::services::authenticator::Authenticator;
use ptdash::services::credential_store::CredentialStore;
use ptdash::services::http_transport::HttpTransport;
use ptdash::types::errors::{AuthError, NetworkError};
use ptdash::types::settings::{LoginScheme, ServerSettings};

/// Transport that replays scripted responses and records calls.
struct MockTransport {
    post_responses: Mutex<VecDeque<Result<Value, NetworkError>>>,
    post_calls: AtomicUsize,
    last_post_fields: Mutex<Vec<(String, String)>>,
}

impl MockTransport {
    fn new(post_responses: Vec<Result<Value, NetworkError>>) -> Self {
        Self {
            post_responses: Mutex::new(post_responses.into()),
            post_calls: AtomicUsize::new(0),
            last_post_fields: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn post_form(
        &self,
        _url: &str,
        fields: &[(String, String)],
    ) -> Result<Value, NetworkError> {
        self.post_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_post_fields.lock().unwrap() = fields.to_vec();
        self.post_responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected POST")
    }

    async fn get_json(
        &self,
        _url: &str,
        _headers: &[(String, String)],
    ) -> Result<Value, NetworkError> {
        panic!("authenticator must not GET");
    }
}

fn store_in_memory() -> Arc<CredentialStore> {
    let db = Arc::new(Database::open_in_memory().unwrap());
    Arc::new(CredentialStore::new(db).unwrap())
}

fn server(scheme: LoginScheme) -> ServerSettings {
    ServerSettings {
        base_url: "https://pt.example.org".to_string(),
        login_path: "/api/v1/login/access-token".to_string(),
        stats_path: "/api/v1/plugin/page/SiteStatistic".to_string(),
        login_scheme: scheme,
        token_cookie_name: Some("MoviePilot".to_string()),
    }
}

#[tokio::test]
async fn test_access_token_login_stores_and_returns_token() {
    let transport = Arc::new(MockTransport::new(vec![Ok(
        json!({ "access_token": "tok-123" }),
    )]));
    let store = store_in_memory();
    let auth = Authenticator::new(
        transport.clone(),
        store.clone(),
        server(LoginScheme::AccessToken),
    );

    let token = auth.login("alice", "secret").await.unwrap();

    assert_eq!(token, "tok-123");
    assert_eq!(store.token().unwrap(), Some("tok-123".to_string()));
    assert_eq!(transport.post_calls.load(Ordering::SeqCst), 1);

    let fields = transport.last_post_fields.lock().unwrap().clone();
    assert!(fields.contains(&("username".to_string(), "alice".to_string())));
    assert!(fields.contains(&("password".to_string(), "secret".to_string())));
}

#[tokio::test]
async fn test_missing_access_token_is_an_error_and_stores_nothing() {
    let transport = Arc::new(MockTransport::new(vec![Ok(json!({ "detail": "bad" }))]));
    let store = store_in_memory();
    let auth = Authenticator::new(
        transport,
        store.clone(),
        server(LoginScheme::AccessToken),
    );

    let err = auth.login("alice", "wrong").await.unwrap_err();

    assert!(matches!(err, AuthError::MissingToken(_)));
    assert_eq!(store.token().unwrap(), None);
}

#[tokio::test]
async fn test_passport_login_uses_email_field_and_auth_data() {
    let transport = Arc::new(MockTransport::new(vec![Ok(json!({
        "status": "success",
        "data": { "auth_data": "Bearer xyz" }
    }))]));
    let store = store_in_memory();
    let auth = Authenticator::new(
        transport.clone(),
        store.clone(),
        server(LoginScheme::Passport),
    );

    let token = auth.login("a@example.org", "secret").await.unwrap();

    assert_eq!(token, "Bearer xyz");
    assert_eq!(store.token().unwrap(), Some("Bearer xyz".to_string()));

    let fields = transport.last_post_fields.lock().unwrap().clone();
    assert!(fields.contains(&("email".to_string(), "a@example.org".to_string())));
}

#[tokio::test]
async fn test_passport_failure_status_is_rejected() {
    let transport = Arc::new(MockTransport::new(vec![Ok(json!({
        "status": "fail",
        "errors": { "email": "unknown account" }
    }))]));
    let store = store_in_memory();
    let auth = Authenticator::new(transport, store.clone(), server(LoginScheme::Passport));

    let err = auth.login("a@example.org", "secret").await.unwrap_err();

    assert!(matches!(err, AuthError::LoginRejected(_)));
    assert_eq!(store.token().unwrap(), None);
}

#[tokio::test]
async fn test_network_failure_surfaces_as_auth_network_error() {
    let transport = Arc::new(MockTransport::new(vec![Err(NetworkError::Timeout(
        "20s elapsed".to_string(),
    ))]));
    let store = store_in_memory();
    let auth = Authenticator::new(transport, store, server(LoginScheme::AccessToken));

    let err = auth.login("alice", "secret").await.unwrap_err();
    assert!(matches!(err, AuthError::NetworkError(_)));
}
