//! App-level tests through the injected transport seam.
//!
//! Cover the login credential lifecycle and the outermost
//! error-to-widget conversion in `render_dashboard`: missing credentials
//! render the login prompt, network and parse failures render the error
//! widget, and no branch escapes as a process failure.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tempfile::TempDir;

use ptdash::app::App;
use ptdash::services::credential_store::CredentialStoreTrait;
use ptdash::services::http_transport::HttpTransport;
use ptdash::types::credential::{PASSWORD_KEY, TOKEN_KEY, USERNAME_KEY};
use ptdash::types::errors::NetworkError;

struct MockTransport {
    get_responses: Mutex<VecDeque<Result<Value, NetworkError>>>,
    post_responses: Mutex<VecDeque<Result<Value, NetworkError>>>,
    get_calls: AtomicUsize,
    post_calls: AtomicUsize,
}

impl MockTransport {
    fn new(
        get_responses: Vec<Result<Value, NetworkError>>,
        post_responses: Vec<Result<Value, NetworkError>>,
    ) -> Self {
        Self {
            get_responses: Mutex::new(get_responses.into()),
            post_responses: Mutex::new(post_responses.into()),
            get_calls: AtomicUsize::new(0),
            post_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn post_form(
        &self,
        _url: &str,
        _fields: &[(String, String)],
    ) -> Result<Value, NetworkError> {
        self.post_calls.fetch_add(1, Ordering::SeqCst);
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
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.get_responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected GET")
    }
}

/// App wired to a scripted transport, with its database and settings file
/// isolated in a temp directory.
fn app_with(transport: Arc<MockTransport>) -> (App, TempDir) {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("secrets.db").to_string_lossy().to_string();
    let settings_path = dir
        .path()
        .join("settings.json")
        .to_string_lossy()
        .to_string();

    let app = App::with_transport(Some(db_path), Some(settings_path), transport).unwrap();
    (app, dir)
}

#[tokio::test]
async fn test_rejected_login_persists_nothing() {
    let transport = Arc::new(MockTransport::new(
        vec![],
        vec![Err(NetworkError::Status(401, "bad credentials".to_string()))],
    ));
    let (app, _dir) = app_with(transport.clone());

    app.login("alice", "wrong-password").await.unwrap_err();

    assert!(!app.store.contains(USERNAME_KEY).unwrap());
    assert!(!app.store.contains(PASSWORD_KEY).unwrap());
    assert!(!app.store.contains(TOKEN_KEY).unwrap());
    assert_eq!(transport.post_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_accepted_login_persists_credentials_and_token() {
    let transport = Arc::new(MockTransport::new(
        vec![],
        vec![Ok(json!({ "access_token": "tok-1" }))],
    ));
    let (app, _dir) = app_with(transport);

    app.login("alice", "secret").await.unwrap();

    assert!(app.store.contains(USERNAME_KEY).unwrap());
    assert!(app.store.contains(PASSWORD_KEY).unwrap());
    assert_eq!(app.store.token().unwrap(), Some("tok-1".to_string()));
}

#[tokio::test]
async fn test_render_without_credentials_shows_login_prompt() {
    let transport = Arc::new(MockTransport::new(vec![], vec![]));
    let (app, _dir) = app_with(transport.clone());

    let widget = app.render_dashboard().await;

    assert!(widget.to_plain_text().contains("ptdash login"));
    assert_eq!(transport.get_calls.load(Ordering::SeqCst), 0);
    assert_eq!(transport.post_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_render_network_failure_shows_error_widget() {
    let transport = Arc::new(MockTransport::new(
        vec![Err(NetworkError::Status(500, "boom".to_string()))],
        vec![],
    ));
    let (app, _dir) = app_with(transport);
    app.store.store_token("tok").unwrap();

    let text = app.render_dashboard().await.to_plain_text();

    assert!(text.contains("数据获取失败"));
    assert!(text.contains("500"));
}

#[tokio::test]
async fn test_render_malformed_payload_shows_error_widget() {
    let transport = Arc::new(MockTransport::new(
        vec![Ok(json!({ "unexpected": "shape" }))],
        vec![],
    ));
    let (app, _dir) = app_with(transport);
    app.store.store_token("tok").unwrap();

    let text = app.render_dashboard().await.to_plain_text();

    assert!(text.contains("数据获取失败"));
}
