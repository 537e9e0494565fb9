//! Login against the remote panel.
//!
//! Posts form-encoded credentials and pulls the session token out of the
//! JSON response. Two response shapes exist upstream: the access-token
//! scheme (`{access_token}`) and the passport scheme
//! (`{status, data: {auth_data}}`). The token is persisted through the
//! credential store on success.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::services::credential_store::CredentialStore;
use crate::services::http_transport::HttpTransport;
use crate::types::errors::AuthError;
use crate::types::settings::{LoginScheme, ServerSettings};

pub struct Authenticator {
    transport: Arc<dyn HttpTransport>,
    store: Arc<CredentialStore>,
    server: ServerSettings,
}

impl Authenticator {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        store: Arc<CredentialStore>,
        server: ServerSettings,
    ) -> Self {
        Self {
            transport,
            store,
            server,
        }
    }

    /// Logs in with the given credentials, persists the token, returns it.
    ///
    /// # Errors
    /// [`AuthError::MissingToken`] when the response lacks the expected
    /// token field, [`AuthError::LoginRejected`] when the passport scheme
    /// reports a non-success status.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let url = format!("{}{}", self.server.base_url, self.server.login_path);

        let fields = match self.server.login_scheme {
            LoginScheme::AccessToken => vec![
                ("username".to_string(), username.to_string()),
                ("password".to_string(), password.to_string()),
            ],
            LoginScheme::Passport => vec![
                ("email".to_string(), username.to_string()),
                ("password".to_string(), password.to_string()),
            ],
        };

        debug!(url = %url, scheme = ?self.server.login_scheme, "posting login form");

        let response = self
            .transport
            .post_form(&url, &fields)
            .await
            .map_err(|e| AuthError::NetworkError(e.to_string()))?;

        let token = match self.server.login_scheme {
            LoginScheme::AccessToken => extract_access_token(&response)?,
            LoginScheme::Passport => extract_passport_token(&response)?,
        };

        self.store
            .store_token(&token)
            .map_err(|e| AuthError::StoreError(e.to_string()))?;

        debug!("login succeeded, token stored");
        Ok(token)
    }
}

fn extract_access_token(response: &Value) -> Result<String, AuthError> {
    response
        .get("access_token")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            warn!("login response carried no access_token field");
            AuthError::MissingToken("no access_token in response".to_string())
        })
}

fn extract_passport_token(response: &Value) -> Result<String, AuthError> {
    let status = response
        .get("status")
        .and_then(Value::as_str)
        .unwrap_or("missing");

    if status != "success" {
        let errors = response
            .get("errors")
            .map(Value::to_string)
            .unwrap_or_default();
        return Err(AuthError::LoginRejected(format!(
            "status {} {}",
            status, errors
        )));
    }

    response
        .pointer("/data/auth_data")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| AuthError::MissingToken("no data.auth_data in response".to_string()))
}
