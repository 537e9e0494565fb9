//! Authenticated statistics fetch with a bounded re-login policy.
//!
//! One GET against the stats endpoint per render pass. On an HTTP 401 the
//! stored token is cleared; when a username/password pair is on record the
//! fetcher re-authenticates exactly once and retries the GET exactly once.
//! It never recurses and never retries on non-auth failures — the next
//! scheduled render is the retry.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::services::authenticator::Authenticator;
use crate::services::credential_store::CredentialStore;
use crate::services::http_transport::HttpTransport;
use crate::types::errors::{AuthError, FetchError, NetworkError};
use crate::types::settings::ServerSettings;

pub struct StatsFetcher {
    transport: Arc<dyn HttpTransport>,
    store: Arc<CredentialStore>,
    server: ServerSettings,
    authenticator: Authenticator,
}

impl StatsFetcher {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        store: Arc<CredentialStore>,
        server: ServerSettings,
    ) -> Self {
        let authenticator =
            Authenticator::new(transport.clone(), store.clone(), server.clone());
        Self {
            transport,
            store,
            server,
            authenticator,
        }
    }

    /// Fetches the raw statistics document.
    ///
    /// Resolves a token (stored, or via login with stored credentials),
    /// issues the GET, and applies the single-shot 401 recovery described
    /// in the module docs.
    pub async fn fetch(&self) -> Result<Value, FetchError> {
        let token = self.resolve_token().await?;

        match self.get_stats(&token).await {
            Ok(response) => Ok(response),
            Err(e) if e.is_auth_failure() => self.recover_from_auth_failure().await,
            Err(e) => Err(e.into()),
        }
    }

    /// Returns the stored token, logging in with stored credentials when
    /// no token is on record.
    async fn resolve_token(&self) -> Result<String, FetchError> {
        if let Some(token) = self
            .store
            .token()
            .map_err(|e| AuthError::StoreError(e.to_string()))?
        {
            return Ok(token);
        }

        match self
            .store
            .stored_login()
            .map_err(|e| AuthError::StoreError(e.to_string()))?
        {
            Some(creds) => {
                debug!("no stored token, logging in with stored credentials");
                Ok(self
                    .authenticator
                    .login(&creds.username, &creds.password)
                    .await?)
            }
            None => Err(AuthError::NotLoggedIn.into()),
        }
    }

    /// The one-shot 401 path: clear the token, re-login once when
    /// credentials are stored, retry the GET once. A second 401 clears
    /// the token again and gives up.
    async fn recover_from_auth_failure(&self) -> Result<Value, FetchError> {
        warn!("stats request rejected with 401, clearing stored token");
        self.store
            .clear_token()
            .map_err(|e| AuthError::StoreError(e.to_string()))?;

        let creds = match self
            .store
            .stored_login()
            .map_err(|e| AuthError::StoreError(e.to_string()))?
        {
            Some(creds) => creds,
            None => return Err(AuthError::NotLoggedIn.into()),
        };

        info!("re-authenticating once with stored credentials");
        let token = self
            .authenticator
            .login(&creds.username, &creds.password)
            .await?;

        match self.get_stats(&token).await {
            Ok(response) => Ok(response),
            Err(e) if e.is_auth_failure() => {
                warn!("retry after re-login was rejected again, giving up");
                self.store
                    .clear_token()
                    .map_err(|se| AuthError::StoreError(se.to_string()))?;
                Err(AuthError::LoginRejected(e.to_string()).into())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get_stats(&self, token: &str) -> Result<Value, NetworkError> {
        let url = format!("{}{}", self.server.base_url, self.server.stats_path);

        let mut headers = vec![(
            "Authorization".to_string(),
            format!("Bearer {}", token),
        )];
        if let Some(cookie_name) = &self.server.token_cookie_name {
            headers.push(("Cookie".to_string(), format!("{}={}", cookie_name, token)));
        }

        self.transport.get_json(&url, &headers).await
    }
}
