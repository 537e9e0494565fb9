//! App core for ptdash.
//!
//! Wires the database, credential store, settings engine, fetcher, parser,
//! layout engine, and renderer. `render_dashboard` is the outermost call
//! of a render pass: every auth, network, or parse failure is converted
//! into a fallback widget there, never propagated to the host process.

use std::fs;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::database::connection::Database;
use crate::platform;
use crate::services::authenticator::Authenticator;
use crate::services::credential_store::CredentialStore;
use crate::services::http_transport::{HttpTransport, ReqwestTransport};
use crate::services::layout_engine::{allocate, COLUMN_SPACING, TOTAL_WIDTH};
use crate::services::page_parser;
use crate::services::renderer::{
    build_error_widget, build_login_prompt, build_site_widget, build_subscription_widget, Widget,
};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::stats_fetcher::StatsFetcher;
use crate::types::errors::{AuthError, CredentialError, FetchError, SettingsError};
use crate::types::settings::LoginScheme;

/// Central application struct for one dashboard process.
pub struct App {
    pub db: Arc<Database>,
    pub settings_engine: SettingsEngine,
    pub store: Arc<CredentialStore>,
    transport: Arc<dyn HttpTransport>,
}

impl App {
    /// Creates a new App with the production HTTP transport.
    ///
    /// `db_path_override` and `settings_path_override` exist for tests;
    /// `None` selects the platform data/config directories.
    pub fn new(
        db_path_override: Option<String>,
        settings_path_override: Option<String>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new()?);
        Self::with_transport(db_path_override, settings_path_override, transport)
    }

    /// Creates a new App with an injected transport (used by tests).
    pub fn with_transport(
        db_path_override: Option<String>,
        settings_path_override: Option<String>,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let db_path = match db_path_override {
            Some(p) => p,
            None => {
                let data_dir = platform::get_data_dir();
                fs::create_dir_all(&data_dir)?;
                data_dir.join("secrets.db").to_string_lossy().to_string()
            }
        };

        let db = Arc::new(Database::open(&db_path)?);
        let store = Arc::new(
            CredentialStore::new(db.clone())
                .map_err(|e| format!("CredentialStore init failed: {}", e))?,
        );

        let mut settings_engine = SettingsEngine::new(settings_path_override);
        settings_engine.load()?;

        Ok(Self {
            db,
            settings_engine,
            store,
            transport,
        })
    }

    /// Runs one full render pass and returns the widget to print.
    ///
    /// Never fails: auth errors become the login prompt, everything else
    /// becomes the error widget. The retry is the next scheduled run.
    pub async fn render_dashboard(&self) -> Widget {
        let settings = self.settings_engine.get_settings().clone();

        let fetcher = StatsFetcher::new(
            self.transport.clone(),
            self.store.clone(),
            settings.server.clone(),
        );

        let raw = match fetcher.fetch().await {
            Ok(raw) => raw,
            Err(FetchError::Auth(AuthError::NotLoggedIn)) => {
                debug!("no credentials stored, rendering login prompt");
                return build_login_prompt();
            }
            Err(e) => {
                warn!(error = %e, "fetch failed, rendering fallback");
                return build_error_widget(&e.to_string());
            }
        };

        match settings.server.login_scheme {
            LoginScheme::AccessToken => match page_parser::parse_site_stats(&raw) {
                Ok(snapshot) => {
                    let widths = allocate(settings.display, TOTAL_WIDTH, COLUMN_SPACING);
                    build_site_widget(&snapshot, settings.display, widths)
                }
                Err(e) => {
                    warn!(error = %e, "site stats parse failed");
                    build_error_widget(&e.to_string())
                }
            },
            LoginScheme::Passport => match page_parser::parse_subscription(&raw) {
                Ok(snapshot) => build_subscription_widget(&snapshot),
                Err(e) => {
                    warn!(error = %e, "subscription parse failed");
                    build_error_widget(&e.to_string())
                }
            },
        }
    }

    /// Authenticates and remembers the credentials for automatic re-login.
    ///
    /// Credentials are persisted only after the panel accepts them; a
    /// rejected login leaves nothing stored for later render passes to
    /// retry with.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let settings = self.settings_engine.get_settings();
        let authenticator = Authenticator::new(
            self.transport.clone(),
            self.store.clone(),
            settings.server.clone(),
        );
        authenticator.login(username, password).await?;

        self.store
            .store_login(username, password)
            .map_err(|e| AuthError::StoreError(e.to_string()))?;
        Ok(())
    }

    /// Clears every stored secret.
    pub fn logout(&self) -> Result<(), CredentialError> {
        self.store.clear_all()
    }

    /// Toggles one display option (`bonus` or `seeds`) and persists it.
    pub fn set_display_option(&mut self, option: &str, enabled: bool) -> Result<(), SettingsError> {
        let key = match option {
            "bonus" => "display.show_bonus",
            "seeds" => "display.show_seeds",
            other => {
                return Err(SettingsError::InvalidKey(format!(
                    "Unknown display option: {}",
                    other
                )))
            }
        };
        self.settings_engine
            .set_value(key, serde_json::Value::Bool(enabled))
    }
}
