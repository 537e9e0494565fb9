use serde::{Deserialize, Serialize};

/// Top-level dashboard settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSettings {
    pub server: ServerSettings,
    pub display: DisplayConfig,
    /// Advisory refresh interval in minutes, printed in the preview footer.
    pub refresh_minutes: u32,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            display: DisplayConfig::default(),
            refresh_minutes: 5,
        }
    }
}

/// Remote panel endpoints and login scheme.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerSettings {
    pub base_url: String,
    pub login_path: String,
    pub stats_path: String,
    pub login_scheme: LoginScheme,
    /// When set, the token is also sent as `Cookie: <name>=<token>`.
    #[serde(default)]
    pub token_cookie_name: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: "https://your-domain.com".to_string(),
            login_path: "/api/v1/login/access-token".to_string(),
            stats_path: "/api/v1/plugin/page/SiteStatistic".to_string(),
            login_scheme: LoginScheme::AccessToken,
            token_cookie_name: Some("MoviePilot".to_string()),
        }
    }
}

/// How the login endpoint shapes its request and response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum LoginScheme {
    /// Form fields `username`/`password`, token at `access_token`.
    AccessToken,
    /// Form fields `email`/`password`, token at `data.auth_data` with
    /// `status == "success"`.
    Passport,
}

/// Which optional table columns to render.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    pub show_bonus: bool,
    pub show_seeds: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_bonus: true,
            show_seeds: true,
        }
    }
}
