use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

pub const ENV_API_BASE_URI: &str = "FOLIO_API_BASE_URI";
pub const ENV_API_TIMEOUT_SECS: &str = "FOLIO_API_TIMEOUT_SECS";

const DEFAULT_API_BASE_URI: &str = "http://localhost:5000/api";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;

/// Settings handed to the form controllers at construction time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardConfig {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub routes: RouteSettings,
}

/// Where the dashboard API lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiSettings {
    pub base_uri: String,
    #[serde(default = "ApiSettings::default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_uri: DEFAULT_API_BASE_URI.into(),
            request_timeout_secs: Self::default_request_timeout_secs(),
        }
    }
}

impl ApiSettings {
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
            ..Self::default()
        }
    }

    pub fn default_request_timeout_secs() -> u64 {
        DEFAULT_REQUEST_TIMEOUT_SECS
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Joins `path` onto the base URI with exactly one slash in between.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.base_uri.trim_end_matches('/');
        let suffix = path.trim_start_matches('/');
        format!("{base}/{suffix}")
    }
}

/// Routes the forms navigate to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteSettings {
    #[serde(default = "RouteSettings::default_portfolio_listing")]
    pub portfolio_listing: String,
    #[serde(default = "RouteSettings::default_login")]
    pub login: String,
}

impl Default for RouteSettings {
    fn default() -> Self {
        Self {
            portfolio_listing: Self::default_portfolio_listing(),
            login: Self::default_login(),
        }
    }
}

impl RouteSettings {
    pub fn default_portfolio_listing() -> String {
        "/portfolio".into()
    }

    pub fn default_login() -> String {
        "/login".into()
    }
}

impl DashboardConfig {
    pub fn with_base_uri(base_uri: impl Into<String>) -> Self {
        Self {
            api: ApiSettings::new(base_uri),
            routes: RouteSettings::default(),
        }
    }

    /// Overlays `FOLIO_API_BASE_URI` and `FOLIO_API_TIMEOUT_SECS` from the
    /// process environment. Blank values are ignored.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Same as [`apply_env_overrides`](Self::apply_env_overrides) with an
    /// explicit lookup, so callers never depend on ambient state.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        if let Some(base_uri) = read(ENV_API_BASE_URI) {
            self.api.base_uri = base_uri;
        }

        if let Some(raw) = read(ENV_API_TIMEOUT_SECS) {
            self.api.request_timeout_secs = raw.parse::<u64>().map_err(|_| {
                ConfigError::Invalid(format!(
                    "{ENV_API_TIMEOUT_SECS} must be a whole number of seconds, got `{raw}`"
                ))
            })?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.api.base_uri.trim();
        if base.is_empty() {
            return Err(ConfigError::Invalid("API base URI is empty".into()));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "API base URI must start with http:// or https://, got `{base}`"
            )));
        }
        if self.api.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request timeout must be greater than zero".into(),
            ));
        }
        for route in [&self.routes.portfolio_listing, &self.routes.login] {
            if !route.starts_with('/') {
                return Err(ConfigError::Invalid(format!(
                    "route `{route}` must be an absolute path"
                )));
            }
        }
        Ok(())
    }
}
