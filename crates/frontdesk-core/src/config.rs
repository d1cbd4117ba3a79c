//! Router configuration.
//!
//! Provides [`RouterConfig`], fixed at startup and shared read-only by every
//! request. Values can be loaded from environment variables.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::caser::CaseStrategy;

/// Router configuration.
///
/// # Examples
///
/// ```
/// use frontdesk_core::config::RouterConfig;
///
/// let config = RouterConfig::default();
/// assert_eq!(config.default_controller, "default_page");
/// assert_eq!(config.redirect_status, 301);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct RouterConfig {
    /// Bind address for the HTTP server (e.g. `"0.0.0.0:8080"`).
    #[builder(default = String::from("0.0.0.0:8080"))]
    pub listen: String,

    /// Route-style name of the controller used when the URI names none.
    #[builder(default = String::from("default_page"))]
    pub default_controller: String,

    /// Namespace that controller names are qualified with.
    #[builder(default = String::from("app::controllers"))]
    pub controller_namespace: String,

    /// How route-style controller names map to registered names.
    #[builder(default)]
    pub case_strategy: CaseStrategy,

    /// Requested redirect status. Only 301 and 307 are honored; anything else
    /// redirects with 307.
    #[builder(default = 301)]
    pub redirect_status: u16,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            listen: String::from("0.0.0.0:8080"),
            default_controller: String::from("default_page"),
            controller_namespace: String::from("app::controllers"),
            case_strategy: CaseStrategy::default(),
            redirect_status: 301,
            log_level: String::from("info"),
        }
    }
}

impl RouterConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `FRONTDESK_LISTEN` | `0.0.0.0:8080` |
    /// | `DEFAULT_CONTROLLER` | `default_page` |
    /// | `CONTROLLER_NAMESPACE` | `app::controllers` |
    /// | `CASE_STRATEGY` | `camel_case_with_first_upper` |
    /// | `REDIRECT_STATUS` | `301` |
    /// | `LOG_LEVEL` | `info` |
    ///
    /// Values that do not parse are ignored.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("FRONTDESK_LISTEN") {
            config.listen = v;
        }
        if let Some(v) = lookup("DEFAULT_CONTROLLER") {
            if !v.trim().is_empty() {
                config.default_controller = v.trim().to_owned();
            }
        }
        if let Some(v) = lookup("CONTROLLER_NAMESPACE") {
            config.controller_namespace = v;
        }
        if let Some(v) = lookup("CASE_STRATEGY") {
            match v.trim().parse::<CaseStrategy>() {
                Ok(strategy) => config.case_strategy = strategy,
                Err(e) => tracing::warn!(error = %e, "ignoring CASE_STRATEGY"),
            }
        }
        if let Some(v) = lookup("REDIRECT_STATUS") {
            if let Ok(n) = v.trim().parse::<u16>() {
                config.redirect_status = n;
            }
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }
}
