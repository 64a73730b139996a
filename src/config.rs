//! # Configuration
//!
//! A YAML file describes the site, logging, and the route table:
//!
//! ```yaml
//! site:
//!   site_url: "http://example.com/"
//!   pretty_urls: true
//! logging:
//!   level: info
//!   format: pretty
//! routes:
//!   - pattern: "users/([0-9]+)"
//!     source: "User {{ args[0] }}"
//! ```
//!
//! Routes are a sequence, so file order is match order.
//!
//! ## Environment Variables
//!
//! Applied on top of the file by [`FrontConfig::load`]:
//!
//! - `FRONTROUTER_SITE_URL` - replaces `site.site_url`
//! - `FRONTROUTER_PRETTY_URLS` - `1`, `true`, `yes` or `on` enable pretty URLs,
//!   anything else disables them
//! - `FRONTROUTER_LOG_LEVEL` - replaces `logging.level`
//! - `FRONTROUTER_LOG_FORMAT` - `json` or `pretty`

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RouterError;
use crate::logging::{LogConfig, LogFormat};
use crate::url::SiteConfig;

/// A route whose handler is template source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    pub pattern: String,
    pub source: String,
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontConfig {
    pub site: SiteConfig,
    pub logging: LogConfig,
    pub routes: Vec<RouteConfig>,
}

impl FrontConfig {
    /// Read `path` and apply environment overrides.
    ///
    /// # Errors
    ///
    /// [`RouterError::Io`] if the file cannot be read, [`RouterError::Config`]
    /// if it is not valid configuration YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RouterError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| RouterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self =
            serde_yaml::from_str(&text).map_err(|source| RouterError::Config {
                path: Some(path.to_path_buf()),
                source,
            })?;
        config.apply_overrides(|key| env::var(key).ok());
        debug!(
            path = %path.display(),
            routes_count = config.routes.len(),
            pretty_urls = config.site.pretty_urls,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Parse configuration YAML without environment overrides.
    ///
    /// # Errors
    ///
    /// [`RouterError::Config`] if `text` is not valid configuration YAML.
    pub fn from_yaml_str(text: &str) -> Result<Self, RouterError> {
        serde_yaml::from_str(text).map_err(|source| RouterError::Config { path: None, source })
    }

    /// Apply `FRONTROUTER_*` overrides looked up through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(site_url) = lookup("FRONTROUTER_SITE_URL") {
            self.site.site_url = site_url;
        }
        if let Some(pretty) = lookup("FRONTROUTER_PRETTY_URLS") {
            self.site.pretty_urls = matches!(
                pretty.trim().to_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
        if let Some(level) = lookup("FRONTROUTER_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("FRONTROUTER_LOG_FORMAT") {
            self.logging.format = LogFormat::parse(&format);
        }
    }
}
