//! Settings structures for searchdsl-rs configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// Main settings structure, loaded from `settings.yml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub engine: EngineSettings,
    pub search: SearchSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the transport cannot be built from
    pub fn validate(&self) -> Result<()> {
        if !valid_timeout(self.engine.request_timeout) {
            bail!(
                "engine.request_timeout must be a positive number of seconds, got {}",
                self.engine.request_timeout
            );
        }
        Ok(())
    }

    /// Merge with environment variables (SEARCHDSL_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any variable source
    pub fn merge_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("SEARCHDSL_BASE_URL") {
            self.engine.base_url = val;
        }
        if let Some(val) = lookup("SEARCHDSL_USERNAME") {
            self.engine.username = Some(val);
        }
        if let Some(val) = lookup("SEARCHDSL_PASSWORD") {
            self.engine.password = Some(val);
        }
        if let Some(val) = lookup("SEARCHDSL_TIMEOUT") {
            match val.parse::<f64>() {
                Ok(timeout) if valid_timeout(timeout) => self.engine.request_timeout = timeout,
                _ => warn!("Ignoring invalid SEARCHDSL_TIMEOUT {:?}", val),
            }
        }
        if let Some(val) = lookup("SEARCHDSL_INDEX") {
            self.search.default_index = val;
        }
    }
}

fn valid_timeout(seconds: f64) -> bool {
    seconds.is_finite() && seconds > 0.0
}

/// Connection settings for the search engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Base URL of the engine, e.g. `http://127.0.0.1:9200`
    pub base_url: String,
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// Verify TLS certificates
    pub verify_ssl: bool,
    /// Idle connections kept per host
    pub pool_maxsize: usize,
    /// Basic auth user
    pub username: Option<String>,
    /// Basic auth password
    pub password: Option<String>,
    /// Extra headers sent with every request
    pub extra_headers: HashMap<String, String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:9200".to_string(),
            request_timeout: 5.0,
            verify_ssl: true,
            pool_maxsize: 20,
            username: None,
            password: None,
            extra_headers: HashMap::new(),
        }
    }
}

/// Search defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Index searched when none is given
    pub default_index: String,
    /// Page size used when a search leaves it unset
    pub default_size: i64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_index: "hotel".to_string(),
            default_size: crate::DEFAULT_PAGE_SIZE,
        }
    }
}
