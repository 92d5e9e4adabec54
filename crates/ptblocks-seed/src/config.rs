//! CMS connection settings.

use std::fmt;

use crate::error::ConfigError;

pub const DEFAULT_DATASET: &str = "production";
pub const DEFAULT_API_VERSION: &str = "2024-01-01";

const PROJECT_ID_VARS: &[&str] = &["SANITY_PROJECT_ID", "NEXT_PUBLIC_SANITY_PROJECT_ID"];
const DATASET_VARS: &[&str] = &["SANITY_DATASET", "NEXT_PUBLIC_SANITY_DATASET"];
const TOKEN_VARS: &[&str] = &["SANITY_API_WRITE_TOKEN", "SANITY_WRITE_TOKEN"];
const API_VERSION_VARS: &[&str] = &["SANITY_API_VERSION"];
const API_HOST_VARS: &[&str] = &["SANITY_API_HOST"];

/// Sanity project settings, passed explicitly to whatever talks to the CMS
#[derive(Clone, PartialEq, Eq)]
pub struct SanityConfig {
    pub project_id: Option<String>,
    pub dataset: String,
    pub token: Option<String>,
    pub api_version: String,
    /// Base URL override, e.g. for a proxy. Defaults to the project API host.
    pub api_host: Option<String>,
}

impl SanityConfig {
    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |keys: &[&str]| {
            keys.iter()
                .filter_map(|key| lookup(*key))
                .map(|value| value.trim().to_string())
                .find(|value| !value.is_empty())
        };

        Self {
            project_id: first(PROJECT_ID_VARS),
            dataset: first(DATASET_VARS).unwrap_or_else(|| DEFAULT_DATASET.to_string()),
            token: first(TOKEN_VARS),
            api_version: first(API_VERSION_VARS)
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            api_host: first(API_HOST_VARS),
        }
    }

    pub fn require_token(&self) -> Result<&str, ConfigError> {
        self.token
            .as_deref()
            .ok_or(ConfigError::Missing("SANITY_API_WRITE_TOKEN"))
    }

    pub fn require_project_id(&self) -> Result<&str, ConfigError> {
        self.project_id
            .as_deref()
            .ok_or(ConfigError::Missing("SANITY_PROJECT_ID"))
    }

    /// Endpoint for document mutations
    pub fn mutate_url(&self) -> Result<String, ConfigError> {
        let host = match &self.api_host {
            Some(host) => host.trim_end_matches('/').to_string(),
            None => format!("https://{}.api.sanity.io", self.require_project_id()?),
        };
        let version = self.api_version.trim_start_matches('v');
        Ok(format!(
            "{host}/v{version}/data/mutate/{}?returnIds=true",
            self.dataset
        ))
    }
}

impl fmt::Debug for SanityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SanityConfig")
            .field("project_id", &self.project_id)
            .field("dataset", &self.dataset)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("api_version", &self.api_version)
            .field("api_host", &self.api_host)
            .finish()
    }
}
