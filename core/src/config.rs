//! Client configuration.

use serde::Deserialize;

/// Public Forvo endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://apifree.forvo.com";

/// API key plus the endpoint it is sent to.
///
/// Immutable once built; `ForvoClient` owns its copy. Deserializable so hosts
/// can embed it in their own config files:
///
/// ```
/// let config: forvo_core::ApiConfig = serde_json::from_str(r#"{"key":"abc"}"#).unwrap();
/// assert_eq!(config.base_url(), "https://apifree.forvo.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiConfig {
    key: String,
    #[serde(default = "default_base_url", deserialize_with = "deserialize_base_url")]
    base_url: String,
}

impl ApiConfig {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at another host, e.g. a local mock server.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize(base_url);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn deserialize_base_url<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(normalize(&raw))
}

fn normalize(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}
