use anyhow::{Context, Result};
use edupress::generation::DEFAULT_MODEL;
use edupress::library::MAX_DOCUMENT_BYTES;
use std::net::SocketAddr;

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
pub const DEFAULT_GENERATION_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Server settings, read from the environment.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind: SocketAddr,
    /// Without a key every generation request fails.
    pub api_key: Option<String>,
    pub model: String,
    /// Base URL of the content service, without the model path
    pub generation_url: String,
    /// Bytes of uploads the library may hold
    pub library_capacity: u64,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind = get("EDUPRESS_BIND")
            .unwrap_or_else(|| DEFAULT_BIND.to_string())
            .parse()
            .context("EDUPRESS_BIND is not a socket address")?;

        let library_capacity = match get("EDUPRESS_LIBRARY_CAPACITY") {
            Some(value) => value
                .parse()
                .context("EDUPRESS_LIBRARY_CAPACITY is not a byte count")?,
            None => MAX_DOCUMENT_BYTES,
        };

        Ok(Self {
            bind,
            api_key: get("GEMINI_API_KEY"),
            model: get("EDUPRESS_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            generation_url: get("EDUPRESS_GENERATION_URL")
                .unwrap_or_else(|| DEFAULT_GENERATION_URL.to_string()),
            library_capacity,
        })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: ([0, 0, 0, 0], 3000).into(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            generation_url: DEFAULT_GENERATION_URL.to_string(),
            library_capacity: MAX_DOCUMENT_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind.to_string(), DEFAULT_BIND);
        assert_eq!(config.model, "gemini-3-flash-preview");
        assert_eq!(config.library_capacity, 5 * 1024 * 1024);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("EDUPRESS_BIND", "127.0.0.1:8080"),
            ("GEMINI_API_KEY", "secret"),
            ("EDUPRESS_MODEL", "gemini-2.5-flash"),
            ("EDUPRESS_LIBRARY_CAPACITY", "1024"),
        ]))
        .unwrap();
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.library_capacity, 1024);
    }

    #[test]
    fn test_blank_key_is_unset() {
        let config = ApiConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "  ")])).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_bad_capacity() {
        let result = ApiConfig::from_lookup(lookup(&[("EDUPRESS_LIBRARY_CAPACITY", "lots")]));
        assert!(result.is_err());
    }
}
