//! Client configuration.
//!
//! `ClientConfig` carries the public endpoints and keys the client needs to
//! reach the backend API, the identity provider, and the image host. Desktop
//! builds embed a JSON copy at compile time and let runtime environment
//! variables override it.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::{normalize_base_url, normalize_text_option};

pub const ENV_API_BASE_URL: &str = "BLOODBOND_API_URL";
pub const ENV_FIREBASE_API_KEY: &str = "FIREBASE_API_KEY";
pub const ENV_IDENTITY_BASE_URL: &str = "FIREBASE_IDENTITY_URL";
pub const ENV_TOKEN_BASE_URL: &str = "FIREBASE_TOKEN_URL";
pub const ENV_IMAGE_HOST_API_KEY: &str = "IMGBB_API_KEY";
pub const ENV_IMAGE_HOST_URL: &str = "IMGBB_API_URL";

pub const DEFAULT_IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";
pub const DEFAULT_TOKEN_BASE_URL: &str = "https://securetoken.googleapis.com/v1";
pub const DEFAULT_IMAGE_HOST_URL: &str = "https://api.imgbb.com/1";

/// Public client configuration.
///
/// These values are safe-to-ship public endpoints/keys. Secret credentials
/// must never be stored here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub firebase_api_key: Option<String>,
    #[serde(default)]
    pub identity_base_url: Option<String>,
    #[serde(default)]
    pub token_base_url: Option<String>,
    #[serde(default)]
    pub image_host_api_key: Option<String>,
    #[serde(default)]
    pub image_host_url: Option<String>,
}

/// Resolved identity provider endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityEndpoints {
    pub identity_base_url: String,
    pub token_base_url: String,
    pub api_key: String,
}

/// Resolved image host endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHostEndpoint {
    pub base_url: String,
    pub api_key: String,
}

impl ClientConfig {
    /// Parse the JSON form of the configuration.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Override fields with non-empty values returned by `lookup`.
    ///
    /// `lookup` is normally `std::env::var(..).ok()`; tests pass a closure.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let fields = [
            (ENV_API_BASE_URL, &mut self.api_base_url),
            (ENV_FIREBASE_API_KEY, &mut self.firebase_api_key),
            (ENV_IDENTITY_BASE_URL, &mut self.identity_base_url),
            (ENV_TOKEN_BASE_URL, &mut self.token_base_url),
            (ENV_IMAGE_HOST_API_KEY, &mut self.image_host_api_key),
            (ENV_IMAGE_HOST_URL, &mut self.image_host_url),
        ];
        for (name, field) in fields {
            if let Some(value) = normalize_text_option(lookup(name)) {
                *field = Some(value);
            }
        }
        self
    }

    /// Backend REST API base URL.
    pub fn api_base_url(&self) -> Result<String> {
        let raw = normalize_text_option(self.api_base_url.clone())
            .ok_or(Error::NotConfigured(ENV_API_BASE_URL))?;
        normalize_base_url(&raw, ENV_API_BASE_URL).map_err(Error::InvalidInput)
    }

    /// Identity provider endpoints; the API key is mandatory.
    pub fn identity_endpoints(&self) -> Result<IdentityEndpoints> {
        let api_key = normalize_text_option(self.firebase_api_key.clone())
            .ok_or(Error::NotConfigured(ENV_FIREBASE_API_KEY))?;
        Ok(IdentityEndpoints {
            identity_base_url: url_or_default(
                self.identity_base_url.clone(),
                DEFAULT_IDENTITY_BASE_URL,
                ENV_IDENTITY_BASE_URL,
            )?,
            token_base_url: url_or_default(
                self.token_base_url.clone(),
                DEFAULT_TOKEN_BASE_URL,
                ENV_TOKEN_BASE_URL,
            )?,
            api_key,
        })
    }

    /// Image host endpoint; the API key is mandatory.
    pub fn image_host_endpoint(&self) -> Result<ImageHostEndpoint> {
        let api_key = normalize_text_option(self.image_host_api_key.clone())
            .ok_or(Error::NotConfigured(ENV_IMAGE_HOST_API_KEY))?;
        Ok(ImageHostEndpoint {
            base_url: url_or_default(
                self.image_host_url.clone(),
                DEFAULT_IMAGE_HOST_URL,
                ENV_IMAGE_HOST_URL,
            )?,
            api_key,
        })
    }
}

fn url_or_default(value: Option<String>, default: &str, field: &str) -> Result<String> {
    let raw = normalize_text_option(value).unwrap_or_else(|| default.to_string());
    normalize_base_url(&raw, field).map_err(Error::InvalidInput)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn overrides_replace_embedded_values() {
        let embedded = ClientConfig {
            api_base_url: Some("https://embedded.example.com".to_string()),
            firebase_api_key: Some("embedded-key".to_string()),
            ..Default::default()
        };
        let env = HashMap::from([
            (ENV_API_BASE_URL, "https://runtime.example.com/ "),
            (ENV_FIREBASE_API_KEY, "   "),
        ]);

        let config = embedded.with_overrides(|name| env.get(name).map(ToString::to_string));
        assert_eq!(config.api_base_url().unwrap(), "https://runtime.example.com");
        assert_eq!(config.firebase_api_key.as_deref(), Some("embedded-key"));
    }

    #[test]
    fn identity_endpoints_fall_back_to_google_hosts() {
        let config = ClientConfig {
            firebase_api_key: Some("key".to_string()),
            ..Default::default()
        };
        let endpoints = config.identity_endpoints().unwrap();
        assert_eq!(endpoints.identity_base_url, DEFAULT_IDENTITY_BASE_URL);
        assert_eq!(endpoints.token_base_url, DEFAULT_TOKEN_BASE_URL);
    }

    #[test]
    fn missing_keys_report_not_configured() {
        let config = ClientConfig::default();
        assert!(matches!(
            config.api_base_url(),
            Err(Error::NotConfigured(ENV_API_BASE_URL))
        ));
        assert!(matches!(
            config.image_host_endpoint(),
            Err(Error::NotConfigured(ENV_IMAGE_HOST_API_KEY))
        ));
    }

    #[test]
    fn api_base_url_requires_http_scheme() {
        let config = ClientConfig {
            api_base_url: Some("api.example.com".to_string()),
            ..Default::default()
        };
        assert!(matches!(config.api_base_url(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn from_json_rejects_unknown_fields() {
        let error = ClientConfig::from_json(r#"{"api_url": "https://x"}"#).unwrap_err();
        assert!(error.to_string().contains("unknown field"));
    }
}
