//! Desktop bootstrap configuration loaded from build-time generated JSON.

use bloodbond_core::config::ClientConfig;

/// Loads the generated bootstrap JSON from `OUT_DIR` and applies runtime
/// environment overrides on top.
///
/// If parsing fails, this logs a warning and starts from an empty config;
/// features whose endpoints are missing report themselves as unavailable.
pub fn load_client_config() -> ClientConfig {
    let raw = include_str!(concat!(env!("OUT_DIR"), "/desktop-bootstrap.json"));
    parse_embedded(raw).with_overrides(|name| std::env::var(name).ok())
}

fn parse_embedded(raw: &str) -> ClientConfig {
    ClientConfig::from_json(raw).unwrap_or_else(|error| {
        tracing::warn!("Failed to parse desktop bootstrap config: {}", error);
        ClientConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn embedded_json_round_trips_build_script_shape() {
        let raw = r#"{
            "api_base_url": "https://api.example.com",
            "firebase_api_key": "key",
            "identity_base_url": null,
            "token_base_url": null,
            "image_host_api_key": "img",
            "image_host_url": null
        }"#;
        let config = parse_embedded(raw);
        assert_eq!(config.api_base_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(config.image_host_api_key.as_deref(), Some("img"));
    }

    #[test]
    fn malformed_json_falls_back_to_empty_config() {
        assert_eq!(parse_embedded("not json"), ClientConfig::default());
    }
}
