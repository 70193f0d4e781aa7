use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::Serialize;

/// Mirrors `bloodbond_core::config::ClientConfig`.
#[derive(Debug, Default, Serialize)]
struct DesktopBootstrapConfig {
    api_base_url: Option<String>,
    firebase_api_key: Option<String>,
    identity_base_url: Option<String>,
    token_base_url: Option<String>,
    image_host_api_key: Option<String>,
    image_host_url: Option<String>,
}

const TRACKED_VARS: [&str; 6] = [
    "BLOODBOND_API_URL",
    "FIREBASE_API_KEY",
    "FIREBASE_IDENTITY_URL",
    "FIREBASE_TOKEN_URL",
    "IMGBB_API_KEY",
    "IMGBB_API_URL",
];

fn main() {
    for name in TRACKED_VARS {
        println!("cargo:rerun-if-env-changed={name}");
    }

    if let Err(error) = write_desktop_bootstrap_config() {
        println!("cargo:warning=failed to generate desktop bootstrap config: {error}");
    }
}

fn write_desktop_bootstrap_config() -> io::Result<()> {
    load_workspace_dotenv();

    let out_dir = env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "OUT_DIR is not set"))?;
    fs::create_dir_all(&out_dir)?;

    let config = DesktopBootstrapConfig {
        api_base_url: env_var_trimmed("BLOODBOND_API_URL"),
        firebase_api_key: env_var_trimmed("FIREBASE_API_KEY"),
        identity_base_url: env_var_trimmed("FIREBASE_IDENTITY_URL"),
        token_base_url: env_var_trimmed("FIREBASE_TOKEN_URL"),
        image_host_api_key: env_var_trimmed("IMGBB_API_KEY"),
        image_host_url: env_var_trimmed("IMGBB_API_URL"),
    };

    let content = serde_json::to_string_pretty(&config)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error.to_string()))?;
    fs::write(out_dir.join("desktop-bootstrap.json"), content)?;
    Ok(())
}

fn load_workspace_dotenv() {
    let manifest_dir =
        env::var_os("CARGO_MANIFEST_DIR").map_or_else(|| PathBuf::from("."), PathBuf::from);
    let candidate = manifest_dir.join("..").join("..").join(".env");
    if candidate.exists() {
        let _ = dotenvy::from_path(candidate);
    }
}

fn env_var_trimmed(name: &str) -> Option<String> {
    let value = env::var(name).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
