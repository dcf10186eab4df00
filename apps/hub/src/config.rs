use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::api_client::base_url::resolve_api_base_url;

/// Front-end configuration loaded from environment variables.
/// Nothing is required; every field has a development default.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL, resolved once at load time.
    pub api_base_url: String,
    pub public_host: String,
    pub dist_dir: PathBuf,
    pub lite_root: PathBuf,
    pub state_path: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let api_override = optional_env("API_BASE_URL");
        let public_host = optional_env("PUBLIC_HOST")
            .or_else(|| optional_env("RENDER_EXTERNAL_HOSTNAME"))
            .unwrap_or_else(|| "localhost".to_string());

        Ok(Config {
            api_base_url: resolve_api_base_url(api_override.as_deref(), Some(public_host.as_str())),
            public_host,
            dist_dir: path_env("DIST_DIR", "dist"),
            lite_root: path_env("LITE_ROOT", "."),
            state_path: path_env("STATE_PATH", ".resume-hub/state.json"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn path_env(key: &str, default: &str) -> PathBuf {
    PathBuf::from(optional_env(key).unwrap_or_else(|| default.to_string()))
}
