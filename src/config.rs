//! Startup configuration read from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `HEARTHSTONE_CLIENT_ID` | required |
//! | `HEARTHSTONE_CLIENT_SECRET` | required |
//! | `HEARTHSTONE_TOKEN_URL` | `https://us.battle.net/oauth/token` |
//! | `HEARTHSTONE_API_URL` | `https://us.api.blizzard.com/hearthstone` |
//! | `BIND_ADDR` | `0.0.0.0:8080` |
//! | `TABLE_TEMPLATE` | `table.html` |
//! | `HEARTHSTONE_STRICT_METADATA` | `false` |

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::client::{Credentials, KeyResolution};

pub const DEFAULT_TOKEN_URL: &str = "https://us.battle.net/oauth/token";
pub const DEFAULT_API_URL: &str = "https://us.api.blizzard.com/hearthstone";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_TEMPLATE_PATH: &str = "table.html";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client_id: String,
    pub client_secret: String,
    pub token_url: String,
    pub api_url: String,
    pub bind_addr: SocketAddr,
    pub template_path: PathBuf,
    pub strict_metadata: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds and validates a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let bind_addr = var("BIND_ADDR", DEFAULT_BIND_ADDR);
        let bind_addr = bind_addr
            .parse()
            .with_context(|| format!("BIND_ADDR is not a valid socket address: {}", bind_addr))?;

        let strict_metadata = match lookup("HEARTHSTONE_STRICT_METADATA") {
            Some(value) => parse_bool(&value)
                .with_context(|| "HEARTHSTONE_STRICT_METADATA must be a boolean")?,
            None => false,
        };

        let config = Self {
            client_id: var("HEARTHSTONE_CLIENT_ID", ""),
            client_secret: var("HEARTHSTONE_CLIENT_SECRET", ""),
            token_url: var("HEARTHSTONE_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: var("HEARTHSTONE_API_URL", DEFAULT_API_URL).trim_end_matches('/').to_string(),
            bind_addr,
            template_path: PathBuf::from(var("TABLE_TEMPLATE", DEFAULT_TEMPLATE_PATH)),
            strict_metadata,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.client_id.trim().is_empty() {
            anyhow::bail!("HEARTHSTONE_CLIENT_ID must be set to a Battle.net API client ID");
        }
        if self.client_secret.trim().is_empty() {
            anyhow::bail!("HEARTHSTONE_CLIENT_SECRET must be set to a Battle.net API client secret");
        }
        for (name, url) in [
            ("HEARTHSTONE_TOKEN_URL", &self.token_url),
            ("HEARTHSTONE_API_URL", &self.api_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                anyhow::bail!("{} must be an http(s) URL, got: {}", name, url);
            }
        }
        Ok(())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
        }
    }

    pub fn key_resolution(&self) -> KeyResolution {
        if self.strict_metadata {
            KeyResolution::Strict
        } else {
            KeyResolution::Lenient
        }
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("invalid boolean: {}", other),
    }
}
