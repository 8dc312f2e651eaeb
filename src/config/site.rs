//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title, used as the home title when `home.md` has no heading
    pub title: String,

    /// Content root, relative to the base directory unless absolute
    pub content_dir: String,

    /// Built single-page client
    pub client_dir: String,

    /// Public URL prefix the content root is served under
    pub media_prefix: String,

    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "作品集".to_string(),
            content_dir: "content".to_string(),
            client_dir: "client/dist".to_string(),
            media_prefix: "/content".to_string(),
            server: ServerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Apply `CONTENT_DIR` and `PORT` from the environment
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(dir) = std::env::var("CONTENT_DIR") {
            if !dir.trim().is_empty() {
                tracing::debug!("CONTENT_DIR override: {}", dir);
                self.content_dir = dir;
            }
        }

        if let Ok(port) = std::env::var("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid PORT {:?}: {}", port, e))?;
        }

        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}
