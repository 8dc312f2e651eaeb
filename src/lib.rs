//! folio-rs: a portfolio site served straight from a folder tree
//!
//! Categories and works are plain directories under the content root. The
//! crate scans them on every request, renders their Markdown descriptions
//! with link cards and media rewriting, and serves the result as a JSON API
//! next to the media files and the single-page client.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::{ContentScanner, LocalFs, MarkdownRenderer};

/// The main Folio application
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content root
    pub content_dir: PathBuf,
    /// Built client served for every non-API route
    pub client_dir: PathBuf,
}

impl Folio {
    /// Create a new Folio instance from a directory
    ///
    /// Reads `_config.yml` when present, then applies environment overrides.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };
        config.apply_env()?;

        // Path::join keeps absolute paths as they are
        let content_dir = base_dir.join(&config.content_dir);
        let client_dir = base_dir.join(&config.client_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            client_dir,
        })
    }

    /// Create a scanner over the content root
    pub fn scanner(&self) -> ContentScanner<LocalFs> {
        let renderer = MarkdownRenderer::with_media_prefix(&self.config.media_prefix);
        ContentScanner::with_fs(LocalFs, &self.content_dir, renderer)
            .with_home_title(self.config.title.as_str())
    }
}
