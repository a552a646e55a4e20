//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::pagination::DEFAULT_ITEMS_PER_PAGE;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    /// Base URL of the quality-tracking backend, e.g. `http://localhost:8000`.
    pub api_url: String,
    pub templates_dir: String,
    pub secret: String,
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
    /// Maximum total size of one multipart upload.
    #[serde(default = "default_upload_limit_mb")]
    pub upload_limit_mb: usize,
    #[serde(default)]
    pub cookie_secure: bool,
}

fn default_items_per_page() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}

fn default_upload_limit_mb() -> usize {
    50
}
