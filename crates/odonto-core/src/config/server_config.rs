use serde::{Deserialize, Serialize};

use super::defaults;

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind_addr: String,
    /// Page size used by event listings when `limit` is omitted.
    pub default_page_size: usize,
    /// Upper bound for `limit` on event listings.
    pub max_page_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: defaults::DEFAULT_BIND_ADDR.to_string(),
            default_page_size: defaults::DEFAULT_PAGE_SIZE,
            max_page_size: defaults::DEFAULT_MAX_PAGE_SIZE,
        }
    }
}
