//! Backend endpoint configuration.
//!
//! The base URL is an explicit value constructed once in `main` and
//! injected into the pages, replacing what the original service kept as a
//! module-level constant.

use serde::{Deserialize, Serialize};

/// Where the MRS3 backend lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Create a config for the given base URL. A trailing slash is
    /// tolerated and stripped.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// The configured base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the downscale/compress endpoint.
    #[must_use]
    pub fn compress_url(&self) -> String {
        format!("{}/compress", self.base_url)
    }

    /// Full URL of the restore endpoint.
    #[must_use]
    pub fn restore_url(&self) -> String {
        format!("{}/restore", self.base_url)
    }
}

impl Default for ApiConfig {
    /// Local development backend.
    fn default() -> Self {
        Self::new("http://localhost:8000")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_urls() {
        let config = ApiConfig::new("https://mrs3.example.com/api");
        assert_eq!(
            config.compress_url(),
            "https://mrs3.example.com/api/compress"
        );
        assert_eq!(config.restore_url(), "https://mrs3.example.com/api/restore");
    }

    #[test]
    fn trailing_slashes_are_stripped() {
        let config = ApiConfig::new("http://localhost:8000//");
        assert_eq!(config.base_url(), "http://localhost:8000");
        assert_eq!(config.compress_url(), "http://localhost:8000/compress");
    }

    #[test]
    fn default_points_at_localhost() {
        assert_eq!(ApiConfig::default().base_url(), "http://localhost:8000");
    }
}
