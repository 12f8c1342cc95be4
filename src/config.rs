//! Runtime configuration.
//!
//! The feed endpoint and the default FTP server are fixed for the program,
//! but they travel as fields of [`AppConfig`] rather than globals so tests can
//! point the binary at a local responder through `CHARTFEED_FEED_URL`.

use std::env;

pub const DEFAULT_FEED_URL: &str = "https://itunes.apple.com/us/rss/topalbums/limit=100/json";
pub const DEFAULT_FTP_SERVER: &str = "test.rebex.net:21";
pub const FEED_URL_ENV: &str = "CHARTFEED_FEED_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub feed_url: String,
    pub default_server: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            default_server: DEFAULT_FTP_SERVER.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        match env::var(FEED_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => config.feed_url = url.trim().to_string(),
            _ => {}
        }
        config
    }
}
