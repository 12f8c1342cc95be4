use log::{debug, warn};

use crate::error::{ChartError, Result};

/// Something that can hand back the raw feed document.
pub trait FeedSource {
    fn fetch(&self) -> Result<Vec<u8>>;
}

/// Issues a single blocking GET against the configured feed URL.
pub struct HttpFeedSource {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpFeedSource {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| ChartError::Transport(err.to_string()))?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

impl FeedSource for HttpFeedSource {
    fn fetch(&self) -> Result<Vec<u8>> {
        debug!("GET {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(|err| ChartError::Transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            warn!("Feed endpoint {} answered with status {status}", self.url);
        }
        let body = response
            .bytes()
            .map_err(|err| ChartError::Transport(err.to_string()))?;
        debug!("Received {} byte(s) with status {status}", body.len());
        Ok(body.to_vec())
    }
}
