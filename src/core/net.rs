// src/core/net.rs
//
// Blocking HTTP GET for the live endpoint. One client, one request at a time.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, ORIGIN, REFERER};

use crate::config::consts;
use crate::error::{SyncError, SyncResult};

/// Source of raw response bodies. The pipeline only ever sees text.
pub trait Fetch {
    fn get(&self, url: &str) -> SyncResult<String>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> SyncResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
        headers.insert(REFERER, HeaderValue::from_static(consts::REFERER));
        headers.insert(ORIGIN, HeaderValue::from_static(consts::ORIGIN));

        let client = Client::builder()
            .user_agent(consts::USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn get(&self, url: &str) -> SyncResult<String> {
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SyncError::Status { url: url.to_string(), status: status.as_u16() });
        }
        Ok(resp.text()?)
    }
}

/// Stands in when no HTTP client could be built: every request fails, so each
/// live unit is counted as failed and the archive data is still written.
pub struct Offline {
    reason: String,
}

impl Offline {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

impl Fetch for Offline {
    fn get(&self, _url: &str) -> SyncResult<String> {
        Err(SyncError::Unavailable(self.reason.clone()))
    }
}
