//! Now-playing HTTP client.

use super::api::NowPlayingPayload;
use super::error::{RadioError, Result};
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Anything that can produce a now-playing document.
///
/// The poll scheduler only depends on this seam, so tests can feed scripted
/// payloads without a server.
pub trait NowPlayingSource: Send + Sync + 'static {
    fn fetch(&self) -> impl Future<Output = Result<NowPlayingPayload>> + Send;
}

/// Client for `GET {base_url}/api/nowplaying/{station_id}`.
#[derive(Debug, Clone)]
pub struct NowPlayingClient {
    http: Client,
    url: String,
    timeout: Duration,
}

impl NowPlayingClient {
    /// Build a client with its own connection pool.
    pub fn new(base_url: &str, station_id: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("airwave/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_client(http, base_url, station_id, timeout)
    }

    /// Reuse an existing reqwest client (shared with artwork downloads).
    pub fn with_client(
        http: Client,
        base_url: &str,
        station_id: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let url = Self::endpoint(base_url, station_id)?;
        Ok(Self { http, url, timeout })
    }

    /// Validate and normalize the endpoint URL.
    pub fn endpoint(base_url: &str, station_id: &str) -> Result<String> {
        let base = base_url.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(RadioError::Config("station base URL cannot be empty".into()));
        }
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(RadioError::Config(
                "station base URL must start with http:// or https://".into(),
            ));
        }

        let station = station_id.trim().trim_matches('/');
        if station.is_empty() {
            return Err(RadioError::Config("station id cannot be empty".into()));
        }

        Ok(format!("{}/api/nowplaying/{}", base, station))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch_now_playing(&self) -> Result<NowPlayingPayload> {
        debug!(url = %self.url, "Fetching now playing");

        let response = self
            .http
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RadioError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| RadioError::MalformedResponse(e.to_string()))
    }
}

impl NowPlayingSource for NowPlayingClient {
    fn fetch(&self) -> impl Future<Output = Result<NowPlayingPayload>> + Send {
        self.fetch_now_playing()
    }
}
