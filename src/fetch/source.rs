// src/fetch/source.rs
use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

use crate::config::FetchConfig;
use crate::error::FetchError;

/// Outcome of probing one snapshot URL.
#[derive(Debug, PartialEq, Eq)]
pub enum Probe {
    /// The snapshot exists; the full response body.
    Found(Vec<u8>),
    /// HTTP 404: nothing published for that month.
    Missing,
}

/// Anything that can GET a snapshot URL.
///
/// Only a 404 becomes [`Probe::Missing`]; every other failure is an error.
#[allow(async_fn_in_trait)]
pub trait SnapshotSource {
    async fn fetch(&self, url: &Url) -> Result<Probe, FetchError>;
}

impl SnapshotSource for Client {
    async fn fetch(&self, url: &Url) -> Result<Probe, FetchError> {
        let resp = self
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = resp.status();
        debug!(%url, %status, "response");
        if status == StatusCode::NOT_FOUND {
            return Ok(Probe::Missing);
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.clone(),
                status,
            });
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;
        Ok(Probe::Found(Vec::from(body)))
    }
}

/// HTTP client with the configured timeouts. Responses are never content-decoded.
pub fn build_client(cfg: &FetchConfig) -> Result<Client> {
    Client::builder()
        .timeout(cfg.request_timeout)
        .connect_timeout(cfg.connect_timeout)
        .build()
        .context("building HTTP client")
}
