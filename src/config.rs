// src/config.rs

use anyhow::{bail, Context, Result};
use std::{env, path::PathBuf, str::FromStr, time::Duration};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://download.db-ip.com/free/";
pub const DEFAULT_OUTPUT: &str = "dbip-city-lite.mmdb";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_MAX_LOOKBACK: u32 = 24;
/// One century of monthly snapshots.
const MAX_LOOKBACK_LIMIT: u32 = 1200;

/// Knobs for one snapshot fetch.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Directory URL the snapshot file names are joined onto. Always ends in `/`.
    pub base_url: Url,
    /// Where the downloaded snapshot is written.
    pub output_path: PathBuf,
    /// Overall per-request timeout, body included.
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    /// How many months before the current one may be tried.
    pub max_lookback: u32,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL should parse"),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            request_timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            max_lookback: DEFAULT_MAX_LOOKBACK,
        }
    }
}

impl FetchConfig {
    /// Defaults, overridden by any `DBIP_*` variables set in the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`FetchConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = Self::default();

        if let Some(raw) = lookup("DBIP_BASE_URL") {
            cfg.base_url = parse_base_url(&raw)?;
        }
        if let Some(raw) = lookup("DBIP_OUTPUT") {
            cfg.output_path = PathBuf::from(raw);
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "DBIP_TIMEOUT_SECS")? {
            cfg.request_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "DBIP_CONNECT_TIMEOUT_SECS")? {
            cfg.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(months) = parse_var::<u32>(&lookup, "DBIP_MAX_LOOKBACK")? {
            if months > MAX_LOOKBACK_LIMIT {
                bail!(
                    "DBIP_MAX_LOOKBACK={} exceeds the limit of {} months",
                    months,
                    MAX_LOOKBACK_LIMIT
                );
            }
            cfg.max_lookback = months;
        }

        Ok(cfg)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(name)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("parsing {}={:?}", name, raw))
        })
        .transpose()
}

/// `Url::join` drops the last path segment unless it ends in `/`.
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut raw = raw.trim().to_string();
    if !raw.ends_with('/') {
        raw.push('/');
    }
    Url::parse(&raw).with_context(|| format!("parsing DBIP_BASE_URL={:?}", raw))
}
