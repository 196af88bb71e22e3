use anyhow::{Context, Result};
use dbip_fetch::{fetch::source::build_client, fetch_latest_snapshot, FetchConfig, SystemClock};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    // ─── 2) config & client ──────────────────────────────────────────
    let cfg = FetchConfig::from_env()?;
    debug!(
        base = %cfg.base_url,
        output = %cfg.output_path.display(),
        timeout = ?cfg.request_timeout,
        max_lookback = cfg.max_lookback,
        "startup"
    );
    let client = build_client(&cfg)?;

    // ─── 3) search back for the newest snapshot ──────────────────────
    fetch_latest_snapshot(&client, &SystemClock, &cfg)
        .await
        .context("fetching latest dbip-city-lite snapshot")?;
    Ok(())
}
