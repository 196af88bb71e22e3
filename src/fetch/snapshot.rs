// src/fetch/snapshot.rs
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tempfile::Builder;
use tracing::{debug, info, instrument, warn};

use super::source::{Probe, SnapshotSource};
use super::urls::snapshot_url;
use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::month::{Clock, SnapshotMonth};

/// A snapshot that was found and written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub month: SnapshotMonth,
    pub path: PathBuf,
    pub bytes: u64,
    /// Requests issued, the successful one included.
    pub attempts: u32,
}

/// Walk back from the current month until a snapshot exists, then write it to
/// `cfg.output_path`.
///
/// Only a 404 moves the search one month back. Any other failure ends the run
/// without retrying. At most `cfg.max_lookback + 1` months are tried.
#[instrument(level = "debug", skip_all, fields(base = %cfg.base_url))]
pub async fn fetch_latest_snapshot<S, C>(
    source: &S,
    clock: &C,
    cfg: &FetchConfig,
) -> Result<Snapshot, FetchError>
where
    S: SnapshotSource,
    C: Clock,
{
    let newest = SnapshotMonth::from_date(clock.today());
    let mut month = newest;
    let mut attempts: u32 = 0;

    loop {
        attempts = attempts.saturating_add(1);
        let url = snapshot_url(&cfg.base_url, month)?;
        info!(%month, %url, "trying");

        match source.fetch(&url).await? {
            Probe::Found(body) => {
                let bytes = save_snapshot(cfg.output_path.clone(), body).await?;
                info!(%month, path = %cfg.output_path.display(), bytes, attempts, "done");
                return Ok(Snapshot {
                    month,
                    path: cfg.output_path.clone(),
                    bytes,
                    attempts,
                });
            }
            Probe::Missing if attempts <= cfg.max_lookback => {
                debug!(%month, "not published");
                month = month.previous();
            }
            Probe::Missing => {
                warn!(%newest, oldest = %month, attempts, "lookback exhausted");
                return Err(FetchError::NotFoundWithinLookback {
                    newest,
                    oldest: month,
                    attempts,
                });
            }
        }
    }
}

/// [`write_snapshot`] on the blocking pool.
pub async fn save_snapshot(dest: PathBuf, body: Vec<u8>) -> Result<u64, FetchError> {
    tokio::task::spawn_blocking(move || write_snapshot(&dest, &body))
        .await
        .map_err(|source| FetchError::WriteTask { source })?
}

/// Replace `dest` with `body`, untouched.
///
/// The bytes land in a temp file beside `dest` first, so an interrupted write
/// never leaves a truncated file at `dest`. An existing file keeps its
/// permissions; a new one gets 0644 less the umask.
pub fn write_snapshot(dest: &Path, body: &[u8]) -> Result<u64, FetchError> {
    let io_err = |source: std::io::Error| FetchError::Io {
        path: dest.to_path_buf(),
        source,
    };

    let dir = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(io_err)?;

    let existing = fs::metadata(dest).ok().map(|m| m.permissions());
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if existing.is_none() {
            builder.permissions(fs::Permissions::from_mode(0o644));
        }
    }

    let mut tmp = builder.tempfile_in(dir).map_err(io_err)?;
    if let Some(perms) = existing {
        tmp.as_file().set_permissions(perms).map_err(io_err)?;
    }
    tmp.write_all(body).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(dest).map_err(|e| io_err(e.error))?;

    Ok(body.len() as u64)
}
