// src/error.rs

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

use crate::month::SnapshotMonth;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("GET {url} returned {status}")]
    Status { url: Url, status: StatusCode },

    #[error("GET {url} timed out")]
    Timeout { url: Url },

    #[error("GET {url} failed")]
    Transport {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    #[error("no snapshot published between {oldest} and {newest} ({attempts} attempts)")]
    NotFoundWithinLookback {
        newest: SnapshotMonth,
        oldest: SnapshotMonth,
        attempts: u32,
    },

    #[error("writing snapshot to {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot write task failed")]
    WriteTask {
        #[source]
        source: tokio::task::JoinError,
    },

    #[error("invalid snapshot URL")]
    InvalidUrl {
        #[from]
        source: url::ParseError,
    },
}

impl FetchError {
    /// Classify a reqwest failure for `url`.
    pub(crate) fn from_reqwest(url: &Url, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout { url: url.clone() }
        } else {
            FetchError::Transport {
                url: url.clone(),
                source: err,
            }
        }
    }
}
