// src/fetch/urls.rs
use url::Url;

use crate::month::SnapshotMonth;

const SNAPSHOT_PREFIX: &str = "dbip-city-lite";
const SNAPSHOT_SUFFIX: &str = ".mmdb.gz";

/// File name of the monthly archive, e.g. `dbip-city-lite-2024-03.mmdb.gz`.
pub fn snapshot_file_name(month: SnapshotMonth) -> String {
    format!("{}-{}{}", SNAPSHOT_PREFIX, month, SNAPSHOT_SUFFIX)
}

/// Full URL of the archive for `month` under `base`.
///
/// `base` must end in `/`, otherwise its last path segment is replaced.
pub fn snapshot_url(base: &Url, month: SnapshotMonth) -> Result<Url, url::ParseError> {
    base.join(&snapshot_file_name(month))
}
