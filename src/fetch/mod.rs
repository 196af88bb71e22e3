// src/fetch/mod.rs

/// Snapshot URL construction
pub mod urls;

/// HTTP access behind the `SnapshotSource` seam
pub mod source;

/// Backward search for the newest snapshot and writing it to disk
pub mod snapshot;

#[cfg(test)]
pub(crate) mod test_server;
