pub mod config;
pub mod error;
pub mod fetch;
pub mod month;

pub use config::FetchConfig;
pub use error::FetchError;
pub use fetch::snapshot::{fetch_latest_snapshot, Snapshot};
pub use month::{Clock, FixedClock, SnapshotMonth, SystemClock};
