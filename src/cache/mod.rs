mod snapshot;
mod store;

pub use snapshot::{CacheStatus, Snapshot};
pub use store::SnapshotCache;
