use std::sync::Arc;

use crate::cache::SnapshotCache;
use crate::propagate::Propagator;

use super::config::Config;

/// Read side of the service, shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cache: Arc<SnapshotCache>,
    pub propagator: Arc<dyn Propagator>,
}
