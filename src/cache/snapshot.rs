use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::propagate::{ElementRecord, PositionSample};

/// Satellite state published by one successful refresh. Never modified after construction.
#[derive(Debug, Default)]
pub struct Snapshot {
    samples: Vec<PositionSample>,
    elements: HashMap<u32, ElementRecord>,
    last_updated: Option<DateTime<Utc>>,
}

impl Snapshot {
    pub fn new(
        samples: Vec<PositionSample>,
        elements: HashMap<u32, ElementRecord>,
        last_updated: DateTime<Utc>,
    ) -> Self {
        Self {
            samples,
            elements,
            last_updated: Some(last_updated),
        }
    }

    /// Samples in refresh-batch order
    pub fn samples(&self) -> &[PositionSample] {
        &self.samples
    }

    pub fn element(&self, norad_id: u32) -> Option<&ElementRecord> {
        self.elements.get(&norad_id)
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// No samples to serve, either before the first refresh or after an empty one
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn status(&self) -> CacheStatus {
        CacheStatus {
            satellite_count: self.samples.len(),
            last_updated: self.last_updated,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CacheStatus {
    pub satellite_count: usize,
    pub last_updated: Option<DateTime<Utc>>,
}
