use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::cache::{Snapshot, SnapshotCache};
use crate::catalog::{parse_element_sets, CatalogSource, ElementSet};
use crate::propagate::{derive_position, Propagator};
use crate::refresh::RefreshError;

/// Catalog entry left out of a snapshot
#[derive(Debug, Clone)]
pub struct SkippedSatellite {
    pub name: String,
    pub reason: String,
}

/// Outcome of one successful refresh cycle
#[derive(Debug, Clone)]
pub struct RefreshReport {
    pub installed: usize,
    pub skipped: Vec<SkippedSatellite>,
    pub updated_at: DateTime<Utc>,
}

/// Derive every element set at the shared `reference` instant. Sets that fail
/// are logged and left out; the rest of the batch is unaffected.
pub fn build_snapshot<P: Propagator + ?Sized>(
    sets: &[ElementSet],
    reference: DateTime<Utc>,
    propagator: &P,
) -> (Snapshot, Vec<SkippedSatellite>) {
    let mut samples = Vec::with_capacity(sets.len());
    let mut elements = HashMap::with_capacity(sets.len());
    let mut skipped = Vec::new();

    for set in sets {
        match derive_position(set, reference, propagator) {
            Ok((record, sample)) => {
                samples.push(sample);
                elements.insert(record.norad_id, record);
            }
            Err(e) => {
                log::warn!("Error processing satellite {}: {}", set.name, e);
                skipped.push(SkippedSatellite {
                    name: set.name.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    (Snapshot::new(samples, elements, Utc::now()), skipped)
}

/// Periodically rebuilds the satellite snapshot from the catalog feed.
/// The only writer of the [`SnapshotCache`].
pub struct RefreshScheduler<S> {
    source: S,
    propagator: Arc<dyn Propagator>,
    cache: Arc<SnapshotCache>,
    interval: Duration,
    in_progress: AtomicBool,
}

/// Clears the in-progress flag when a cycle ends, even by panic
struct CycleGuard<'a>(&'a AtomicBool);

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<S: CatalogSource> RefreshScheduler<S> {
    pub fn new(
        source: S,
        propagator: Arc<dyn Propagator>,
        cache: Arc<SnapshotCache>,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            propagator,
            cache,
            interval,
            in_progress: AtomicBool::new(false),
        }
    }

    /// Run one fetch, parse, derive and install cycle.
    ///
    /// On fetch failure the cache is left untouched. Returns
    /// [`RefreshError::AlreadyRunning`] if another cycle has not finished yet.
    pub async fn refresh(&self) -> Result<RefreshReport, RefreshError> {
        if self.in_progress.swap(true, Ordering::AcqRel) {
            return Err(RefreshError::AlreadyRunning);
        }
        let _guard = CycleGuard(&self.in_progress);

        log::info!("Starting element set fetch and cache update");
        let text = self.source.fetch().await?;
        let sets = parse_element_sets(&text);

        // SGP4 over the whole catalog is CPU bound
        let reference = Utc::now();
        let propagator = self.propagator.clone();
        let (snapshot, skipped) = tokio::task::spawn_blocking(move || {
            build_snapshot(&sets, reference, propagator.as_ref())
        })
        .await?;
        let report = RefreshReport {
            installed: snapshot.samples().len(),
            skipped,
            updated_at: snapshot.last_updated().unwrap_or(reference),
        };

        self.cache.replace(snapshot);
        Ok(report)
    }

    /// Refresh once now, then keep refreshing every interval in the background.
    pub async fn start_with_initial_refresh(self: Arc<Self>) -> JoinHandle<()> {
        log::info!("Running initial satellite refresh");
        self.clone().run_cycle().await;
        self.start()
    }

    /// Spawn the refresh loop. The first cycle runs one interval from now.
    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        log::info!(
            "Starting satellite refresh loop (interval: {})",
            humantime::format_duration(self.interval)
        );

        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                self.clone().run_cycle().await;
            }
        })
    }

    /// One cycle in its own task, so that nothing it does can take down the loop.
    async fn run_cycle(self: Arc<Self>) {
        let scheduler = self.clone();
        let cycle = tokio::spawn(async move { scheduler.refresh().await });

        match cycle.await {
            Ok(Ok(report)) => log::info!(
                "Cache updated with {} satellites ({} skipped) at {} UTC",
                report.installed,
                report.skipped.len(),
                report.updated_at
            ),
            Ok(Err(RefreshError::AlreadyRunning)) => {
                log::warn!("Previous refresh still running, skipping this tick")
            }
            Ok(Err(e)) => log::error!("Refresh failed: {}", e),
            Err(e) => log::error!("Refresh cycle aborted: {}", e),
        }
    }
}
