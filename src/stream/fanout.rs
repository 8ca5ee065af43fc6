use serde::Serialize;
use std::future::Future;
use std::time::Duration;

use crate::cache::{Snapshot, SnapshotCache};
use crate::propagate::PositionSample;
use crate::stream::StreamError;

pub const EMPTY_CACHE_ERROR: &str = "Failed to fetch TLE data.";

/// What a subscriber receives on each tick
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum StreamFrame<'a> {
    Positions(&'a [PositionSample]),
    Error { error: &'static str },
}

pub fn frame_for(snapshot: &Snapshot) -> StreamFrame<'_> {
    if snapshot.is_empty() {
        StreamFrame::Error {
            error: EMPTY_CACHE_ERROR,
        }
    } else {
        StreamFrame::Positions(snapshot.samples())
    }
}

/// One connected streaming client.
pub trait Subscriber: Send {
    /// Deliver one encoded frame
    fn push(&mut self, payload: String) -> impl Future<Output = Result<(), StreamError>> + Send;

    /// Resolves once the client has gone away
    fn closed(&mut self) -> impl Future<Output = ()> + Send;
}

/// Push the current snapshot to `subscriber` every `cadence` until it disconnects.
///
/// Returns `Ok` when the client closed the connection and `Err` when a push
/// failed. Either way only this subscriber is affected.
pub async fn run_subscriber<S: Subscriber>(
    cache: &SnapshotCache,
    subscriber: &mut S,
    cadence: Duration,
) -> Result<(), StreamError> {
    loop {
        let (payload, count) = {
            let snapshot = cache.read();
            let payload = serde_json::to_string(&frame_for(&snapshot))?;
            (payload, snapshot.samples().len())
        };

        subscriber.push(payload).await?;
        if count > 0 {
            log::debug!("Sent {} satellites to subscriber", count);
        } else {
            log::warn!("Satellite cache empty, sent error frame to subscriber");
        }

        tokio::select! {
            _ = tokio::time::sleep(cadence) => {}
            _ = subscriber.closed() => return Ok(()),
        }
    }
}
