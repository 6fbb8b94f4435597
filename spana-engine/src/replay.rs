//! The replay loop.
//!
//! One pass over every input source, strictly in the order given: parse,
//! filter, admit, apply the client-side dedup heuristic, replay into the
//! windowed simulation. All state lives for exactly one replay.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use chrono::{DateTime, Utc};
use opentelemetry::KeyValue;
use tracing::info;

use spana_accesslog::{AccessLine, LineSource};
use spana_core::{Admission, CacheSimulation};
use spana_metadata::MetadataResolver;
use spana_telemetry::{EventLogger, MetricsRecorder};

use crate::error::EngineError;
use crate::report::Report;

/// Ideal client-side dedup: each (object, address, agent) key fetches once.
#[derive(Default)]
struct ClientCache {
    seen: HashSet<(String, String, String)>,
    bytes_no_cache: u64,
    bytes_with_cache: u64,
}

enum ClientVerdict {
    Replay,
    AlreadyCached,
}

impl ClientCache {
    fn observe(&mut self, line: &AccessLine, size: u64) -> ClientVerdict {
        let key = (
            line.object_id.clone(),
            line.client_addr.clone(),
            line.user_agent.clone(),
        );
        if self.seen.contains(&key) {
            if line.status == 304 {
                // A revalidation: the origin still consulted the object and
                // the client got no payload, so the access is replayed but
                // saves nothing either way.
                ClientVerdict::Replay
            } else {
                // An ideally-caching client would never have fetched again;
                // pretend the request didn't happen.
                self.bytes_no_cache += size;
                ClientVerdict::AlreadyCached
            }
        } else {
            self.bytes_with_cache += size;
            self.bytes_no_cache += size;
            self.seen.insert(key);
            ClientVerdict::Replay
        }
    }

    fn savings_percent(&self) -> Option<f64> {
        (self.bytes_no_cache > 0)
            .then(|| 100.0 - 100.0 * self.bytes_with_cache as f64 / self.bytes_no_cache as f64)
    }
}

/// Seconds between consecutive accesses of the same object.
#[derive(Default)]
struct InterArrivals {
    last_seen: HashMap<String, DateTime<Utc>>,
    gaps: Vec<i64>,
    total: u64,
}

impl InterArrivals {
    fn observe(&mut self, object_id: &str, timestamp: DateTime<Utc>) {
        self.total += 1;
        if let Some(previous) = self.last_seen.get(object_id) {
            self.gaps.push((timestamp - *previous).num_seconds());
        }
        self.last_seen.insert(object_id.to_owned(), timestamp);
    }
}

/// Replays every input source through the simulation and assembles the
/// report. Inputs must be in chronological order, as must their contents —
/// an out-of-order access aborts the run.
pub fn replay<R: MetadataResolver, P: AsRef<Path>>(
    window_secs: &[u64],
    inputs: &[P],
    resolver: R,
    metrics: &MetricsRecorder,
) -> Result<Report, EngineError> {
    let mut simulation = CacheSimulation::new(window_secs, resolver);
    let mut clients = ClientCache::default();
    let mut arrivals = InterArrivals::default();

    for input in inputs {
        let source = LineSource::open(input.as_ref())?;
        info!(path = %source.path().display(), "replaying access log");
        for line in source {
            let line = line?;
            metrics.lines_seen.inc();
            let Some(access) = AccessLine::parse(&line) else {
                continue;
            };
            if !access.is_cacheable() {
                continue;
            }
            metrics.lines_matched.inc();

            let timestamp = access.timestamp.with_timezone(&Utc);
            let meta = match simulation.admit(&access.object_id, timestamp)? {
                Admission::Admitted(meta) => meta,
                Admission::UnknownObject => {
                    metrics.skipped_unknown.inc();
                    continue;
                }
                Admission::Preexisting => {
                    metrics.skipped_preexisting.inc();
                    continue;
                }
            };

            match clients.observe(&access, meta.size) {
                ClientVerdict::AlreadyCached => {
                    metrics.client_cached.inc();
                    continue;
                }
                ClientVerdict::Replay => {}
            }

            arrivals.observe(&access.object_id, timestamp);
            simulation.replay(&access.object_id, timestamp, meta.size)?;
            metrics.accesses_replayed.inc();
        }
    }

    let report = Report::new(
        simulation.snapshot(),
        arrivals.gaps,
        arrivals.total,
        clients.savings_percent(),
    );
    EventLogger::log_event(
        "replay_complete",
        vec![
            KeyValue::new("accesses", report.total_accesses as i64),
            KeyValue::new("windows", report.windows.len() as i64),
        ],
    );
    Ok(report)
}
