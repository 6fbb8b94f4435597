//! Lockstep coordinator for the simulator set.
//!
//! Owns the shared event log, the configured window simulators and the
//! per-run metadata cache. Exactly one writer: every access is admitted,
//! appended, folded into every simulator in configured order, and then the
//! log tail is trimmed to the deepest cursor any simulator still holds.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use spana_metadata::{MetadataResolver, ObjectMeta};

use crate::error::SimulationError;
use crate::event::Event;
use crate::log::EventLog;
use crate::simulator::{CacheSimulator, WindowPeaks};

/// Outcome of admission control for one access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
    /// The object is known and part of the simulation's ground truth.
    Admitted(ObjectMeta),
    /// No metadata for this id — deleted out-of-band; the access is skipped.
    UnknownObject,
    /// The object was created before the simulation start; it describes
    /// history outside the replayed ground truth and is skipped.
    Preexisting,
}

pub struct CacheSimulation<R> {
    log: EventLog,
    simulators: Vec<CacheSimulator>,
    resolver: R,
    /// One resolver consultation per distinct id; misses are cached too.
    metadata: HashMap<Arc<str>, Option<ObjectMeta>>,
    start: Option<DateTime<Utc>>,
}

impl<R: MetadataResolver> CacheSimulation<R> {
    /// Creates one simulator per entry of `window_secs`, in the given order.
    /// Duplicate durations are tracked independently.
    pub fn new(window_secs: &[u64], resolver: R) -> Self {
        Self {
            log: EventLog::new(),
            simulators: window_secs.iter().map(|&w| CacheSimulator::new(w)).collect(),
            resolver,
            metadata: HashMap::new(),
            start: None,
        }
    }

    /// Timestamp of the first access handed to the coordinator, if any.
    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    pub fn simulators(&self) -> &[CacheSimulator] {
        &self.simulators
    }

    /// Number of events currently retained in the shared log.
    pub fn retained_events(&self) -> usize {
        self.log.len()
    }

    /// Admission control: records the simulation start on first call,
    /// resolves (and caches) metadata, and applies the skip rules. Simulator
    /// state is not touched.
    pub fn admit(
        &mut self,
        object_id: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Admission, SimulationError> {
        let start = *self.start.get_or_insert(timestamp);

        let meta = match self.metadata.get(object_id) {
            Some(cached) => *cached,
            None => {
                let resolved = self.resolver.resolve(object_id)?;
                self.metadata.insert(Arc::from(object_id), resolved);
                resolved
            }
        };

        Ok(match meta {
            None => Admission::UnknownObject,
            Some(meta) if meta.created_at < start => Admission::Preexisting,
            Some(meta) => Admission::Admitted(meta),
        })
    }

    /// Replays an admitted access: appends to the shared log, advances every
    /// simulator in configured order, trims the log tail.
    ///
    /// An out-of-order timestamp fails before any simulator state changes.
    pub fn replay(
        &mut self,
        object_id: &str,
        timestamp: DateTime<Utc>,
        size: u64,
    ) -> Result<(), SimulationError> {
        let object_id: Arc<str> = self
            .metadata
            .get_key_value(object_id)
            .map(|(interned, _)| Arc::clone(interned))
            .unwrap_or_else(|| Arc::from(object_id));

        let event = Event {
            object_id,
            timestamp,
            size,
        };
        self.log.append(event.clone())?;

        for simulator in &mut self.simulators {
            simulator.advance(&self.log, &event)?;
        }

        let depth = self
            .simulators
            .iter()
            .map(CacheSimulator::trailing_depth)
            .max()
            .unwrap_or(0);
        self.log.truncate(depth);
        Ok(())
    }

    /// Full processing of one access: admission followed by replay when
    /// admitted. Returns the admission outcome either way.
    pub fn record_access(
        &mut self,
        object_id: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Admission, SimulationError> {
        let admission = self.admit(object_id, timestamp)?;
        if let Admission::Admitted(meta) = admission {
            self.replay(object_id, timestamp, meta.size)?;
        }
        Ok(admission)
    }

    /// Per-window high-water marks as of the most recently replayed access,
    /// in configured order. Read-only and callable mid-stream; a partial
    /// replay is a defined result, not an error state.
    pub fn snapshot(&self) -> Vec<WindowPeaks> {
        self.simulators.iter().map(CacheSimulator::peaks).collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone};
    use proptest::prelude::*;

    use spana_metadata::MemoryStore;

    use super::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn store(objects: &[(&str, u64)]) -> MemoryStore {
        objects
            .iter()
            .map(|&(id, size)| {
                (
                    id,
                    ObjectMeta {
                        size,
                        created_at: t0(),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn skips_unknown_objects_without_touching_state() {
        let mut sim = CacheSimulation::new(&[60], store(&[("a", 100)]));
        assert_eq!(
            sim.record_access("ghost", t0()).unwrap(),
            Admission::UnknownObject
        );
        assert_eq!(sim.retained_events(), 0);
        assert_eq!(sim.snapshot()[0].peak_objects, 0);

        assert_eq!(
            sim.record_access("a", t0() + TimeDelta::seconds(1)).unwrap(),
            Admission::Admitted(ObjectMeta {
                size: 100,
                created_at: t0()
            })
        );
        assert_eq!(sim.snapshot()[0].peak_objects, 1);
    }

    #[test]
    fn skips_objects_created_before_simulation_start() {
        let mut resolver = MemoryStore::new();
        resolver.insert(
            "old",
            ObjectMeta {
                size: 100,
                created_at: t0() - TimeDelta::days(30),
            },
        );
        resolver.insert(
            "new",
            ObjectMeta {
                size: 100,
                created_at: t0(),
            },
        );

        let mut sim = CacheSimulation::new(&[60], resolver);
        // First access pins the simulation start, even though it is skipped.
        assert_eq!(
            sim.record_access("old", t0()).unwrap(),
            Admission::Preexisting
        );
        assert_eq!(sim.start(), Some(t0()));
        assert_eq!(sim.retained_events(), 0);

        assert_eq!(
            sim.record_access("new", t0() + TimeDelta::seconds(5)).unwrap(),
            Admission::Admitted(ObjectMeta {
                size: 100,
                created_at: t0()
            })
        );
    }

    #[test]
    fn out_of_order_access_is_fatal_and_leaves_state_unchanged() {
        let mut sim = CacheSimulation::new(&[60, 3600], store(&[("a", 100), ("b", 50)]));
        sim.record_access("a", t0() + TimeDelta::seconds(10)).unwrap();
        let before = sim.snapshot();

        let err = sim.record_access("b", t0()).unwrap_err();
        assert!(matches!(err, SimulationError::OutOfOrder { .. }));
        assert_eq!(sim.snapshot(), before);
        assert_eq!(sim.retained_events(), 1);
    }

    #[test]
    fn snapshot_is_idempotent() {
        let mut sim = CacheSimulation::new(&[60], store(&[("a", 100)]));
        sim.record_access("a", t0()).unwrap();
        assert_eq!(sim.snapshot(), sim.snapshot());
    }

    #[test]
    fn log_is_trimmed_to_deepest_cursor() {
        let mut sim = CacheSimulation::new(&[10], store(&[("a", 100), ("b", 50)]));
        sim.record_access("a", t0()).unwrap();
        sim.record_access("b", t0() + TimeDelta::seconds(5)).unwrap();
        assert_eq!(sim.retained_events(), 2);

        // 100s later both prior events leave the 10s window; only the newest
        // event still needs to be retained.
        sim.record_access("a", t0() + TimeDelta::seconds(100)).unwrap();
        assert_eq!(sim.retained_events(), 1);
    }

    #[test]
    fn shorter_window_never_peaks_above_longer() {
        let mut sim = CacheSimulation::new(
            &[1, 3600],
            store(&[("a", 10), ("b", 20), ("c", 30), ("d", 40)]),
        );
        let accesses = [
            ("a", 0),
            ("b", 1),
            ("a", 2),
            ("c", 30),
            ("d", 31),
            ("a", 600),
            ("b", 601),
        ];
        for (id, offset) in accesses {
            sim.record_access(id, t0() + TimeDelta::seconds(offset)).unwrap();
            let snapshot = sim.snapshot();
            assert!(snapshot[0].peak_objects <= snapshot[1].peak_objects);
            assert!(snapshot[0].peak_bytes <= snapshot[1].peak_bytes);
        }
    }

    #[test]
    fn duplicate_windows_track_independently_and_identically() {
        let mut sim = CacheSimulation::new(&[60, 60], store(&[("a", 100), ("b", 50)]));
        sim.record_access("a", t0()).unwrap();
        sim.record_access("b", t0() + TimeDelta::seconds(30)).unwrap();

        let snapshot = sim.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0], snapshot[1]);
    }

    proptest! {
        /// After every access: each simulator's byte total equals the summed
        /// sizes of its resident ids, the resident set matches a brute-force
        /// window recomputation over the full history, and peaks only grow.
        #[test]
        fn residency_and_peak_invariants(
            deltas in proptest::collection::vec((0u8..6, 0i64..240), 1..120)
        ) {
            let objects: Vec<(String, u64)> = (0u8..6)
                .map(|i| (format!("obj-{i}"), u64::from(i + 1) * 100))
                .collect();
            let resolver: MemoryStore = objects
                .iter()
                .map(|(id, size)| (id.clone(), ObjectMeta { size: *size, created_at: t0() }))
                .collect();
            let windows = [1u64, 30, 3600];
            let mut sim = CacheSimulation::new(&windows, resolver);

            let mut history: Vec<(String, DateTime<Utc>)> = Vec::new();
            let mut now = t0();
            let mut previous = sim.snapshot();

            for (obj, gap) in deltas {
                now += TimeDelta::seconds(gap);
                let id = format!("obj-{obj}");
                sim.record_access(&id, now).unwrap();
                history.push((id, now));

                for (simulator, &window) in sim.simulators().iter().zip(windows.iter()) {
                    let cutoff = now - TimeDelta::seconds(window as i64);
                    let mut expected: std::collections::HashMap<&str, u64> =
                        std::collections::HashMap::new();
                    for (id, ts) in &history {
                        if *ts >= cutoff {
                            *expected.entry(id.as_str()).or_insert(0) += 1;
                        }
                    }
                    let expected_bytes: u64 = expected
                        .keys()
                        .map(|id| objects.iter().find(|(o, _)| o == id).map(|(_, s)| *s).unwrap_or(0))
                        .sum();

                    let actual: std::collections::HashMap<&str, u64> =
                        simulator.residents().collect();
                    prop_assert_eq!(&actual, &expected);
                    prop_assert_eq!(simulator.current_bytes(), expected_bytes);
                    prop_assert_eq!(simulator.resident_objects(), expected.len());
                }

                let snapshot = sim.snapshot();
                for (current, prior) in snapshot.iter().zip(previous.iter()) {
                    prop_assert!(current.peak_objects >= prior.peak_objects);
                    prop_assert!(current.peak_bytes >= prior.peak_bytes);
                }
                previous = snapshot;
            }
        }
    }
}
