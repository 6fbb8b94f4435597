//! Per-window cache simulator.
//!
//! Each simulator answers: had a cache retained everything accessed within
//! the trailing `window` of simulated time, what would its resident set and
//! byte footprint be right now, and what were their peaks?
//!
//! Residency is tracked as an occurrence count per object, not a boolean: the
//! same object can appear several times inside one window, and only the first
//! in-window occurrence may add its size while only the eviction of the last
//! one may subtract it. The trailing cursor walks strictly backward through
//! the shared log and never revisits an evicted position, so eviction work is
//! amortized O(1) per event per simulator.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::TimeDelta;

use crate::error::SimulationError;
use crate::event::Event;
use crate::log::EventLog;

// Keeps chrono duration arithmetic in range for nonsense window values.
const MAX_WINDOW_SECS: u64 = 100 * 365 * 24 * 60 * 60;

/// High-water marks of one simulated window, as of the last processed event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowPeaks {
    pub window_secs: u64,
    pub peak_objects: usize,
    pub peak_bytes: u64,
}

#[derive(Debug)]
pub struct CacheSimulator {
    window_secs: u64,
    window: TimeDelta,
    /// Offset of the oldest in-window event in the shared log, -1 when none.
    trailing: isize,
    /// Occurrence count per resident object; an entry exists iff count > 0.
    resident: HashMap<Arc<str>, u64>,
    current_bytes: u64,
    peak_objects: usize,
    peak_bytes: u64,
}

impl CacheSimulator {
    pub fn new(window_secs: u64) -> Self {
        Self {
            window_secs,
            window: TimeDelta::seconds(window_secs.min(MAX_WINDOW_SECS) as i64),
            trailing: -1,
            resident: HashMap::new(),
            current_bytes: 0,
            peak_objects: 0,
            peak_bytes: 0,
        }
    }

    pub fn window_secs(&self) -> u64 {
        self.window_secs
    }

    /// Number of log entries this simulator still needs, counted from the
    /// newest position.
    pub fn trailing_depth(&self) -> usize {
        (self.trailing + 1) as usize
    }

    pub fn resident_objects(&self) -> usize {
        self.resident.len()
    }

    pub fn current_bytes(&self) -> u64 {
        self.current_bytes
    }

    pub fn peaks(&self) -> WindowPeaks {
        WindowPeaks {
            window_secs: self.window_secs,
            peak_objects: self.peak_objects,
            peak_bytes: self.peak_bytes,
        }
    }

    /// Iterates over resident objects and their in-window occurrence counts.
    pub fn residents(&self) -> impl Iterator<Item = (&str, u64)> {
        self.resident.iter().map(|(id, count)| (id.as_ref(), *count))
    }

    /// Folds one newly appended event into this window.
    ///
    /// Must be called exactly once per append, in append order, with `newest`
    /// being the event just pushed onto `log`. Admits the new event, then
    /// walks the trailing cursor backward evicting everything older than
    /// `newest.timestamp - window`.
    pub fn advance(&mut self, log: &EventLog, newest: &Event) -> Result<(), SimulationError> {
        // The append shifted every existing offset up by one; following it
        // keeps the cursor on the same (oldest in-window) entry.
        self.trailing += 1;

        let count = self.resident.entry(Arc::clone(&newest.object_id)).or_insert(0);
        if *count == 0 {
            self.current_bytes += newest.size;
        }
        *count += 1;

        let cutoff = newest.timestamp - self.window;
        while self.trailing >= 0 {
            let oldest = log.at(self.trailing as usize)?;
            if oldest.timestamp >= cutoff {
                break;
            }
            if let Some(count) = self.resident.get_mut(oldest.object_id.as_ref()) {
                *count -= 1;
                if *count == 0 {
                    self.current_bytes -= oldest.size;
                    self.resident.remove(oldest.object_id.as_ref());
                }
            }
            self.trailing -= 1;
        }

        self.peak_objects = self.peak_objects.max(self.resident.len());
        self.peak_bytes = self.peak_bytes.max(self.current_bytes);
        Ok(())
    }
}
