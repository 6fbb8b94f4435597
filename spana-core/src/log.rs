//! Shared event buffer.
//!
//! Ordered newest-first: offset 0 is the most recently appended event.
//! Simulators never hold references into the buffer, only integer offsets, so
//! the coordinator is free to trim the tail once no cursor needs it.

use std::collections::VecDeque;

use crate::error::SimulationError;
use crate::event::Event;

#[derive(Debug, Default)]
pub struct EventLog {
    entries: VecDeque<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends an event at the newest position.
    ///
    /// Timestamps must be non-decreasing across appends; an older event is
    /// rejected without mutating the buffer.
    pub fn append(&mut self, event: Event) -> Result<(), SimulationError> {
        if let Some(newest) = self.entries.front() {
            if event.timestamp < newest.timestamp {
                return Err(SimulationError::OutOfOrder {
                    timestamp: event.timestamp,
                    newest: newest.timestamp,
                });
            }
        }
        self.entries.push_front(event);
        Ok(())
    }

    /// Returns the event at `index` offsets from the newest entry.
    pub fn at(&self, index: usize) -> Result<&Event, SimulationError> {
        self.entries
            .get(index)
            .ok_or(SimulationError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
    }

    /// Discards every entry beyond `max_needed` offsets from the front.
    ///
    /// The caller must guarantee no live cursor references a discarded entry.
    pub fn truncate(&mut self, max_needed: usize) {
        self.entries.truncate(max_needed);
    }
}
