//! # spana-core
//!
//! Single-pass, multi-window cache simulation over a chronologically ordered
//! stream of content accesses. One shared, newest-first event buffer is read
//! by any number of independently configured window simulators, each holding
//! only an integer cursor into the buffer — no references into shared
//! storage, no duplicated event history.
//!
//! ### Key pieces:
//! - [`EventLog`]: append/trim-able ordered event buffer, shared by index
//! - [`CacheSimulator`]: per-window trailing cursor, residency multiplicity
//!   map and high-water marks
//! - [`CacheSimulation`]: owns the log and the simulator set, resolves and
//!   caches object metadata, drives every simulator in lockstep

pub mod coordinator;
pub mod error;
pub mod event;
pub mod log;
pub mod simulator;

pub use coordinator::{Admission, CacheSimulation};
pub use error::SimulationError;
pub use event::Event;
pub use log::EventLog;
pub use simulator::{CacheSimulator, WindowPeaks};
