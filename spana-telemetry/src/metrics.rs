//! Prometheus counters for the replay.

use prometheus::{Counter, Registry};

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: Registry,
    /// Raw lines read from all input sources.
    pub lines_seen: Counter,
    /// Lines matching the access-line grammar with a 2xx/3xx status.
    pub lines_matched: Counter,
    /// Accesses actually replayed into the simulation.
    pub accesses_replayed: Counter,
    /// Accesses skipped because the object has no metadata.
    pub skipped_unknown: Counter,
    /// Accesses skipped because the object predates the simulation start.
    pub skipped_preexisting: Counter,
    /// Accesses dropped because an ideally-caching client already had them.
    pub client_cached: Counter,
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRecorder {
    pub fn new() -> Self {
        let registry = Registry::new();
        let lines_seen = Counter::new("spana_lines_total", "Raw input lines read").unwrap();
        let lines_matched = Counter::new(
            "spana_lines_matched_total",
            "Lines matching the access grammar with a cacheable status",
        )
        .unwrap();
        let accesses_replayed = Counter::new(
            "spana_accesses_replayed_total",
            "Accesses replayed into the cache simulation",
        )
        .unwrap();
        let skipped_unknown = Counter::new(
            "spana_skipped_unknown_total",
            "Accesses skipped for lack of object metadata",
        )
        .unwrap();
        let skipped_preexisting = Counter::new(
            "spana_skipped_preexisting_total",
            "Accesses skipped because the object predates the replay",
        )
        .unwrap();
        let client_cached = Counter::new(
            "spana_client_cached_total",
            "Accesses absorbed by the ideal client-side cache",
        )
        .unwrap();

        for counter in [
            &lines_seen,
            &lines_matched,
            &accesses_replayed,
            &skipped_unknown,
            &skipped_preexisting,
            &client_cached,
        ] {
            registry.register(Box::new(counter.clone())).unwrap();
        }

        Self {
            registry,
            lines_seen,
            lines_matched,
            accesses_replayed,
            skipped_unknown,
            skipped_preexisting,
            client_cached,
        }
    }

    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap_or_default())
    }
}
