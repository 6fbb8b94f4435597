//! The access-line grammar.
//!
//! One fixed pattern for upload-serving log lines:
//!
//! ```text
//! <addr> - - [<time> <zone>] "GET /user_uploads/<path>..." <status> <bytes> "<referer>" "<agent>"
//! ```
//!
//! The path stops at the first `?` or space, so query strings and the HTTP
//! version never leak into the object id; an optional `download/` prefix is
//! stripped because both URL forms serve the same stored object.

use chrono::{DateTime, FixedOffset};
use once_cell::sync::Lazy;
use regex::Regex;

static LINE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(\S+) \S+ \S+ \[([^\]]+)\] "GET /user_uploads/(?:download/)?([^? ]+)[^"]+" (\d+) \d+ "[^"]+" "([^"]+)""#,
    )
    .unwrap()
});

const TIMESTAMP_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

/// One content-access log line, already shape-checked against the grammar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessLine {
    pub client_addr: String,
    pub timestamp: DateTime<FixedOffset>,
    pub object_id: String,
    pub status: u16,
    pub user_agent: String,
}

impl AccessLine {
    /// Parses one log line. `None` means the line is not a content fetch (or
    /// is malformed); such lines are skipped upstream, never errors.
    pub fn parse(line: &str) -> Option<Self> {
        let caps = LINE_PATTERN.captures(line)?;
        let timestamp = DateTime::parse_from_str(&caps[2], TIMESTAMP_FORMAT).ok()?;
        let status = caps[4].parse().ok()?;
        Some(Self {
            client_addr: caps[1].to_owned(),
            timestamp,
            object_id: caps[3].to_owned(),
            status,
            user_agent: caps[5].to_owned(),
        })
    }

    /// Whether this access is a candidate for the simulation: only 2xx/3xx
    /// responses actually delivered (or revalidated) content.
    pub fn is_cacheable(&self) -> bool {
        matches!(self.status, 200..=399)
    }
}
