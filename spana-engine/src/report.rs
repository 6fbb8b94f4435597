//! Final report: per-window peaks, the log-sampled re-access histogram and
//! the client-side savings estimate, with the text rendering the CLI prints.

use std::fmt;

use spana_core::WindowPeaks;

const DAY_SECS: i64 = 24 * 60 * 60;

/// One row of the re-access histogram: the share of replayed accesses whose
/// gap since the previous access of the same object was at most
/// `gap_seconds`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InterArrivalRow {
    pub gap_seconds: i64,
    pub cumulative_percent: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    /// Peaks per configured window, in configured order.
    pub windows: Vec<WindowPeaks>,
    /// Logarithmically sampled re-access gaps, ascending.
    pub interarrival: Vec<InterArrivalRow>,
    /// Accesses replayed into the simulation.
    pub total_accesses: u64,
    /// `None` when no bytes were served at all.
    pub client_savings_percent: Option<f64>,
}

impl Report {
    pub(crate) fn new(
        windows: Vec<WindowPeaks>,
        gaps: Vec<i64>,
        total_accesses: u64,
        client_savings_percent: Option<f64>,
    ) -> Self {
        Self {
            windows,
            interarrival: sample_gaps(gaps, total_accesses),
            total_accesses,
            client_savings_percent,
        }
    }
}

/// Sorts the gaps and emits a row whenever the gap's natural log has grown by
/// more than 0.5 since the last emitted row, stopping past one day. Keeps the
/// histogram readable regardless of how many accesses were replayed.
fn sample_gaps(mut gaps: Vec<i64>, total_accesses: u64) -> Vec<InterArrivalRow> {
    gaps.sort_unstable();
    let mut rows = Vec::new();
    let mut last_ln = 0.0_f64;
    for (i, gap) in gaps.iter().enumerate() {
        if *gap > DAY_SECS {
            break;
        }
        if *gap > 0 {
            let ln = (*gap as f64).ln();
            if ln > last_ln + 0.5 {
                rows.push(InterArrivalRow {
                    gap_seconds: *gap,
                    cumulative_percent: 100.0 * (i as f64 + 1.0) / total_accesses as f64,
                });
                last_ln = ln;
            }
        }
    }
    rows
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.interarrival.is_empty() {
            writeln!(f, "Re-access gap (s) vs cumulative share of requests:")?;
            for row in &self.interarrival {
                writeln!(f, "{}\t{:.2}%", row.gap_seconds, row.cumulative_percent)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "window-secs\tpeak-MiB\tpeak-objects")?;
        for peaks in &self.windows {
            writeln!(
                f,
                "{}\t\t{:.3}\t{}",
                peaks.window_secs,
                peaks.peak_bytes as f64 / 1024.0 / 1024.0,
                peaks.peak_objects
            )?;
        }

        if let Some(savings) = self.client_savings_percent {
            writeln!(f)?;
            writeln!(f, "Ideal client-side caching would save: {savings:.2}%")?;
        }
        Ok(())
    }
}
