use std::io::Write;

use qsim_core::{AggregateStatistics, TraceRecord, TraceSink};

/// Writes `time,service,category` per processed event.
pub struct LineTrace<W: Write> {
    out: W,
}

impl<W: Write> LineTrace<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> TraceSink for LineTrace<W> {
    fn record(&mut self, record: TraceRecord) {
        if let Err(err) = writeln!(self.out, "{}", trace_line(&record)) {
            tracing::warn!(%err, "failed to write trace line");
        }
    }
}

pub fn trace_line(record: &TraceRecord) -> String {
    format!(
        "{},{},{}",
        fmt_float(record.time),
        fmt_float(record.service),
        record.category
    )
}

/// Mean end time, mean time-in-system, then `count,time_in_system,service`
/// per category.
pub fn summary_lines(stats: &AggregateStatistics) -> Vec<String> {
    let mut lines = vec![
        fmt_float(stats.mean_end_time),
        fmt_float(stats.mean_time_in_system),
    ];
    lines.extend(stats.categories.iter().map(|c| {
        format!(
            "{},{},{}",
            fmt_float(c.mean_completed),
            fmt_float(c.mean_time_in_system),
            fmt_float(c.mean_service_time)
        )
    }));
    lines
}

// Keeps a trailing `.0` on integral values so every field reads as a float.
fn fmt_float(value: f64) -> String {
    format!("{value:?}")
}
