use crate::engine::TraceRecord;
use crate::policy::PolicyKind;

pub type ServerId = usize;
pub type CategoryId = usize;

/// Maps an arriving job to a server.
pub trait AssignmentPolicy {
    /// `counter` is the 0-based index of the admitted arrival within the run.
    fn assign(&mut self, counter: u64) -> ServerId;

    /// Notifies the policy that `server` now holds `occupancy` jobs.
    fn update(&mut self, server: ServerId, occupancy: usize);

    fn kind(&self) -> PolicyKind;
}

/// Receives one record per processed event while tracing is enabled.
pub trait TraceSink {
    fn record(&mut self, record: TraceRecord);
}

impl TraceSink for Vec<TraceRecord> {
    fn record(&mut self, record: TraceRecord) {
        self.push(record);
    }
}
