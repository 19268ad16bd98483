pub mod analytics;
pub mod category;
pub mod config;
pub mod engine;
pub mod error;
pub mod event_queue;
pub mod job;
pub mod policy;
pub mod server;
pub mod traits;
pub mod variate;

pub use analytics::{AggregateStatistics, CategoryAggregate, CategoryStats, RunStatistics};
pub use category::Category;
pub use config::{CategoryConfig, SimConfig};
pub use engine::{NoTrace, RunState, Simulator, TraceRecord};
pub use error::ConfigError;
pub use event_queue::EventQueue;
pub use job::{Event, EventKind, Job, JobId};
pub use policy::{LeastLoaded, PolicyKind, RoundRobin};
pub use server::Server;
pub use traits::{AssignmentPolicy, CategoryId, ServerId, TraceSink};
pub use variate::ExpVariate;

/// Largest job cap for which a single round-robin run emits per-event trace records.
pub const TRACE_MAX_JOBS: u64 = 10;
