use serde::{Deserialize, Serialize};
use std::fmt;

use crate::traits::{CategoryId, ServerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JobId(pub u64);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: JobId,
    pub arrival_time: f64,
    pub category: CategoryId,
    /// Set when the policy binds the job to a server.
    pub server: Option<ServerId>,
    /// Set once, when execution starts.
    pub service_time: Option<f64>,
}

impl Job {
    pub fn new(id: JobId, arrival_time: f64, category: CategoryId) -> Self {
        Self {
            id,
            arrival_time,
            category,
            server: None,
            service_time: None,
        }
    }

    pub fn start_service(&mut self, service_time: f64) {
        debug_assert!(
            self.service_time.is_none(),
            "{} started service twice",
            self.id
        );
        self.service_time = Some(service_time);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// The arriving job travels inside its event until it is handed to a server.
    Arrival(Job),
    /// The departing job is held by `server`; `job` names it.
    Departure { server: ServerId, job: JobId },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub time: f64,
    pub kind: EventKind,
}

impl Event {
    pub fn arrival(job: Job) -> Self {
        Self {
            time: job.arrival_time,
            kind: EventKind::Arrival(job),
        }
    }

    pub fn departure(time: f64, server: ServerId, job: JobId) -> Self {
        Self {
            time,
            kind: EventKind::Departure { server, job },
        }
    }
}
