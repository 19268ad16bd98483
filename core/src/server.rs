use std::collections::VecDeque;

use crate::job::Job;
use crate::traits::ServerId;

/// A single-slot server with a FIFO backlog.
#[derive(Debug, Clone)]
pub struct Server {
    pub id: ServerId,
    executing: Option<Job>,
    backlog: VecDeque<Job>,
}

impl Server {
    pub fn new(id: ServerId) -> Self {
        Self {
            id,
            executing: None,
            backlog: VecDeque::new(),
        }
    }

    /// Starts `job` if the server is idle, otherwise queues it behind the backlog.
    pub fn enqueue(&mut self, job: Job) {
        if self.executing.is_none() {
            self.executing = Some(job);
        } else {
            self.backlog.push_back(job);
        }
        self.check_backlog();
    }

    /// Removes the executing job and promotes the backlog head into execution.
    pub fn dequeue(&mut self) -> Option<Job> {
        let done = self.executing.take();
        self.executing = self.backlog.pop_front();
        self.check_backlog();
        done
    }

    pub fn executing(&self) -> Option<&Job> {
        self.executing.as_ref()
    }

    pub fn executing_mut(&mut self) -> Option<&mut Job> {
        self.executing.as_mut()
    }

    pub fn is_busy(&self) -> bool {
        self.executing.is_some()
    }

    pub fn backlog_len(&self) -> usize {
        self.backlog.len()
    }

    pub fn occupancy(&self) -> usize {
        usize::from(self.is_busy()) + self.backlog.len()
    }

    fn check_backlog(&self) {
        debug_assert!(
            self.executing.is_some() || self.backlog.is_empty(),
            "server {} has a backlog but nothing executing",
            self.id
        );
    }
}
