use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::traits::{AssignmentPolicy, ServerId};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    RoundRobin,
    LeastLoaded,
}

impl PolicyKind {
    /// Decodes the numeric selector used by text configurations.
    pub fn from_selector(selector: u8) -> Result<Self, ConfigError> {
        match selector {
            0 => Ok(Self::RoundRobin),
            1 => Ok(Self::LeastLoaded),
            other => Err(ConfigError::UnknownPolicy(other)),
        }
    }

    pub fn selector(self) -> u8 {
        match self {
            Self::RoundRobin => 0,
            Self::LeastLoaded => 1,
        }
    }

    pub fn build(self, servers: usize) -> Box<dyn AssignmentPolicy> {
        match self {
            Self::RoundRobin => Box::new(RoundRobin::new(servers)),
            Self::LeastLoaded => Box::new(LeastLoaded::new(servers)),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoundRobin => f.write_str("round-robin"),
            Self::LeastLoaded => f.write_str("least-loaded"),
        }
    }
}

impl FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "round-robin" | "rr" | "0" => Ok(Self::RoundRobin),
            "least-loaded" | "ll" | "1" => Ok(Self::LeastLoaded),
            other => Err(format!(
                "unknown policy `{other}`, expected round-robin or least-loaded"
            )),
        }
    }
}

/// `assign(i) = i mod K`.
#[derive(Debug, Clone)]
pub struct RoundRobin {
    servers: usize,
}

impl RoundRobin {
    pub fn new(servers: usize) -> Self {
        assert!(servers > 0, "round-robin needs at least one server");
        Self { servers }
    }
}

impl AssignmentPolicy for RoundRobin {
    fn assign(&mut self, counter: u64) -> ServerId {
        (counter % self.servers as u64) as ServerId
    }

    fn update(&mut self, _server: ServerId, _occupancy: usize) {}

    fn kind(&self) -> PolicyKind {
        PolicyKind::RoundRobin
    }
}

/// Picks the server with the fewest jobs.
///
/// Keeps a binary min-heap of server ids keyed by occupancy together with a
/// server → heap position index, so a single occupancy change is re-sifted in
/// O(log K) and `assign` reads the root in O(1). Servers with equal occupancy
/// come out in heap order, which starts as ascending ids.
#[derive(Debug, Clone)]
pub struct LeastLoaded {
    heap: Vec<ServerId>,
    position: Vec<usize>,
    load: Vec<usize>,
}

impl LeastLoaded {
    pub fn new(servers: usize) -> Self {
        assert!(servers > 0, "least-loaded needs at least one server");
        Self {
            heap: (0..servers).collect(),
            position: (0..servers).collect(),
            load: vec![0; servers],
        }
    }

    pub fn occupancy(&self, server: ServerId) -> usize {
        self.load[server]
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.position[self.heap[a]] = a;
        self.position[self.heap[b]] = b;
    }

    fn key(&self, slot: usize) -> usize {
        self.load[self.heap[slot]]
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.key(parent) <= self.key(slot) {
                break;
            }
            self.swap(parent, slot);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            if left >= self.heap.len() {
                return;
            }
            let child = if right < self.heap.len() && self.key(right) < self.key(left) {
                right
            } else {
                left
            };
            if self.key(slot) <= self.key(child) {
                return;
            }
            self.swap(slot, child);
            slot = child;
        }
    }
}

impl AssignmentPolicy for LeastLoaded {
    fn assign(&mut self, _counter: u64) -> ServerId {
        self.heap[0]
    }

    fn update(&mut self, server: ServerId, occupancy: usize) {
        let previous = std::mem::replace(&mut self.load[server], occupancy);
        let slot = self.position[server];
        if occupancy < previous {
            self.sift_up(slot);
        } else if occupancy > previous {
            self.sift_down(slot);
        }
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::LeastLoaded
    }
}
