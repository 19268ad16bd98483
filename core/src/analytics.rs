use serde::{Deserialize, Serialize};

use crate::traits::CategoryId;

/// Per-category sums collected during one run.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct CategoryStats {
    /// Jobs that started service.
    pub completed: u64,
    pub time_in_system: f64,
    pub service_time: f64,
    pub wait_time: f64,
}

impl CategoryStats {
    pub fn record_service_start(&mut self, service_time: f64, wait_time: f64) {
        self.completed += 1;
        self.service_time += service_time;
        self.wait_time += wait_time;
    }

    pub fn record_departure(&mut self, time_in_system: f64) {
        self.time_in_system += time_in_system;
    }

    pub fn mean_time_in_system(&self) -> f64 {
        self.per_job(self.time_in_system)
    }

    pub fn mean_service_time(&self) -> f64 {
        self.per_job(self.service_time)
    }

    pub fn mean_wait_time(&self) -> f64 {
        self.per_job(self.wait_time)
    }

    // A category that never started a job reports zero rather than NaN.
    fn per_job(&self, sum: f64) -> f64 {
        if self.completed == 0 {
            0.0
        } else {
            sum / self.completed as f64
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct RunStatistics {
    /// Time of the last processed event.
    pub end_time: f64,
    pub categories: Vec<CategoryStats>,
}

impl RunStatistics {
    pub fn new(categories: usize) -> Self {
        Self {
            end_time: 0.0,
            categories: vec![CategoryStats::default(); categories],
        }
    }

    pub fn category(&self, id: CategoryId) -> &CategoryStats {
        &self.categories[id]
    }

    pub fn category_mut(&mut self, id: CategoryId) -> &mut CategoryStats {
        &mut self.categories[id]
    }

    pub fn completed(&self) -> u64 {
        self.categories.iter().map(|c| c.completed).sum()
    }

    pub fn mean_time_in_system(&self) -> f64 {
        let completed = self.completed();
        if completed == 0 {
            return 0.0;
        }
        let total: f64 = self.categories.iter().map(|c| c.time_in_system).sum();
        total / completed as f64
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct CategoryAggregate {
    pub mean_completed: f64,
    pub mean_time_in_system: f64,
    pub mean_service_time: f64,
    pub mean_wait_time: f64,
}

/// Means across all runs. Each run contributes `value / runs`.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct AggregateStatistics {
    pub runs: u32,
    pub mean_end_time: f64,
    pub mean_time_in_system: f64,
    pub categories: Vec<CategoryAggregate>,
}

impl AggregateStatistics {
    pub fn new(runs: u32, categories: usize) -> Self {
        Self {
            runs,
            mean_end_time: 0.0,
            mean_time_in_system: 0.0,
            categories: vec![CategoryAggregate::default(); categories],
        }
    }

    pub fn fold(&mut self, run: &RunStatistics) {
        let runs = f64::from(self.runs);
        self.mean_end_time += run.end_time / runs;
        self.mean_time_in_system += run.mean_time_in_system() / runs;
        for (agg, stats) in self.categories.iter_mut().zip(&run.categories) {
            agg.mean_completed += stats.completed as f64 / runs;
            agg.mean_time_in_system += stats.mean_time_in_system() / runs;
            agg.mean_service_time += stats.mean_service_time() / runs;
            agg.mean_wait_time += stats.mean_wait_time() / runs;
        }
    }
}
