use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::analytics::{AggregateStatistics, RunStatistics};
use crate::category::Category;
use crate::config::SimConfig;
use crate::error::ConfigResult;
use crate::event_queue::EventQueue;
use crate::job::{Event, EventKind, Job, JobId};
use crate::server::Server;
use crate::traits::{AssignmentPolicy, CategoryId, ServerId, TraceSink};

/// One processed event as seen by a trace consumer.
///
/// `service` is 0.0 for arrivals and the departing job's service time for
/// departures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    pub time: f64,
    pub service: f64,
    pub category: CategoryId,
}

/// Discards every trace record.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTrace;

impl TraceSink for NoTrace {
    fn record(&mut self, _record: TraceRecord) {}
}

/// Drives R sequential runs over a fixed set of categories.
///
/// The categories, and with them the variate streams, live as long as the
/// simulator: every run continues the streams where the previous one stopped.
pub struct Simulator {
    config: SimConfig,
    categories: Vec<Category>,
    completed_runs: u32,
}

impl Simulator {
    pub fn new(config: &SimConfig) -> ConfigResult<Self> {
        config.validate()?;
        let categories = config
            .categories
            .iter()
            .enumerate()
            .map(|(id, c)| Category::from_config(id, c))
            .collect::<ConfigResult<Vec<_>>>()?;
        Ok(Self {
            config: config.clone(),
            categories,
            completed_runs: 0,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn completed_runs(&self) -> u32 {
        self.completed_runs
    }

    /// Executes all configured runs and averages them.
    pub fn run(&mut self, sink: &mut dyn TraceSink) -> AggregateStatistics {
        let mut aggregate = AggregateStatistics::new(self.config.runs, self.categories.len());
        for _ in 0..self.config.runs {
            let stats = self.run_once(sink);
            aggregate.fold(&stats);
        }
        info!(
            runs = self.config.runs,
            mean_end_time = aggregate.mean_end_time,
            mean_time_in_system = aggregate.mean_time_in_system,
            "simulation finished"
        );
        aggregate
    }

    /// Executes one run with fresh servers, queue and policy state.
    pub fn run_once(&mut self, sink: &mut dyn TraceSink) -> RunStatistics {
        let trace = self.config.trace_enabled();
        let mut run = RunState::new(&self.config, &mut self.categories, trace);
        while run.step(sink) {}
        let stats = run.finish();
        debug!(
            run = self.completed_runs,
            end_time = stats.end_time,
            completed = stats.completed(),
            "run finished"
        );
        self.completed_runs += 1;
        stats
    }

    /// Starts a run that the caller advances with [`RunState::step`].
    /// Runs driven this way are not counted in [`Simulator::completed_runs`].
    pub fn start_run(&mut self) -> RunState<'_> {
        let trace = self.config.trace_enabled();
        RunState::new(&self.config, &mut self.categories, trace)
    }
}

/// Everything owned by a single run.
pub struct RunState<'a> {
    categories: &'a mut [Category],
    queue: EventQueue<f64, Event>,
    servers: Vec<Server>,
    policy: Box<dyn AssignmentPolicy>,
    stats: RunStatistics,
    max_jobs: u64,
    admitted: u64,
    next_job: u64,
    trace: bool,
}

impl<'a> RunState<'a> {
    fn new(config: &SimConfig, categories: &'a mut [Category], trace: bool) -> Self {
        let mut run = Self {
            queue: EventQueue::new(),
            servers: (0..config.servers).map(Server::new).collect(),
            policy: config.policy.build(config.servers),
            stats: RunStatistics::new(categories.len()),
            categories,
            max_jobs: config.max_jobs,
            admitted: 0,
            next_job: 0,
            trace,
        };
        run.seed_arrivals();
        run
    }

    // One initial arrival per category, in category order.
    fn seed_arrivals(&mut self) {
        for id in 0..self.categories.len() {
            let first = self.categories[id].next_interarrival();
            let job = Job::new(self.next_job_id(), first, id);
            self.queue.insert(job.arrival_time, Event::arrival(job));
        }
    }

    fn next_job_id(&mut self) -> JobId {
        let id = JobId(self.next_job);
        self.next_job += 1;
        id
    }

    /// Processes the earliest pending event. Returns false once the queue is drained.
    pub fn step(&mut self, sink: &mut dyn TraceSink) -> bool {
        let Some((time, event)) = self.queue.pop() else {
            return false;
        };
        match event.kind {
            EventKind::Arrival(job) => self.handle_arrival(time, job, sink),
            EventKind::Departure { server, job } => {
                self.handle_departure(time, server, job, sink)
            }
        }
        true
    }

    fn handle_arrival(&mut self, time: f64, mut job: Job, sink: &mut dyn TraceSink) {
        self.admitted += 1;
        if self.admitted > self.max_jobs {
            trace!(time, job = %job.id, "arrival past job cap dropped");
            return;
        }
        let category = job.category;

        let delta = self.categories[category].next_interarrival();
        let next = Job::new(self.next_job_id(), time + delta, category);
        self.queue.insert(next.arrival_time, Event::arrival(next));

        let server = self.policy.assign(self.admitted - 1);
        job.server = Some(server);

        if !self.servers[server].is_busy() {
            let service = self.categories[category].next_service();
            job.start_service(service);
            self.queue
                .insert(time + service, Event::departure(time + service, server, job.id));
            self.stats
                .category_mut(category)
                .record_service_start(service, 0.0);
        }

        trace!(time, job = %job.id, category, server, "arrival");
        self.servers[server].enqueue(job);
        self.policy.update(server, self.servers[server].occupancy());

        if self.trace {
            sink.record(TraceRecord {
                time,
                service: 0.0,
                category,
            });
        }
    }

    fn handle_departure(
        &mut self,
        time: f64,
        server: ServerId,
        job: JobId,
        sink: &mut dyn TraceSink,
    ) {
        let done = self.servers[server]
            .dequeue()
            .unwrap_or_else(|| panic!("departure of {job} from idle server {server}"));
        assert_eq!(
            done.id, job,
            "server {server} was executing {} when {job} departed",
            done.id
        );
        self.policy.update(server, self.servers[server].occupancy());

        let service = done
            .service_time
            .unwrap_or_else(|| panic!("{job} departed without starting service"));
        self.stats
            .category_mut(done.category)
            .record_departure(time - done.arrival_time);
        trace!(time, job = %job, category = done.category, server, "departure");

        if let Some(promoted) = self.servers[server].executing_mut() {
            let next_service = self.categories[promoted.category].next_service();
            promoted.start_service(next_service);
            let (id, category, wait) = (
                promoted.id,
                promoted.category,
                time - promoted.arrival_time,
            );
            self.queue.insert(
                time + next_service,
                Event::departure(time + next_service, server, id),
            );
            self.stats
                .category_mut(category)
                .record_service_start(next_service, wait);
        }

        self.stats.end_time = time;

        if self.trace {
            sink.record(TraceRecord {
                time,
                service,
                category: done.category,
            });
        }
    }

    pub fn end_time(&self) -> f64 {
        self.stats.end_time
    }

    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    pub fn admitted(&self) -> u64 {
        self.admitted
    }

    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    pub fn policy(&self) -> &dyn AssignmentPolicy {
        &*self.policy
    }

    pub fn stats(&self) -> &RunStatistics {
        &self.stats
    }

    pub fn finish(self) -> RunStatistics {
        debug_assert!(self.queue.is_empty(), "run finished with pending events");
        self.stats
    }
}
