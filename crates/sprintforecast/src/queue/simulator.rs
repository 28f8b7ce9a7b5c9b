//! Discrete-event dev → review simulation over a worker pool.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, VecDeque};

use rand::Rng;

use sprintforecast_core::constants::{DEFAULT_HORIZON_FACTOR, DEFAULT_WORKERS};
use sprintforecast_core::distribution::PertBatch;
use sprintforecast_core::{
    Error, ExecutionStrategy, ForecastResult, RandomStream, Result, ReviewStrategy, Ticket,
};

use super::map_paths;
use crate::config::{ReviewPool, RunConfig};

/// Simulates tickets flowing through development then review.
///
/// Tickets enter the ready queue in shortest-expected-job-first order and
/// are served FIFO by the next free worker. A finished dev stage queues the
/// ticket for review; in a [`ReviewPool::Shared`] pool the review takes a
/// worker slot as well, and pending reviews are served before new dev work.
/// A ticket becomes ready only once every dependency inside the set has
/// finished review.
///
/// Each path stops at its horizon; tickets not finished by then keep an
/// infinite finish time.
#[derive(Debug, Clone)]
pub struct QueueSimulator {
    tickets: Vec<Ticket>,
    batch: PertBatch,
    execution: ExecutionStrategy,
    review: ReviewStrategy,
    workers: usize,
    review_pool: ReviewPool,
    horizon_factor: f64,
    horizon: Option<f64>,
    /// Ticket indices by ascending mean estimate.
    order: Vec<usize>,
    /// Position of each ticket in `order`.
    rank: Vec<usize>,
    /// In-set dependency count per ticket.
    blockers: Vec<usize>,
    /// Tickets waiting on each ticket.
    dependents: Vec<Vec<usize>>,
}

/// Finish time of every ticket on one simulated path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathOutcome {
    /// Finish time per ticket, in input order; infinite if not finished
    /// within the horizon.
    pub finish: Vec<f64>,
    /// Whether the horizon stopped the path before every ticket finished.
    pub capped: bool,
}

impl PathOutcome {
    /// Time the last ticket finished.
    pub fn makespan(&self) -> f64 {
        self.finish.iter().copied().fold(0.0, f64::max)
    }

    /// Tickets finishing after `remaining_hours`.
    pub fn carried(&self, remaining_hours: f64) -> usize {
        self.finish.iter().filter(|&&t| t > remaining_hours).count()
    }
}

impl QueueSimulator {
    /// Build a simulator with the default pool (3 workers, shared review,
    /// horizon 10× the remaining hours).
    ///
    /// # Errors
    ///
    /// - [`Error::Data`] if `tickets` is empty.
    /// - [`Error::Validation`] for a duplicate ticket number or a dependency
    ///   cycle (including a ticket depending on itself).
    pub fn new(
        tickets: Vec<Ticket>,
        execution: ExecutionStrategy,
        review: ReviewStrategy,
    ) -> Result<Self> {
        if tickets.is_empty() {
            return Err(Error::data("no tickets to simulate"));
        }
        let batch = PertBatch::new(&tickets)?;

        let mut order: Vec<usize> = (0..tickets.len()).collect();
        order.sort_by(|&a, &b| tickets[a].mean().total_cmp(&tickets[b].mean()));
        let mut rank = vec![0; tickets.len()];
        for (r, &i) in order.iter().enumerate() {
            rank[i] = r;
        }

        let (blockers, dependents) = dependency_graph(&tickets)?;

        Ok(Self {
            tickets,
            batch,
            execution,
            review,
            workers: DEFAULT_WORKERS,
            review_pool: ReviewPool::Shared,
            horizon_factor: DEFAULT_HORIZON_FACTOR,
            horizon: None,
            order,
            rank,
            blockers,
            dependents,
        })
    }

    /// Build a simulator with the pool and horizon of `config`.
    pub fn from_config(
        tickets: Vec<Ticket>,
        execution: ExecutionStrategy,
        review: ReviewStrategy,
        config: &RunConfig,
    ) -> Result<Self> {
        config.validate()?;
        let mut sim = Self::new(tickets, execution, review)?;
        sim.workers = config.workers;
        sim.review_pool = config.review_pool;
        sim.horizon_factor = config.horizon_factor;
        sim.horizon = config.horizon;
        Ok(sim)
    }

    /// Set the worker pool size.
    pub fn with_workers(mut self, workers: usize) -> Self {
        assert!(workers > 0, "workers must be positive");
        self.workers = workers;
        self
    }

    /// Set the review staffing.
    pub fn with_review_pool(mut self, pool: ReviewPool) -> Self {
        if let ReviewPool::Dedicated(n) = pool {
            assert!(n > 0, "review_pool must have at least one reviewer");
        }
        self.review_pool = pool;
        self
    }

    /// Set an explicit horizon in hours.
    pub fn with_horizon(mut self, hours: f64) -> Self {
        assert!(hours.is_finite() && hours > 0.0, "horizon must be positive");
        self.horizon = Some(hours);
        self
    }

    /// The tickets, in input order.
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// Worker pool size.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Horizon used for a run with `remaining_hours` left.
    pub fn horizon_for(&self, remaining_hours: f64) -> f64 {
        self.horizon.unwrap_or(remaining_hours * self.horizon_factor)
    }

    /// Probability that every ticket finishes within `remaining_hours`, and
    /// the expected count of tickets that do not.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `draws < 1` or `remaining_hours` is
    /// not positive.
    pub fn forecast(
        &self,
        remaining_hours: f64,
        draws: usize,
        stream: &RandomStream,
    ) -> Result<ForecastResult> {
        if draws < 1 {
            return Err(Error::validation("draws", format!("must be >= 1, got {draws}")));
        }
        if !(remaining_hours.is_finite() && remaining_hours > 0.0) {
            return Err(Error::validation(
                "remaining_hours",
                format!("must be positive, got {remaining_hours}"),
            ));
        }
        let horizon = self.horizon_for(remaining_hours);
        tracing::debug!(
            draws,
            tickets = self.tickets.len(),
            workers = self.workers,
            horizon,
            seed = stream.seed(),
            "simulating review queue"
        );

        let outcomes = map_paths(draws, stream, |rng| {
            let outcome = self.simulate_path(rng, horizon);
            (
                outcome.makespan() <= remaining_hours,
                outcome.carried(remaining_hours),
                outcome.capped,
            )
        });

        let capped = outcomes.iter().filter(|o| o.2).count();
        if capped > 0 {
            tracing::warn!(capped, draws, horizon, "queue paths stopped at the horizon");
        }
        let met: Vec<bool> = outcomes.iter().map(|o| o.0).collect();
        let carried: Vec<usize> = outcomes.iter().map(|o| o.1).collect();
        Ok(ForecastResult::from_paths(&met, &carried))
    }

    /// Sample stage durations and run one path.
    pub fn simulate_path<R: Rng + ?Sized>(&self, rng: &mut R, horizon: f64) -> PathOutcome {
        let n = self.tickets.len();
        let mut dev = vec![0.0; n];
        self.batch.fill_row(rng, &mut dev);
        for d in &mut dev {
            *d = self.execution.apply(*d, rng);
        }
        let review: Vec<f64> = (0..n).map(|_| self.review.draw_lag(rng)).collect();
        self.run(&dev, &review, horizon)
    }

    /// Run the event loop for fixed stage durations (input ticket order).
    pub fn run(&self, dev: &[f64], review: &[f64], horizon: f64) -> PathOutcome {
        debug_assert_eq!(dev.len(), self.tickets.len());
        debug_assert_eq!(review.len(), self.tickets.len());

        let mut state = PathState {
            blockers: self.blockers.clone(),
            dev_queue: self
                .order
                .iter()
                .copied()
                .filter(|&i| self.blockers[i] == 0)
                .collect(),
            review_queue: VecDeque::new(),
            dev_free: self.workers,
            review_free: match self.review_pool {
                ReviewPool::Shared => 0,
                ReviewPool::Dedicated(k) => k,
            },
            events: BinaryHeap::new(),
            seq: 0,
            finish: vec![f64::INFINITY; self.tickets.len()],
        };

        let mut now = 0.0;
        let mut capped = false;
        loop {
            state.dispatch(now, self.review_pool, dev, review);
            let Some(event) = state.events.pop() else {
                break;
            };
            if event.time > horizon {
                capped = true;
                break;
            }
            now = event.time;
            match event.stage {
                Stage::Dev => {
                    state.dev_free += 1;
                    state.review_queue.push_back(event.ticket);
                }
                Stage::Review => {
                    match self.review_pool {
                        ReviewPool::Shared => state.dev_free += 1,
                        ReviewPool::Dedicated(_) => state.review_free += 1,
                    }
                    state.finish[event.ticket] = now;
                    let mut released: Vec<usize> = self.dependents[event.ticket]
                        .iter()
                        .copied()
                        .filter(|&d| {
                            state.blockers[d] -= 1;
                            state.blockers[d] == 0
                        })
                        .collect();
                    released.sort_by_key(|&d| self.rank[d]);
                    state.dev_queue.extend(released);
                }
            }
        }

        PathOutcome {
            finish: state.finish,
            capped,
        }
    }
}

/// In-set dependency counts and reverse edges; rejects cycles.
fn dependency_graph(tickets: &[Ticket]) -> Result<(Vec<usize>, Vec<Vec<usize>>)> {
    let mut index = HashMap::with_capacity(tickets.len());
    for (i, t) in tickets.iter().enumerate() {
        if index.insert(t.number(), i).is_some() {
            return Err(Error::validation(
                "tickets",
                format!("duplicate ticket number {}", t.number()),
            ));
        }
    }

    let mut blockers = vec![0; tickets.len()];
    let mut dependents = vec![Vec::new(); tickets.len()];
    for (i, t) in tickets.iter().enumerate() {
        for dep in t.dependencies() {
            // Dependencies outside the set count as already done
            if let Some(&j) = index.get(dep) {
                blockers[i] += 1;
                dependents[j].push(i);
            }
        }
    }

    // Kahn's algorithm: anything left unvisited sits on a cycle
    let mut remaining = blockers.clone();
    let mut frontier: Vec<usize> = (0..tickets.len()).filter(|&i| remaining[i] == 0).collect();
    let mut visited = 0;
    while let Some(i) = frontier.pop() {
        visited += 1;
        for &d in &dependents[i] {
            remaining[d] -= 1;
            if remaining[d] == 0 {
                frontier.push(d);
            }
        }
    }
    if visited < tickets.len() {
        let cyclic: Vec<_> = (0..tickets.len())
            .filter(|&i| remaining[i] > 0)
            .map(|i| tickets[i].number())
            .collect();
        return Err(Error::validation(
            "dependencies",
            format!("dependency cycle among tickets {cyclic:?}"),
        ));
    }

    Ok((blockers, dependents))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Dev,
    Review,
}

#[derive(Debug, Clone, Copy)]
struct Event {
    time: f64,
    seq: u64,
    ticket: usize,
    stage: Stage,
}

// Reversed so the max-heap pops the earliest event; `seq` keeps ties FIFO.
impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .time
            .total_cmp(&self.time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Event {}

struct PathState {
    blockers: Vec<usize>,
    dev_queue: VecDeque<usize>,
    review_queue: VecDeque<usize>,
    dev_free: usize,
    review_free: usize,
    events: BinaryHeap<Event>,
    seq: u64,
    finish: Vec<f64>,
}

impl PathState {
    fn start(&mut self, now: f64, ticket: usize, stage: Stage, duration: f64) {
        self.events.push(Event {
            time: now + duration,
            seq: self.seq,
            ticket,
            stage,
        });
        self.seq += 1;
    }

    fn dispatch(&mut self, now: f64, pool: ReviewPool, dev: &[f64], review: &[f64]) {
        match pool {
            ReviewPool::Shared => {
                while self.dev_free > 0 {
                    if let Some(t) = self.review_queue.pop_front() {
                        self.start(now, t, Stage::Review, review[t]);
                    } else if let Some(t) = self.dev_queue.pop_front() {
                        self.start(now, t, Stage::Dev, dev[t]);
                    } else {
                        break;
                    }
                    self.dev_free -= 1;
                }
            }
            ReviewPool::Dedicated(_) => {
                while self.dev_free > 0 {
                    let Some(t) = self.dev_queue.pop_front() else {
                        break;
                    };
                    self.start(now, t, Stage::Dev, dev[t]);
                    self.dev_free -= 1;
                }
                while self.review_free > 0 {
                    let Some(t) = self.review_queue.pop_front() else {
                        break;
                    };
                    self.start(now, t, Stage::Review, review[t]);
                    self.review_free -= 1;
                }
            }
        }
    }
}
