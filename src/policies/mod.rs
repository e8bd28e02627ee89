//! Scheduling policies.
//!
//! One pure policy per algorithm. Each maps a process slice (plus the
//! quantum for Round-Robin) to a [`Schedule`]; nothing is read from or
//! written to shared state.
//!
//! # Usage
//!
//! ```
//! use u_cpusched::models::{Algorithm, Process, Quantum};
//! use u_cpusched::policies::policy_for;
//!
//! let procs = vec![Process::new(1, 5), Process::new(2, 3), Process::new(3, 8)];
//! let policy = policy_for(Algorithm::Fcfs, Quantum::DEFAULT);
//! let schedule = policy.schedule(&procs).unwrap();
//! assert_eq!(schedule.waiting_times(), vec![0, 5, 8]);
//! ```
//!
//! # Iteration budget
//! Every loop is bounded by `2·n + Σburst + 1` iterations. Valid input
//! never gets close; a policy that runs out fails with
//! [`SimulationError::IterationLimit`].
//!
//! # References
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3
//! - Tanenbaum & Bos (2015), "Modern Operating Systems", Ch. 2.4

mod fcfs;
mod priority;
mod round_robin;
mod sjf;

pub use fcfs::Fcfs;
pub use priority::PriorityScheduling;
pub use round_robin::RoundRobin;
pub use sjf::ShortestJobFirst;

use std::fmt::Debug;

use crate::error::SimulationError;
use crate::metrics::cumulative_waiting_times;
use crate::models::{
    total_burst, Algorithm, Dispatch, Process, ProcessOutcome, Quantum, Schedule, Timeline,
};
use crate::validation::validate_processes;

/// A CPU scheduling policy.
///
/// Implementations must be deterministic: the same input always yields
/// the same schedule.
pub trait SchedulingPolicy: Send + Sync + Debug {
    /// Short name (e.g., "FCFS", "RR").
    fn name(&self) -> &'static str;

    /// Algorithm this policy implements.
    fn algorithm(&self) -> Algorithm;

    /// Simulates the policy over `processes`.
    ///
    /// Validates the input first; an empty slice yields an empty schedule.
    fn schedule(&self, processes: &[Process]) -> Result<Schedule, SimulationError>;

    /// Policy description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Returns the policy for an algorithm.
///
/// `quantum` is only used by Round-Robin.
pub fn policy_for(algorithm: Algorithm, quantum: Quantum) -> Box<dyn SchedulingPolicy> {
    match algorithm {
        Algorithm::Fcfs => Box::new(Fcfs),
        Algorithm::Sjf => Box::new(ShortestJobFirst),
        Algorithm::Priority => Box::new(PriorityScheduling),
        Algorithm::RoundRobin => Box::new(RoundRobin::new(quantum)),
    }
}

/// Upper bound on loop iterations for a process set.
pub(crate) fn iteration_budget(processes: &[Process]) -> usize {
    let bursts = usize::try_from(total_burst(processes).max(0)).unwrap_or(usize::MAX);
    processes
        .len()
        .saturating_mul(2)
        .saturating_add(bursts)
        .saturating_add(1)
}

pub(crate) fn check_input(processes: &[Process]) -> Result<(), SimulationError> {
    validate_processes(processes).map_err(SimulationError::InvalidInput)
}

/// Runs processes back to back from t=0 in the given order.
///
/// Shared by FCFS and Priority: every process is released at t=0, waits
/// follow `WT[i] = WT[i-1] + BT[i-1]`, and the timeline has no idle gaps.
pub(crate) fn batch_schedule(
    algorithm: Algorithm,
    processes: &[Process],
    order: &[usize],
) -> Schedule {
    let bursts: Vec<_> = order.iter().map(|&i| processes[i].burst_time).collect();
    let waits = cumulative_waiting_times(&bursts);

    let mut outcomes: Vec<Option<ProcessOutcome>> = vec![None; processes.len()];
    let mut schedule = Schedule::empty(algorithm);

    for (k, &idx) in order.iter().enumerate() {
        let p = &processes[idx];
        let start = waits[k];
        let end = start + p.burst_time;

        schedule.execution_order.push(p.id);
        schedule.timeline.push_run(p.id, start, end);
        schedule.dispatches.push(Dispatch {
            round: k + 1,
            process_id: p.id,
            start,
            run: p.burst_time,
            remaining_before: p.burst_time,
            remaining_after: 0,
        });
        outcomes[idx] = Some(ProcessOutcome::new(p, 0, start, end));
    }

    schedule.outcomes = outcomes.into_iter().flatten().collect();
    schedule
}

/// Builds an arrival-ordered timeline with idle gaps.
///
/// Processes are stably sorted by literal `arrival_time` and run to
/// completion; an idle slice covers any stretch before the next arrival.
pub(crate) fn arrival_timeline(processes: &[Process]) -> Timeline {
    let mut indices: Vec<usize> = (0..processes.len()).collect();
    indices.sort_by_key(|&i| processes[i].arrival_time);

    let mut timeline = Timeline::new();
    let mut clock = 0;
    for idx in indices {
        let p = &processes[idx];
        if p.arrival_time > clock {
            timeline.push_idle(clock, p.arrival_time);
            clock = p.arrival_time;
        }
        timeline.push_run(p.id, clock, clock + p.burst_time);
        clock += p.burst_time;
    }
    timeline
}
