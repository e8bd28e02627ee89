//! Simulation engine: request in, schedule and report out.
//!
//! # Flow
//!
//! 1. The caller supplies processes, an [`Algorithm`] and (for RR) a quantum.
//! 2. The matching policy computes execution order, dispatches and timeline.
//! 3. Metrics derive waiting / turnaround times and their averages.
//!
//! The engine holds configuration only; each call is independent.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::input::{normalize, normalize_quantum, RawRequest, Substitution};
use crate::metrics::{Averages, ScheduleKpi};
use crate::models::{Algorithm, Process, ProcessOutcome, Quantum, Schedule, Ticks};
use crate::policies::policy_for;

/// Input container for one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Algorithm to simulate.
    pub algorithm: Algorithm,
    /// Processes to schedule.
    pub processes: Vec<Process>,
    /// Round-Robin quantum; `None` uses the simulator default, values
    /// `<= 0` are clamped to 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantum: Option<i64>,
}

impl SimulationRequest {
    /// Creates a new request.
    pub fn new(algorithm: Algorithm, processes: Vec<Process>) -> Self {
        Self {
            algorithm,
            processes,
            quantum: None,
        }
    }

    /// Sets the Round-Robin quantum.
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.quantum = Some(quantum);
        self
    }

    /// Builds a request from loosely typed wire input.
    ///
    /// Unknown algorithms are rejected; every other defect is replaced by
    /// a default and reported in the returned substitutions.
    pub fn from_raw(raw: &RawRequest) -> Result<(Self, Vec<Substitution>), SimulationError> {
        let algorithm: Algorithm = raw.algorithm.parse()?;
        let normalized = normalize(&raw.processes);
        let mut substitutions = normalized.substitutions;

        let quantum = if algorithm == Algorithm::RoundRobin {
            let (q, sub) = normalize_quantum(raw.quantum.as_ref());
            substitutions.extend(sub);
            Some(q.ticks())
        } else {
            None
        };

        let request = Self {
            algorithm,
            processes: normalized.processes,
            quantum,
        };
        Ok((request, substitutions))
    }

    /// Parses a JSON request body leniently.
    pub fn from_json(body: &str) -> Result<(Self, Vec<Substitution>), SimulationError> {
        let raw: RawRequest = serde_json::from_str(body)?;
        Self::from_raw(&raw)
    }
}

/// Per-process results and averages, ordered by process id.
///
/// Serializes as `{ processes, avg_waiting_time, avg_turnaround_time }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Outcomes sorted by id.
    pub processes: Vec<ProcessOutcome>,
    /// Mean waiting time (0.0 for no processes).
    pub avg_waiting_time: f64,
    /// Mean turnaround time (0.0 for no processes).
    pub avg_turnaround_time: f64,
}

impl SimulationReport {
    /// Builds a report from a schedule.
    pub fn from_schedule(schedule: &Schedule) -> Self {
        let Averages {
            avg_waiting_time,
            avg_turnaround_time,
        } = schedule.averages();

        Self {
            processes: schedule.outcomes_by_id().into_iter().cloned().collect(),
            avg_waiting_time,
            avg_turnaround_time,
        }
    }

    /// Waiting times in id order.
    pub fn waiting_times(&self) -> Vec<Ticks> {
        self.processes.iter().map(|p| p.waiting_time).collect()
    }

    /// Turnaround times in id order.
    pub fn turnaround_times(&self) -> Vec<Ticks> {
        self.processes.iter().map(|p| p.turnaround_time).collect()
    }
}

/// Stateless simulation front end.
///
/// # Example
///
/// ```
/// use u_cpusched::engine::{Simulator, SimulationRequest};
/// use u_cpusched::models::{Algorithm, Process};
///
/// let request = SimulationRequest::new(
///     Algorithm::RoundRobin,
///     vec![Process::new(1, 10), Process::new(2, 5), Process::new(3, 8)],
/// )
/// .with_quantum(2);
///
/// let report = Simulator::new().report(&request).unwrap();
/// assert_eq!(report.waiting_times(), vec![13, 10, 13]);
/// assert!((report.avg_waiting_time - 12.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    default_quantum: Quantum,
}

impl Simulator {
    /// Creates a simulator with quantum default 1.
    pub fn new() -> Self {
        Self {
            default_quantum: Quantum::DEFAULT,
        }
    }

    /// Sets the quantum used when a Round-Robin request carries none.
    pub fn with_default_quantum(mut self, quantum: Quantum) -> Self {
        self.default_quantum = quantum;
        self
    }

    /// Default quantum in effect.
    pub fn default_quantum(&self) -> Quantum {
        self.default_quantum
    }

    fn resolve_quantum(&self, quantum: Option<i64>) -> Quantum {
        match quantum {
            None => self.default_quantum,
            Some(q) => {
                if q < 1 {
                    warn!("clamping quantum {q} to {}", Quantum::DEFAULT);
                }
                Quantum::clamped(q)
            }
        }
    }

    /// Simulates one algorithm over a process set.
    pub fn simulate(
        &self,
        algorithm: Algorithm,
        processes: &[Process],
        quantum: Option<i64>,
    ) -> Result<Schedule, SimulationError> {
        let quantum = self.resolve_quantum(quantum);
        let policy = policy_for(algorithm, quantum);
        debug!(
            "simulating {} over {} processes",
            policy.description(),
            processes.len()
        );

        let schedule = policy.schedule(processes)?;
        debug!(
            "{} finished at t={} after {} dispatches",
            policy.name(),
            schedule.makespan(),
            schedule.dispatches.len()
        );
        Ok(schedule)
    }

    /// Simulates a request.
    pub fn run(&self, request: &SimulationRequest) -> Result<Schedule, SimulationError> {
        self.simulate(request.algorithm, &request.processes, request.quantum)
    }

    /// Simulates a request and summarizes it.
    pub fn report(&self, request: &SimulationRequest) -> Result<SimulationReport, SimulationError> {
        self.run(request).map(|s| SimulationReport::from_schedule(&s))
    }

    /// Runs every algorithm over the same processes and returns their KPIs.
    pub fn compare(
        &self,
        processes: &[Process],
        quantum: Option<i64>,
    ) -> Result<Vec<(Algorithm, ScheduleKpi)>, SimulationError> {
        Algorithm::ALL
            .iter()
            .map(|&algo| {
                let schedule = self.simulate(algo, processes, quantum)?;
                Ok((algo, ScheduleKpi::calculate(&schedule)))
            })
            .collect()
    }
}
