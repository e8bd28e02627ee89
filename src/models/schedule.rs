//! Schedule (simulation result) model.
//!
//! A schedule is everything one policy run produces: the order in which
//! processes first received the CPU, every CPU grant, the Gantt timeline
//! and the per-process outcomes.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3

use serde::{Deserialize, Serialize};

use super::{Algorithm, Dispatch, ProcessId, ProcessOutcome, Quantum, Ticks, Timeline};
use crate::metrics::Averages;

/// The result of simulating one algorithm over one process set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Algorithm that produced this schedule.
    pub algorithm: Algorithm,
    /// Quantum in effect (Round-Robin only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantum: Option<Quantum>,
    /// Process ids in order of first CPU grant.
    pub execution_order: Vec<ProcessId>,
    /// Every CPU grant, in time order.
    pub dispatches: Vec<Dispatch>,
    /// Gantt timeline including idle gaps.
    pub timeline: Timeline,
    /// Per-process outcomes, in input order.
    pub outcomes: Vec<ProcessOutcome>,
}

impl Schedule {
    /// Creates an empty schedule for an algorithm.
    pub fn empty(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            quantum: None,
            execution_order: Vec::new(),
            dispatches: Vec::new(),
            timeline: Timeline::new(),
            outcomes: Vec::new(),
        }
    }

    /// Number of scheduled processes.
    pub fn process_count(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether no process was scheduled.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Outcome for a given process.
    pub fn outcome(&self, id: ProcessId) -> Option<&ProcessOutcome> {
        self.outcomes.iter().find(|o| o.id == id)
    }

    /// Outcomes reordered to match `execution_order`.
    pub fn outcomes_in_execution_order(&self) -> Vec<&ProcessOutcome> {
        self.execution_order
            .iter()
            .filter_map(|id| self.outcome(*id))
            .collect()
    }

    /// Outcomes sorted by process id.
    pub fn outcomes_by_id(&self) -> Vec<&ProcessOutcome> {
        let mut sorted: Vec<&ProcessOutcome> = self.outcomes.iter().collect();
        sorted.sort_by_key(|o| o.id);
        sorted
    }

    /// Waiting times in input order.
    pub fn waiting_times(&self) -> Vec<Ticks> {
        self.outcomes.iter().map(|o| o.waiting_time).collect()
    }

    /// Turnaround times in input order.
    pub fn turnaround_times(&self) -> Vec<Ticks> {
        self.outcomes.iter().map(|o| o.turnaround_time).collect()
    }

    /// Average waiting and turnaround times.
    pub fn averages(&self) -> Averages {
        Averages::of(&self.outcomes)
    }

    /// Dispatches granted to a given process.
    pub fn dispatches_for(&self, id: ProcessId) -> Vec<&Dispatch> {
        self.dispatches
            .iter()
            .filter(|d| d.process_id == id)
            .collect()
    }

    /// Latest completion time (0 for an empty schedule).
    pub fn makespan(&self) -> Ticks {
        self.outcomes
            .iter()
            .map(|o| o.completion_time)
            .max()
            .unwrap_or(0)
    }
}
