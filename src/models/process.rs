//! Process model.
//!
//! A process is the schedulable unit of the simulator: it becomes
//! eligible at its arrival time and needs `burst_time` ticks of CPU.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5

use serde::{Deserialize, Serialize};

/// Process identifier (positive, unique within one simulation).
pub type ProcessId = u32;

/// Simulation time unit.
pub type Ticks = i64;

/// A process to be scheduled.
///
/// # Time Representation
/// All times are integer ticks relative to the simulation epoch (t=0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Unique process identifier.
    pub id: ProcessId,
    /// Tick at which the process becomes eligible.
    pub arrival_time: Ticks,
    /// Total CPU time required (>= 1).
    pub burst_time: Ticks,
    /// Scheduling priority (lower = more important). `None` falls back to
    /// the 1-based input position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

impl Process {
    /// Creates a process arriving at t=0 with no explicit priority.
    pub fn new(id: ProcessId, burst_time: Ticks) -> Self {
        Self {
            id,
            arrival_time: 0,
            burst_time,
            priority: None,
        }
    }

    /// Sets the arrival time.
    pub fn with_arrival(mut self, arrival_time: Ticks) -> Self {
        self.arrival_time = arrival_time;
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Priority used for ordering, given the process's 0-based input position.
    #[inline]
    pub fn effective_priority(&self, position: usize) -> i64 {
        self.priority.unwrap_or(position as i64 + 1)
    }

    /// Whether the process has arrived by `clock`.
    #[inline]
    pub fn has_arrived(&self, clock: Ticks) -> bool {
        self.arrival_time <= clock
    }
}

/// Sum of burst times across a process set, saturating at `Ticks::MAX`.
pub fn total_burst(processes: &[Process]) -> Ticks {
    processes
        .iter()
        .fold(0, |acc: Ticks, p| acc.saturating_add(p.burst_time))
}
