//! Per-process simulation results.

use serde::{Deserialize, Serialize};

use super::{Process, ProcessId, Ticks};

/// Derived timing figures for one process.
///
/// Computed once per simulation and never mutated afterwards.
///
/// # Invariants
/// - `turnaround_time == waiting_time + burst_time`
/// - `turnaround_time == completion_time - release_time`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessOutcome {
    /// Process identifier.
    pub id: ProcessId,
    /// Arrival time as supplied.
    pub arrival_time: Ticks,
    /// Burst time as supplied.
    pub burst_time: Ticks,
    /// Priority as supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    /// Tick from which waiting is measured.
    ///
    /// Equal to `arrival_time` under SJF and Round-Robin; zero under FCFS
    /// and Priority, which queue the whole batch at t=0.
    pub release_time: Ticks,
    /// Tick of the first CPU grant.
    pub start_time: Ticks,
    /// Tick at which the last unit of work finished.
    pub completion_time: Ticks,
    /// Ticks spent ready but not running.
    pub waiting_time: Ticks,
    /// Ticks from release to completion.
    pub turnaround_time: Ticks,
    /// Ticks from release to first grant.
    pub response_time: Ticks,
}

impl ProcessOutcome {
    /// Derives all figures from the release, first start and completion ticks.
    pub fn new(
        process: &Process,
        release_time: Ticks,
        start_time: Ticks,
        completion_time: Ticks,
    ) -> Self {
        let turnaround_time = completion_time - release_time;
        Self {
            id: process.id,
            arrival_time: process.arrival_time,
            burst_time: process.burst_time,
            priority: process.priority,
            release_time,
            start_time,
            completion_time,
            waiting_time: turnaround_time - process.burst_time,
            turnaround_time,
            response_time: start_time - release_time,
        }
    }

    /// Whether both turnaround identities hold.
    pub fn is_consistent(&self) -> bool {
        self.turnaround_time == self.waiting_time + self.burst_time
            && self.turnaround_time == self.completion_time - self.release_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_arrival() {
        let p = Process::new(2, 4).with_arrival(1);
        let o = ProcessOutcome::new(&p, 1, 8, 12);

        assert_eq!(o.waiting_time, 7);
        assert_eq!(o.turnaround_time, 11);
        assert_eq!(o.response_time, 7);
        assert!(o.is_consistent());
    }

    #[test]
    fn test_outcome_batch_release() {
        // Queued at t=0 regardless of arrival field
        let p = Process::new(3, 8).with_arrival(2);
        let o = ProcessOutcome::new(&p, 0, 8, 16);

        assert_eq!(o.waiting_time, 8);
        assert_eq!(o.turnaround_time, 16);
        assert_eq!(o.arrival_time, 2);
        assert!(o.is_consistent());
    }

    #[test]
    fn test_preempted_response_differs_from_waiting() {
        let p = Process::new(1, 10);
        let o = ProcessOutcome::new(&p, 0, 0, 23);

        assert_eq!(o.response_time, 0);
        assert_eq!(o.waiting_time, 13);
    }
}
