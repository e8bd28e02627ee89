//! First-Come-First-Served.
//!
//! # Algorithm
//!
//! 1. Execution order is the input order: the position in the slice is
//!    the arrival order, the numeric `arrival_time` is not consulted.
//! 2. `WT[0] = 0`, `WT[i] = WT[i-1] + BT[i-1]`, `TAT = WT + BT`.
//! 3. The Gantt timeline sorts by literal `arrival_time` and inserts idle
//!    slices wherever the next arrival is later than the clock. With
//!    positional or all-zero arrivals it matches the metrics exactly.
//!
//! # Complexity
//! O(n log n) for the timeline sort, O(n) otherwise.

use log::debug;

use super::{arrival_timeline, batch_schedule, check_input, SchedulingPolicy};
use crate::error::SimulationError;
use crate::models::{Algorithm, Process, Schedule};

/// First-Come-First-Served policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fcfs;

impl SchedulingPolicy for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Fcfs
    }

    fn schedule(&self, processes: &[Process]) -> Result<Schedule, SimulationError> {
        check_input(processes)?;
        debug!("FCFS: scheduling {} processes", processes.len());

        let order: Vec<usize> = (0..processes.len()).collect();
        let mut schedule = batch_schedule(Algorithm::Fcfs, processes, &order);
        schedule.timeline = arrival_timeline(processes);
        Ok(schedule)
    }

    fn description(&self) -> &'static str {
        "First-Come-First-Served"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SliceOwner;

    #[test]
    fn test_fcfs_reference_example() {
        let procs = vec![Process::new(1, 5), Process::new(2, 3), Process::new(3, 8)];
        let schedule = Fcfs.schedule(&procs).unwrap();

        assert_eq!(schedule.execution_order, vec![1, 2, 3]);
        assert_eq!(schedule.waiting_times(), vec![0, 5, 8]);
        assert_eq!(schedule.turnaround_times(), vec![5, 8, 16]);

        let avg = schedule.averages();
        assert!((avg.avg_waiting_time - 13.0 / 3.0).abs() < 1e-10);
        assert!((avg.avg_turnaround_time - 29.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_fcfs_positional_arrivals() {
        // Row index used as arrival, as the table input does
        let procs = vec![
            Process::new(1, 5).with_arrival(0),
            Process::new(2, 3).with_arrival(1),
            Process::new(3, 8).with_arrival(2),
        ];
        let schedule = Fcfs.schedule(&procs).unwrap();

        assert_eq!(schedule.waiting_times(), vec![0, 5, 8]);
        assert_eq!(schedule.turnaround_times(), vec![5, 8, 16]);
        // No idle slices: every row "arrives" before the CPU frees up
        assert!(schedule.timeline.iter().all(|s| !s.is_idle()));
        assert_eq!(schedule.timeline.makespan(), 16);
    }

    #[test]
    fn test_fcfs_input_position_is_authoritative() {
        // Arrival field says P2 comes first, but the metrics follow input order
        let procs = vec![
            Process::new(1, 4).with_arrival(5),
            Process::new(2, 2).with_arrival(0),
        ];
        let schedule = Fcfs.schedule(&procs).unwrap();

        assert_eq!(schedule.execution_order, vec![1, 2]);
        assert_eq!(schedule.waiting_times(), vec![0, 4]);
        assert_eq!(schedule.outcome(1).unwrap().release_time, 0);
    }

    #[test]
    fn test_fcfs_timeline_idle_gap() {
        let procs = vec![
            Process::new(1, 2).with_arrival(0),
            Process::new(2, 3).with_arrival(6),
        ];
        let schedule = Fcfs.schedule(&procs).unwrap();
        let slices = schedule.timeline.slices();

        assert_eq!(slices.len(), 3);
        assert_eq!(slices[1].owner, SliceOwner::Idle);
        assert_eq!((slices[1].start, slices[1].end), (2, 6));
        assert_eq!((slices[2].start, slices[2].end), (6, 9));
    }

    #[test]
    fn test_fcfs_dispatches() {
        let procs = vec![Process::new(1, 5), Process::new(2, 3)];
        let schedule = Fcfs.schedule(&procs).unwrap();

        assert_eq!(schedule.dispatches.len(), 2);
        let d = schedule.dispatches[1];
        assert_eq!(d.round, 2);
        assert_eq!(d.start, 5);
        assert_eq!(d.run, 3);
        assert!(d.completes());
    }
}
