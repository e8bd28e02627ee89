//! Schedule quality metrics (KPIs).
//!
//! Computes standard CPU-scheduling performance indicators from a
//! completed schedule.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | End of the last timeline slice |
//! | Busy / Idle time | Ticks with / without a running process |
//! | CPU Utilization | busy / makespan |
//! | Throughput | processes / makespan |
//! | Avg Waiting / Turnaround | Means over all processes |
//! | Avg Response | Mean of first grant − release |
//! | Max Waiting | Largest single waiting time |
//! | Context Switches | Changes of running process |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};

use super::{mean, Averages};
use crate::models::{Schedule, Ticks};

/// Schedule performance indicators.
///
/// All time values are in ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleKpi {
    /// End of the last timeline slice.
    pub makespan: Ticks,
    /// Ticks during which some process ran.
    pub busy_time: Ticks,
    /// Ticks during which the CPU idled.
    pub idle_time: Ticks,
    /// Fraction of the makespan spent busy (0.0..1.0).
    pub cpu_utilization: f64,
    /// Completed processes per tick.
    pub throughput: f64,
    /// Mean waiting time.
    pub avg_waiting_time: f64,
    /// Mean turnaround time.
    pub avg_turnaround_time: f64,
    /// Mean response time.
    pub avg_response_time: f64,
    /// Largest waiting time of any process.
    pub max_waiting_time: Ticks,
    /// Number of process-to-process switches on the timeline.
    pub context_switches: usize,
}

impl ScheduleKpi {
    /// Computes KPIs from a schedule.
    pub fn calculate(schedule: &Schedule) -> Self {
        let timeline = &schedule.timeline;
        let makespan = timeline.makespan();
        let busy_time = timeline.busy_time();
        let idle_time = timeline.idle_time();

        let (cpu_utilization, throughput) = if makespan <= 0 {
            (0.0, 0.0)
        } else {
            (
                busy_time as f64 / makespan as f64,
                schedule.process_count() as f64 / makespan as f64,
            )
        };

        let Averages {
            avg_waiting_time,
            avg_turnaround_time,
        } = schedule.averages();

        let responses: Vec<Ticks> = schedule.outcomes.iter().map(|o| o.response_time).collect();
        let max_waiting_time = schedule
            .outcomes
            .iter()
            .map(|o| o.waiting_time)
            .max()
            .unwrap_or(0);

        Self {
            makespan,
            busy_time,
            idle_time,
            cpu_utilization,
            throughput,
            avg_waiting_time,
            avg_turnaround_time,
            avg_response_time: mean(&responses),
            max_waiting_time,
            context_switches: timeline.context_switches(),
        }
    }

    /// Whether the schedule meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_avg_waiting: f64, min_utilization: f64) -> bool {
        self.avg_waiting_time <= max_avg_waiting && self.cpu_utilization >= min_utilization
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Algorithm, Process, ProcessOutcome, Timeline};

    fn make_schedule(
        slices: &[(Option<u32>, i64, i64)],
        outcomes: Vec<ProcessOutcome>,
    ) -> Schedule {
        let mut timeline = Timeline::new();
        for &(owner, start, end) in slices {
            match owner {
                Some(id) => timeline.push_run(id, start, end),
                None => timeline.push_idle(start, end),
            }
        }
        let mut schedule = Schedule::empty(Algorithm::Sjf);
        schedule.execution_order = outcomes.iter().map(|o| o.id).collect();
        schedule.timeline = timeline;
        schedule.outcomes = outcomes;
        schedule
    }

    #[test]
    fn test_kpi_basic() {
        let p1 = Process::new(1, 4);
        let p2 = Process::new(2, 2);
        let schedule = make_schedule(
            &[(Some(1), 0, 4), (Some(2), 4, 6)],
            vec![
                ProcessOutcome::new(&p1, 0, 0, 4),
                ProcessOutcome::new(&p2, 0, 4, 6),
            ],
        );

        let kpi = ScheduleKpi::calculate(&schedule);
        assert_eq!(kpi.makespan, 6);
        assert_eq!(kpi.busy_time, 6);
        assert_eq!(kpi.idle_time, 0);
        assert!((kpi.cpu_utilization - 1.0).abs() < 1e-10);
        assert!((kpi.throughput - 2.0 / 6.0).abs() < 1e-10);
        assert!((kpi.avg_waiting_time - 2.0).abs() < 1e-10);
        assert!((kpi.avg_turnaround_time - 5.0).abs() < 1e-10);
        assert_eq!(kpi.max_waiting_time, 4);
        assert_eq!(kpi.context_switches, 1);
    }

    #[test]
    fn test_kpi_idle_utilization() {
        let p1 = Process::new(1, 2).with_arrival(2);
        let schedule = make_schedule(
            &[(None, 0, 2), (Some(1), 2, 4)],
            vec![ProcessOutcome::new(&p1, 2, 2, 4)],
        );

        let kpi = ScheduleKpi::calculate(&schedule);
        assert_eq!(kpi.idle_time, 2);
        assert!((kpi.cpu_utilization - 0.5).abs() < 1e-10);
        assert!((kpi.avg_response_time - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = ScheduleKpi::calculate(&Schedule::empty(Algorithm::Fcfs));
        assert_eq!(kpi.makespan, 0);
        assert_eq!(kpi.cpu_utilization, 0.0);
        assert_eq!(kpi.throughput, 0.0);
        assert_eq!(kpi.avg_waiting_time, 0.0);
        assert_eq!(kpi.max_waiting_time, 0);
        assert_eq!(kpi.context_switches, 0);
    }

    #[test]
    fn test_meets_thresholds() {
        let p1 = Process::new(1, 2).with_arrival(2);
        let schedule = make_schedule(
            &[(None, 0, 2), (Some(1), 2, 4)],
            vec![ProcessOutcome::new(&p1, 2, 2, 4)],
        );

        let kpi = ScheduleKpi::calculate(&schedule);
        assert!(kpi.meets_thresholds(0.0, 0.5));
        assert!(!kpi.meets_thresholds(0.0, 0.6));
    }
}
