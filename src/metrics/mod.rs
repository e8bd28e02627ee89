//! Waiting / turnaround metrics and schedule KPIs.
//!
//! # Formulas
//!
//! | Quantity | Definition |
//! |----------|-----------|
//! | Turnaround (TAT) | completion − release |
//! | Waiting (WT) | TAT − burst |
//! | Batch WT (FCFS, Priority) | WT\[0\] = 0, WT\[i\] = WT\[i−1\] + BT\[i−1\] |
//! | SJF recurrence | WT\[i\] = max(0, WT\[i−1\] + BT\[i−1\] + AT\[i−1\] − AT\[i\]) |
//!
//! The SJF recurrence equals `start − arrival` for every non-preemptive
//! run: `WT[i−1] + AT[i−1]` is the previous start, so the bracket is
//! "previous finish − my arrival", and the clamp covers the idle case in
//! which the process starts exactly at its arrival. Policies compute the
//! direct form; the recurrence is kept for explanation output.
//!
//! # Degenerate case
//! Averages over zero processes are defined as `0.0`.

mod kpi;

pub use kpi::ScheduleKpi;

use serde::{Deserialize, Serialize};

use crate::models::{Process, ProcessOutcome, Ticks};

/// Average waiting and turnaround times.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Averages {
    /// Mean waiting time (0.0 when there are no processes).
    pub avg_waiting_time: f64,
    /// Mean turnaround time (0.0 when there are no processes).
    pub avg_turnaround_time: f64,
}

impl Averages {
    /// Computes averages over a set of outcomes.
    pub fn of(outcomes: &[ProcessOutcome]) -> Self {
        if outcomes.is_empty() {
            return Self::default();
        }
        let n = outcomes.len() as f64;
        let total_waiting: f64 = outcomes.iter().map(|o| o.waiting_time as f64).sum();
        let total_turnaround: f64 = outcomes.iter().map(|o| o.turnaround_time as f64).sum();

        Self {
            avg_waiting_time: total_waiting / n,
            avg_turnaround_time: total_turnaround / n,
        }
    }
}

/// Mean of a tick series, `0.0` when empty.
pub fn mean(values: &[Ticks]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64
    }
}

/// Batch waiting times: `WT[0] = 0`, `WT[i] = WT[i-1] + BT[i-1]`.
///
/// `bursts` must be in execution order. The running total saturates at
/// `Ticks::MAX`.
pub fn cumulative_waiting_times(bursts: &[Ticks]) -> Vec<Ticks> {
    let mut waits = Vec::with_capacity(bursts.len());
    let mut acc: Ticks = 0;
    for &bt in bursts {
        waits.push(acc);
        acc = acc.saturating_add(bt);
    }
    waits
}

/// SJF waiting times via the recurrence
/// `WT[i] = max(0, WT[i-1] + BT[i-1] + AT[i-1] - AT[i])`.
///
/// `order` must be the SJF execution order.
///
/// # Example
/// ```
/// use u_cpusched::metrics::sjf_recurrence_waiting_times;
/// use u_cpusched::models::Process;
///
/// let order = [
///     Process::new(1, 8),
///     Process::new(2, 4).with_arrival(1),
///     Process::new(4, 5).with_arrival(3),
///     Process::new(3, 9).with_arrival(2),
/// ];
/// let refs: Vec<&Process> = order.iter().collect();
/// assert_eq!(sjf_recurrence_waiting_times(&refs), vec![0, 7, 9, 15]);
/// ```
pub fn sjf_recurrence_waiting_times(order: &[&Process]) -> Vec<Ticks> {
    let mut waits: Vec<Ticks> = Vec::with_capacity(order.len());
    for (i, p) in order.iter().enumerate() {
        let wt = if i == 0 {
            0
        } else {
            let prev = order[i - 1];
            (waits[i - 1] + prev.burst_time + prev.arrival_time - p.arrival_time).max(0)
        };
        waits.push(wt);
    }
    waits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_averages_basic() {
        let outcomes = vec![
            ProcessOutcome::new(&Process::new(1, 5), 0, 0, 5),
            ProcessOutcome::new(&Process::new(2, 3), 0, 5, 8),
            ProcessOutcome::new(&Process::new(3, 8), 0, 8, 16),
        ];
        let avg = Averages::of(&outcomes);
        // WT 0+5+8 = 13, TAT 5+8+16 = 29
        assert!((avg.avg_waiting_time - 13.0 / 3.0).abs() < 1e-10);
        assert!((avg.avg_turnaround_time - 29.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_averages_empty_is_zero() {
        let avg = Averages::of(&[]);
        assert_eq!(avg.avg_waiting_time, 0.0);
        assert_eq!(avg.avg_turnaround_time, 0.0);
        assert!(!avg.avg_waiting_time.is_nan());
    }

    #[test]
    fn test_averages_near_tick_limit() {
        let p = Process::new(1, 1);
        let outcomes = vec![
            ProcessOutcome::new(&p, 0, Ticks::MAX - 1, Ticks::MAX),
            ProcessOutcome::new(&p, 0, Ticks::MAX - 1, Ticks::MAX),
            ProcessOutcome::new(&p, 0, Ticks::MAX - 1, Ticks::MAX),
        ];
        let avg = Averages::of(&outcomes);
        assert!((avg.avg_turnaround_time / Ticks::MAX as f64 - 1.0).abs() < 1e-10);
        assert!((mean(&[Ticks::MAX, Ticks::MAX]) / Ticks::MAX as f64 - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_cumulative_waiting_times_saturate() {
        let waits = cumulative_waiting_times(&[Ticks::MAX, Ticks::MAX, 1]);
        assert_eq!(waits, vec![0, Ticks::MAX, Ticks::MAX]);
    }

    #[test]
    fn test_mean() {
        assert!((mean(&[1, 2, 3, 4]) - 2.5).abs() < 1e-10);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_cumulative_waiting_times() {
        assert_eq!(cumulative_waiting_times(&[5, 3, 8]), vec![0, 5, 8]);
        assert_eq!(cumulative_waiting_times(&[1, 1, 2, 10]), vec![0, 1, 2, 4]);
        assert!(cumulative_waiting_times(&[]).is_empty());
    }

    #[test]
    fn test_sjf_recurrence_clamps_after_idle() {
        // P2 arrives long after P1 finishes → starts on arrival, waits 0
        let p1 = Process::new(1, 3).with_arrival(2);
        let p2 = Process::new(2, 1).with_arrival(10);
        assert_eq!(sjf_recurrence_waiting_times(&[&p1, &p2]), vec![0, 0]);
    }

    #[test]
    fn test_sjf_recurrence_first_is_zero_even_if_late() {
        let p1 = Process::new(1, 3).with_arrival(4);
        assert_eq!(sjf_recurrence_waiting_times(&[&p1]), vec![0]);
    }
}
