//! Step-by-step waiting-time calculations.
//!
//! Produces the worked formula for each process so a presentation layer
//! can show *how* every waiting time was obtained. The steps are plain
//! data; rendering them is up to the caller.
//!
//! | Algorithm | Order shown | Formula |
//! |-----------|-------------|---------|
//! | FCFS, Priority | execution | `WT(Pk) = WT(Pj) + BT(Pj)` |
//! | SJF | execution | `WT(Pk) = WT(Pj) + BT(Pj) + AT(Pj) - AT(Pk)`, floored at 0 |
//! | RR | input | `WT(Pk) = CT - AT - BT` |

use serde::{Deserialize, Serialize};

use crate::metrics::sjf_recurrence_waiting_times;
use crate::models::{Algorithm, Process, ProcessId, ProcessOutcome, Schedule, Ticks};

/// One worked waiting-time calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationStep {
    /// 1-based row number in the order shown.
    pub position: usize,
    /// Process whose waiting time is derived.
    pub process_id: ProcessId,
    /// Formula with values substituted, e.g. `WT(P2) = WT(P1) + BT(P1) = 0 + 5 = 5`.
    pub expression: String,
    /// Resulting waiting time.
    pub waiting_time: Ticks,
}

/// Worked waiting-time calculations for a schedule.
///
/// # Example
/// ```
/// use u_cpusched::explain::calculation_steps;
/// use u_cpusched::models::{Algorithm, Process};
/// use u_cpusched::engine::Simulator;
///
/// let procs = vec![Process::new(1, 5), Process::new(2, 3)];
/// let schedule = Simulator::new().simulate(Algorithm::Fcfs, &procs, None).unwrap();
/// let steps = calculation_steps(&schedule);
/// assert_eq!(steps[1].expression, "WT(P2) = WT(P1) + BT(P1) = 0 + 5 = 5");
/// ```
pub fn calculation_steps(schedule: &Schedule) -> Vec<CalculationStep> {
    match schedule.algorithm {
        Algorithm::Fcfs | Algorithm::Priority => cumulative_steps(schedule),
        Algorithm::Sjf => sjf_steps(schedule),
        Algorithm::RoundRobin => completion_steps(schedule),
    }
}

fn as_process(o: &ProcessOutcome) -> Process {
    Process {
        id: o.id,
        arrival_time: o.arrival_time,
        burst_time: o.burst_time,
        priority: o.priority,
    }
}

fn cumulative_steps(schedule: &Schedule) -> Vec<CalculationStep> {
    let ordered = schedule.outcomes_in_execution_order();
    ordered
        .iter()
        .enumerate()
        .map(|(i, o)| {
            let expression = if i == 0 {
                format!("WT(P{}) = 0", o.id)
            } else {
                let prev = ordered[i - 1];
                format!(
                    "WT(P{}) = WT(P{}) + BT(P{}) = {} + {} = {}",
                    o.id, prev.id, prev.id, prev.waiting_time, prev.burst_time, o.waiting_time
                )
            };
            CalculationStep {
                position: i + 1,
                process_id: o.id,
                expression,
                waiting_time: o.waiting_time,
            }
        })
        .collect()
}

fn sjf_steps(schedule: &Schedule) -> Vec<CalculationStep> {
    let processes: Vec<Process> = schedule
        .outcomes_in_execution_order()
        .into_iter()
        .map(as_process)
        .collect();
    let refs: Vec<&Process> = processes.iter().collect();
    let waits = sjf_recurrence_waiting_times(&refs);

    processes
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let expression = if i == 0 {
                format!("WT(P{}) = 0", p.id)
            } else {
                let prev = &processes[i - 1];
                let raw = waits[i - 1] + prev.burst_time + prev.arrival_time - p.arrival_time;
                let mut text = format!(
                    "WT(P{}) = WT(P{}) + BT(P{}) + AT(P{}) - AT(P{}) = {} + {} + {} - {} = ",
                    p.id,
                    prev.id,
                    prev.id,
                    prev.id,
                    p.id,
                    waits[i - 1],
                    prev.burst_time,
                    prev.arrival_time,
                    p.arrival_time
                );
                if raw < 0 {
                    text.push_str(&format!("max(0, {raw}) = {}", waits[i]));
                } else {
                    text.push_str(&waits[i].to_string());
                }
                text
            };
            CalculationStep {
                position: i + 1,
                process_id: p.id,
                expression,
                waiting_time: waits[i],
            }
        })
        .collect()
}

fn completion_steps(schedule: &Schedule) -> Vec<CalculationStep> {
    schedule
        .outcomes
        .iter()
        .enumerate()
        .map(|(i, o)| CalculationStep {
            position: i + 1,
            process_id: o.id,
            expression: format!(
                "WT(P{}) = CT - AT - BT = {} - {} - {} = {}",
                o.id, o.completion_time, o.arrival_time, o.burst_time, o.waiting_time
            ),
            waiting_time: o.waiting_time,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Simulator;

    fn simulate(algo: Algorithm, procs: &[Process], quantum: Option<i64>) -> Schedule {
        Simulator::new().simulate(algo, procs, quantum).unwrap()
    }

    #[test]
    fn test_fcfs_steps() {
        let procs = vec![Process::new(1, 5), Process::new(2, 3), Process::new(3, 8)];
        let steps = calculation_steps(&simulate(Algorithm::Fcfs, &procs, None));

        let text: Vec<&str> = steps.iter().map(|s| s.expression.as_str()).collect();
        assert_eq!(
            text,
            vec![
                "WT(P1) = 0",
                "WT(P2) = WT(P1) + BT(P1) = 0 + 5 = 5",
                "WT(P3) = WT(P2) + BT(P2) = 5 + 3 = 8",
            ]
        );
    }

    #[test]
    fn test_priority_steps_follow_execution_order() {
        let procs = vec![
            Process::new(1, 10).with_priority(3),
            Process::new(2, 1).with_priority(1),
            Process::new(3, 2).with_priority(4),
            Process::new(4, 1).with_priority(2),
        ];
        let steps = calculation_steps(&simulate(Algorithm::Priority, &procs, None));

        let ids: Vec<u32> = steps.iter().map(|s| s.process_id).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
        assert_eq!(steps[3].expression, "WT(P3) = WT(P1) + BT(P1) = 2 + 10 = 12");
        assert_eq!(steps[3].position, 4);
    }

    #[test]
    fn test_sjf_steps() {
        let procs = vec![
            Process::new(1, 8).with_arrival(0),
            Process::new(2, 4).with_arrival(1),
            Process::new(3, 9).with_arrival(2),
            Process::new(4, 5).with_arrival(3),
        ];
        let steps = calculation_steps(&simulate(Algorithm::Sjf, &procs, None));

        assert_eq!(
            steps[1].expression,
            "WT(P2) = WT(P1) + BT(P1) + AT(P1) - AT(P2) = 0 + 8 + 0 - 1 = 7"
        );
        let waits: Vec<i64> = steps.iter().map(|s| s.waiting_time).collect();
        assert_eq!(waits, vec![0, 7, 9, 15]);
    }

    #[test]
    fn test_sjf_steps_show_clamp() {
        let procs = vec![
            Process::new(1, 3).with_arrival(2),
            Process::new(2, 1).with_arrival(10),
        ];
        let steps = calculation_steps(&simulate(Algorithm::Sjf, &procs, None));
        assert_eq!(
            steps[1].expression,
            "WT(P2) = WT(P1) + BT(P1) + AT(P1) - AT(P2) = 0 + 3 + 2 - 10 = max(0, -5) = 0"
        );
    }

    #[test]
    fn test_rr_steps() {
        let procs = vec![Process::new(1, 10), Process::new(2, 5), Process::new(3, 8)];
        let steps = calculation_steps(&simulate(Algorithm::RoundRobin, &procs, Some(2)));

        assert_eq!(steps[0].expression, "WT(P1) = CT - AT - BT = 23 - 0 - 10 = 13");
        assert_eq!(steps[1].expression, "WT(P2) = CT - AT - BT = 15 - 0 - 5 = 10");
        assert_eq!(steps[2].waiting_time, 13);
    }

    #[test]
    fn test_steps_empty_schedule() {
        assert!(calculation_steps(&Schedule::empty(Algorithm::Sjf)).is_empty());
    }
}
