//! Shortest-Job-First (non-preemptive).
//!
//! # Algorithm
//!
//! 1. Keep a pool of unscheduled process indices in input order; clock = 0.
//! 2. Among pool entries with `arrival_time <= clock`, pick the smallest
//!    `burst_time`. Ties go to the first entry in pool order.
//! 3. If nothing has arrived, idle until the earliest pool arrival.
//! 4. Run the pick to completion; waiting time is `start - arrival`.
//!
//! # Complexity
//! O(n²): each selection scans the pool.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3.2

use log::{debug, trace};

use super::{check_input, iteration_budget, SchedulingPolicy};
use crate::error::SimulationError;
use crate::models::{Algorithm, Dispatch, Process, ProcessOutcome, Schedule};

/// Non-preemptive Shortest-Job-First policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestJobFirst;

impl SchedulingPolicy for ShortestJobFirst {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Sjf
    }

    fn schedule(&self, processes: &[Process]) -> Result<Schedule, SimulationError> {
        check_input(processes)?;
        debug!("SJF: scheduling {} processes", processes.len());

        let budget = iteration_budget(processes);
        let mut schedule = Schedule::empty(Algorithm::Sjf);
        let mut outcomes: Vec<Option<ProcessOutcome>> = vec![None; processes.len()];
        let mut pool: Vec<usize> = (0..processes.len()).collect();
        let mut clock = 0;
        let mut iterations = 0;

        while !pool.is_empty() {
            iterations += 1;
            if iterations > budget {
                return Err(SimulationError::IterationLimit {
                    algorithm: self.name(),
                    limit: budget,
                });
            }

            let pick = pool
                .iter()
                .enumerate()
                .filter(|&(_, &i)| processes[i].has_arrived(clock))
                .min_by_key(|&(_, &i)| processes[i].burst_time)
                .map(|(pos, _)| pos);

            let Some(pos) = pick else {
                // Nothing ready: jump to the next arrival
                if let Some(next) = pool.iter().map(|&i| processes[i].arrival_time).min() {
                    schedule.timeline.push_idle(clock, next);
                    clock = clock.max(next);
                }
                continue;
            };

            let idx = pool.remove(pos);
            let p = &processes[idx];
            let start = clock;
            let end = start + p.burst_time;
            trace!("SJF: P{} runs [{start}, {end})", p.id);

            schedule.execution_order.push(p.id);
            schedule.timeline.push_run(p.id, start, end);
            schedule.dispatches.push(Dispatch {
                round: schedule.dispatches.len() + 1,
                process_id: p.id,
                start,
                run: p.burst_time,
                remaining_before: p.burst_time,
                remaining_after: 0,
            });
            outcomes[idx] = Some(ProcessOutcome::new(p, p.arrival_time, start, end));
            clock = end;
        }

        schedule.outcomes = outcomes.into_iter().flatten().collect();
        Ok(schedule)
    }

    fn description(&self) -> &'static str {
        "Shortest-Job-First (non-preemptive)"
    }
}
