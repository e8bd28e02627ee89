//! Round-Robin (preemptive, fixed quantum).
//!
//! # Algorithm
//!
//! 1. Backlog: process indices sorted by `(arrival_time, input position)`.
//!    Ready: FIFO of admitted processes. Each index lives in exactly one.
//! 2. Admit every backlog entry with `arrival_time <= clock`.
//! 3. If ready is empty, idle until the next backlog arrival and admit.
//! 4. Run the head for `min(quantum, remaining)` ticks.
//! 5. Admit arrivals up to the new clock, *then* re-enqueue the preempted
//!    process if it still has work left.
//!
//! Completion is the end of the last slice; `TAT = CT - AT`,
//! `WT = TAT - BT`.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3.4

use std::collections::VecDeque;

use log::{debug, trace};

use super::{check_input, iteration_budget, SchedulingPolicy};
use crate::error::SimulationError;
use crate::models::{Algorithm, Dispatch, Process, ProcessOutcome, Quantum, Schedule, Ticks};

/// Round-Robin policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundRobin {
    quantum: Quantum,
}

impl RoundRobin {
    /// Creates a Round-Robin policy with the given quantum.
    pub fn new(quantum: Quantum) -> Self {
        Self { quantum }
    }

    /// Quantum in effect.
    pub fn quantum(&self) -> Quantum {
        self.quantum
    }
}

/// Moves every arrived backlog entry to the tail of the ready queue.
fn admit(
    processes: &[Process],
    backlog: &mut VecDeque<usize>,
    ready: &mut VecDeque<usize>,
    clock: Ticks,
) {
    while let Some(&next) = backlog.front() {
        if !processes[next].has_arrived(clock) {
            break;
        }
        backlog.pop_front();
        ready.push_back(next);
    }
}

impl SchedulingPolicy for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::RoundRobin
    }

    fn schedule(&self, processes: &[Process]) -> Result<Schedule, SimulationError> {
        check_input(processes)?;
        debug!(
            "RR: scheduling {} processes, quantum {}",
            processes.len(),
            self.quantum
        );

        let n = processes.len();
        let quantum = self.quantum.ticks();
        let budget = iteration_budget(processes);

        let mut schedule = Schedule::empty(Algorithm::RoundRobin);
        schedule.quantum = Some(self.quantum);

        let mut remaining: Vec<Ticks> = processes.iter().map(|p| p.burst_time).collect();
        let mut first_start: Vec<Option<Ticks>> = vec![None; n];
        let mut completion: Vec<Ticks> = vec![0; n];

        let mut arrivals: Vec<usize> = (0..n).collect();
        arrivals.sort_by_key(|&i| processes[i].arrival_time);
        let mut backlog: VecDeque<usize> = arrivals.into();
        let mut ready: VecDeque<usize> = VecDeque::with_capacity(n);

        let mut clock: Ticks = 0;
        let mut iterations = 0;
        admit(processes, &mut backlog, &mut ready, clock);

        while !ready.is_empty() || !backlog.is_empty() {
            iterations += 1;
            if iterations > budget {
                return Err(SimulationError::IterationLimit {
                    algorithm: self.name(),
                    limit: budget,
                });
            }

            let Some(idx) = ready.pop_front() else {
                if let Some(&next) = backlog.front() {
                    let arrival = processes[next].arrival_time;
                    schedule.timeline.push_idle(clock, arrival);
                    clock = clock.max(arrival);
                    admit(processes, &mut backlog, &mut ready, clock);
                }
                continue;
            };

            let p = &processes[idx];
            let run = quantum.min(remaining[idx]);
            let before = remaining[idx];
            trace!("RR: P{} runs [{clock}, {}) remaining {before}", p.id, clock + run);

            if first_start[idx].is_none() {
                first_start[idx] = Some(clock);
                schedule.execution_order.push(p.id);
            }
            schedule.timeline.push_run(p.id, clock, clock + run);
            schedule.dispatches.push(Dispatch {
                round: schedule.dispatches.len() + 1,
                process_id: p.id,
                start: clock,
                run,
                remaining_before: before,
                remaining_after: before - run,
            });

            remaining[idx] -= run;
            clock += run;

            // Newcomers queue ahead of the preempted process
            admit(processes, &mut backlog, &mut ready, clock);

            if remaining[idx] > 0 {
                ready.push_back(idx);
            } else {
                completion[idx] = clock;
            }
        }

        schedule.outcomes = processes
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let start = first_start[i].unwrap_or(completion[i]);
                ProcessOutcome::new(p, p.arrival_time, start, completion[i])
            })
            .collect();

        Ok(schedule)
    }

    fn description(&self) -> &'static str {
        "Round-Robin (preemptive, fixed quantum)"
    }
}
