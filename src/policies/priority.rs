//! Priority scheduling (non-preemptive, lower value first).
//!
//! Execution order is a stable ascending sort on the effective priority;
//! arrival times play no part. A missing priority falls back to the
//! 1-based input position. Waits accumulate as `WT[i] = WT[i-1] + BT[i-1]`.

use log::debug;

use super::{batch_schedule, check_input, SchedulingPolicy};
use crate::error::SimulationError;
use crate::models::{Algorithm, Process, Schedule};

/// Non-preemptive priority policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityScheduling;

impl SchedulingPolicy for PriorityScheduling {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Priority
    }

    fn schedule(&self, processes: &[Process]) -> Result<Schedule, SimulationError> {
        check_input(processes)?;
        debug!("PRIORITY: scheduling {} processes", processes.len());

        let mut order: Vec<usize> = (0..processes.len()).collect();
        order.sort_by_key(|&i| processes[i].effective_priority(i));

        Ok(batch_schedule(Algorithm::Priority, processes, &order))
    }

    fn description(&self) -> &'static str {
        "Priority (non-preemptive, lower value first)"
    }
}
