//! JSON request handling.
//!
//! Maps the simulator onto a set of JSON endpoints. Every endpoint takes
//! the same lenient request body and returns a projection of the result:
//!
//! | Endpoint | Response |
//! |----------|----------|
//! | `calculate` | `{ processes, avg_waiting_time, avg_turnaround_time }` |
//! | `calculate_waiting_time` | `{ waiting_times: [...] }` |
//! | `calculate_turnaround_time` | `{ turnaround_times: [...] }` |
//! | `calculate_avg_waiting_time` | `{ avg_waiting_time }` |
//! | `calculate_avg_turnaround_time` | `{ avg_turnaround_time }` |
//! | `timeline` | `[{ id, start, end }, ...]` |
//! | `explain` | `{ steps, dispatches, gantt }` |
//!
//! Per-process arrays are ordered by process id. Failures never panic and
//! are reported as `{ "error": "<message>" }`.
//!
//! No transport is bundled; any HTTP layer can route a path to
//! [`Endpoint::from_path`] and forward the body to [`handle`].

use log::debug;
use serde_json::{json, Value};

use crate::engine::{SimulationReport, SimulationRequest, Simulator};
use crate::error::SimulationError;
use crate::explain::calculation_steps;

/// Available endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Full per-process report.
    Calculate,
    /// Waiting times only.
    WaitingTimes,
    /// Turnaround times only.
    TurnaroundTimes,
    /// Average waiting time only.
    AvgWaitingTime,
    /// Average turnaround time only.
    AvgTurnaroundTime,
    /// Gantt slices.
    Timeline,
    /// Worked calculations and dispatch rows.
    Explain,
}

impl Endpoint {
    /// Every endpoint.
    pub const ALL: [Endpoint; 7] = [
        Endpoint::Calculate,
        Endpoint::WaitingTimes,
        Endpoint::TurnaroundTimes,
        Endpoint::AvgWaitingTime,
        Endpoint::AvgTurnaroundTime,
        Endpoint::Timeline,
        Endpoint::Explain,
    ];

    /// Route name.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Calculate => "calculate",
            Endpoint::WaitingTimes => "calculate_waiting_time",
            Endpoint::TurnaroundTimes => "calculate_turnaround_time",
            Endpoint::AvgWaitingTime => "calculate_avg_waiting_time",
            Endpoint::AvgTurnaroundTime => "calculate_avg_turnaround_time",
            Endpoint::Timeline => "timeline",
            Endpoint::Explain => "explain",
        }
    }

    /// Looks up an endpoint by route name; leading `/` and an `api/`
    /// prefix are ignored.
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_matches('/');
        let name = trimmed.strip_prefix("api/").unwrap_or(trimmed);
        Self::ALL.into_iter().find(|e| e.path() == name)
    }
}

/// Handles one request body, returning the JSON response.
///
/// # Example
/// ```
/// use u_cpusched::api::{handle, Endpoint};
/// use u_cpusched::engine::Simulator;
///
/// let body = r#"{"algorithm":"fcfs","processes":[{"burst_time":5},{"burst_time":3}]}"#;
/// let response = handle(&Simulator::new(), Endpoint::WaitingTimes, body);
/// assert_eq!(response["waiting_times"], serde_json::json!([0, 5]));
/// ```
pub fn handle(simulator: &Simulator, endpoint: Endpoint, body: &str) -> Value {
    match respond(simulator, endpoint, body) {
        Ok(value) => value,
        Err(e) => {
            debug!("{}: {e}", endpoint.path());
            error_body(&e)
        }
    }
}

/// Builds the error payload for a failure.
pub fn error_body(error: &SimulationError) -> Value {
    json!({ "error": error.to_string() })
}

fn respond(
    simulator: &Simulator,
    endpoint: Endpoint,
    body: &str,
) -> Result<Value, SimulationError> {
    let (request, substitutions) = SimulationRequest::from_json(body)?;
    if !substitutions.is_empty() {
        debug!(
            "{}: {} field(s) defaulted",
            endpoint.path(),
            substitutions.len()
        );
    }

    let schedule = simulator.run(&request)?;

    let value = match endpoint {
        Endpoint::Calculate => serde_json::to_value(SimulationReport::from_schedule(&schedule))?,
        Endpoint::WaitingTimes => {
            let report = SimulationReport::from_schedule(&schedule);
            json!({ "waiting_times": report.waiting_times() })
        }
        Endpoint::TurnaroundTimes => {
            let report = SimulationReport::from_schedule(&schedule);
            json!({ "turnaround_times": report.turnaround_times() })
        }
        Endpoint::AvgWaitingTime => {
            json!({ "avg_waiting_time": schedule.averages().avg_waiting_time })
        }
        Endpoint::AvgTurnaroundTime => {
            json!({ "avg_turnaround_time": schedule.averages().avg_turnaround_time })
        }
        Endpoint::Timeline => serde_json::to_value(&schedule.timeline)?,
        Endpoint::Explain => {
            let steps = serde_json::to_value(calculation_steps(&schedule))?;
            let dispatches = serde_json::to_value(&schedule.dispatches)?;
            json!({
                "steps": steps,
                "dispatches": dispatches,
                "gantt": schedule.timeline.to_string(),
            })
        }
    };
    Ok(value)
}
