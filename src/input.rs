//! Lenient wire input.
//!
//! Table-driven front ends send loosely typed rows: numbers as strings,
//! blanks, or nothing at all. This module turns such rows into valid
//! [`Process`] values by substituting safe defaults instead of failing:
//!
//! | Field | Accepted | Default when missing or invalid |
//! |-------|----------|--------------------------------|
//! | `id` | ignored | 1-based row position |
//! | `arrival_time` | integer >= 0 | 0 |
//! | `burst_time` | integer >= 1 | 1 |
//! | `priority` | integer >= 1 | 1-based row position |
//! | `quantum` | integer >= 1 | 1 |
//!
//! Every substitution is recorded and logged at `warn`. Callers that want
//! strict behaviour can build [`Process`] values directly; the policies
//! validate them and reject bad input.

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{Process, ProcessId, Quantum};

/// A process row as received on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawProcess {
    /// Client-side id (replaced by the row position).
    #[serde(default)]
    pub id: Option<Value>,
    /// Arrival time, any JSON shape.
    #[serde(default)]
    pub arrival_time: Option<Value>,
    /// Burst time, any JSON shape.
    #[serde(default)]
    pub burst_time: Option<Value>,
    /// Priority, any JSON shape.
    #[serde(default)]
    pub priority: Option<Value>,
}

/// A simulation request as received on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRequest {
    /// Algorithm identifier, checked later.
    pub algorithm: String,
    /// Process rows.
    pub processes: Vec<RawProcess>,
    /// Round-Robin quantum, any JSON shape.
    #[serde(default)]
    pub quantum: Option<Value>,
}

/// A default that replaced a missing or invalid field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Substitution {
    /// Affected process (`None` for request-level fields).
    pub process_id: Option<ProcessId>,
    /// Field name.
    pub field: &'static str,
    /// Value as received, if any.
    pub supplied: Option<String>,
    /// Value used instead.
    pub used: i64,
}

/// Processes after default substitution.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    /// Valid processes, ids `1..=n` in row order.
    pub processes: Vec<Process>,
    /// Substitutions applied, in row order.
    pub substitutions: Vec<Substitution>,
}

/// Reads an integer the way a form field is parsed: JSON integers as-is,
/// floats truncated, strings by their leading (optionally signed) digits.
///
/// Returns `None` for anything without a usable number.
pub fn lenient_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => parse_leading_int(s),
        _ => None,
    }
}

fn parse_leading_int(s: &str) -> Option<i64> {
    let trimmed = s.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|v| sign * v)
}

fn describe(value: Option<&Value>) -> Option<String> {
    value.map(|v| match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

/// Resolves one numeric field, recording a substitution when the value is
/// absent, unparsable or below `min`.
fn resolve(
    value: Option<&Value>,
    min: i64,
    default: i64,
    process_id: Option<ProcessId>,
    field: &'static str,
    substitutions: &mut Vec<Substitution>,
) -> i64 {
    match value.and_then(lenient_int) {
        Some(v) if v >= min => v,
        _ => {
            let sub = Substitution {
                process_id,
                field,
                supplied: describe(value),
                used: default,
            };
            warn!(
                "defaulting {field} of {} from {:?} to {default}",
                process_id.map_or_else(|| "request".to_string(), |id| format!("P{id}")),
                sub.supplied
            );
            substitutions.push(sub);
            default
        }
    }
}

/// Converts wire rows into valid processes.
///
/// Ids are reassigned to the 1-based row position. A missing `priority`
/// stays `None` (ordering falls back to the position); a present but
/// invalid one is replaced by the position.
pub fn normalize(rows: &[RawProcess]) -> Normalized {
    let mut out = Normalized::default();

    for (i, row) in rows.iter().enumerate() {
        let id = i as ProcessId + 1;
        let position = i as i64 + 1;
        let subs = &mut out.substitutions;

        let arrival = resolve(row.arrival_time.as_ref(), 0, 0, Some(id), "arrival_time", subs);
        let burst = resolve(row.burst_time.as_ref(), 1, 1, Some(id), "burst_time", subs);

        let mut process = Process::new(id, burst).with_arrival(arrival);
        if let Some(raw_priority) = row.priority.as_ref().filter(|v| !v.is_null()) {
            let priority = resolve(Some(raw_priority), 1, position, Some(id), "priority", subs);
            process = process.with_priority(priority);
        }
        out.processes.push(process);
    }

    out
}

/// Resolves the request quantum; absent or invalid becomes 1.
///
/// A substitution is only reported when a value was supplied.
pub fn normalize_quantum(value: Option<&Value>) -> (Quantum, Option<Substitution>) {
    let supplied = value.filter(|v| !v.is_null());
    match supplied {
        None => (Quantum::DEFAULT, None),
        Some(v) => {
            let mut subs = Vec::new();
            let q = resolve(Some(v), 1, Quantum::DEFAULT.ticks(), None, "quantum", &mut subs);
            (Quantum::clamped(q), subs.pop())
        }
    }
}
