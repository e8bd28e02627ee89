//! Algorithm selector and Round-Robin quantum.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// The four supported scheduling algorithms.
///
/// Wire names: `"fcfs"`, `"sjf"`, `"priority"`, `"rr"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// First-Come-First-Served.
    #[serde(rename = "fcfs")]
    Fcfs,
    /// Shortest-Job-First, non-preemptive.
    #[serde(rename = "sjf")]
    Sjf,
    /// Priority, non-preemptive (lower value first).
    #[serde(rename = "priority")]
    Priority,
    /// Round-Robin with a fixed quantum.
    #[serde(rename = "rr")]
    RoundRobin,
}

impl Algorithm {
    /// All algorithms in canonical order.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::Priority,
        Algorithm::RoundRobin,
    ];

    /// Wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "fcfs",
            Algorithm::Sjf => "sjf",
            Algorithm::Priority => "priority",
            Algorithm::RoundRobin => "rr",
        }
    }

    /// Whether the algorithm can interrupt a running process.
    pub fn is_preemptive(&self) -> bool {
        matches!(self, Algorithm::RoundRobin)
    }

    /// Whether waiting time is measured from each process's arrival
    /// rather than from t=0.
    pub fn honors_arrival(&self) -> bool {
        matches!(self, Algorithm::Sjf | Algorithm::RoundRobin)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fcfs" => Ok(Algorithm::Fcfs),
            "sjf" => Ok(Algorithm::Sjf),
            "priority" => Ok(Algorithm::Priority),
            "rr" | "round_robin" => Ok(Algorithm::RoundRobin),
            _ => Err(SimulationError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Round-Robin time slice, always >= 1.
///
/// Serialized as a bare integer; deserialization goes through
/// [`Quantum::clamped`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub struct Quantum(u32);

impl Quantum {
    /// Quantum used when none (or an invalid one) is supplied.
    pub const DEFAULT: Quantum = Quantum(1);

    /// Creates a quantum, clamping non-positive or oversized values.
    ///
    /// Values `<= 0` become 1.
    pub fn clamped(value: i64) -> Self {
        if value < 1 {
            Self::DEFAULT
        } else {
            Quantum(value.min(u32::MAX as i64) as u32)
        }
    }

    /// Quantum length in ticks.
    #[inline]
    pub fn ticks(&self) -> i64 {
        self.0 as i64
    }
}

impl From<i64> for Quantum {
    fn from(value: i64) -> Self {
        Quantum::clamped(value)
    }
}

impl From<Quantum> for i64 {
    fn from(quantum: Quantum) -> Self {
        quantum.ticks()
    }
}

impl Default for Quantum {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Quantum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
