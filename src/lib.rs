//! CPU scheduling simulator.
//!
//! Simulates classic single-CPU scheduling algorithms over a process set
//! and reports per-process waiting / turnaround times, their averages and
//! a Gantt timeline.
//!
//! | Algorithm | Preemptive | Arrival-aware |
//! |-----------|------------|---------------|
//! | FCFS | No | Timeline only |
//! | SJF | No | Yes |
//! | Priority | No | No |
//! | Round-Robin | Yes (quantum) | Yes |
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `Algorithm`, `Quantum`,
//!   `Schedule`, `Timeline`, `Dispatch`, `ProcessOutcome`
//! - **`policies`**: One `SchedulingPolicy` per algorithm
//! - **`metrics`**: Averages, waiting-time recurrences and `ScheduleKpi`
//! - **`engine`**: `Simulator` front end and request / report types
//! - **`explain`**: Worked waiting-time calculations
//! - **`input`**: Lenient wire-input normalization
//! - **`api`**: JSON endpoint handling
//! - **`validation`**: Strict input checks
//! - **`workload`**: Seeded random process sets
//!
//! # Example
//!
//! ```
//! use u_cpusched::{Algorithm, Process, Simulator};
//!
//! let procs = vec![Process::new(1, 5), Process::new(2, 3), Process::new(3, 8)];
//! let schedule = Simulator::new().simulate(Algorithm::Fcfs, &procs, None).unwrap();
//! assert_eq!(schedule.waiting_times(), vec![0, 5, 8]);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod api;
pub mod engine;
pub mod error;
pub mod explain;
pub mod input;
pub mod metrics;
pub mod models;
pub mod policies;
pub mod validation;
pub mod workload;

pub use engine::{SimulationReport, SimulationRequest, Simulator};
pub use error::SimulationError;
pub use models::{Algorithm, Process, Quantum, Schedule};
