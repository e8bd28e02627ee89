//! Simulation domain models.
//!
//! Provides the data types shared by every scheduling policy: the input
//! [`Process`], the [`Algorithm`] selector, and the [`Schedule`] a policy
//! returns (timeline, dispatches and per-process outcomes).
//!
//! | Type | Role |
//! |------|------|
//! | Process | Input: id, arrival, burst, priority |
//! | Schedule | Output of one policy run |
//! | Timeline | Gantt slices, idle gaps included |
//! | Dispatch | One CPU grant (per-round table row) |
//! | ProcessOutcome | Waiting / turnaround / completion per process |

mod algorithm;
mod outcome;
mod process;
mod schedule;
mod timeline;

pub use algorithm::{Algorithm, Quantum};
pub use outcome::ProcessOutcome;
pub use process::{total_burst, Process, ProcessId, Ticks};
pub use schedule::Schedule;
pub use timeline::{Dispatch, SliceOwner, Timeline, TimelineSlice, IDLE_LABEL};
