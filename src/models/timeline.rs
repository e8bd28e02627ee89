//! Execution timeline (Gantt chart) model.
//!
//! A timeline is the ordered list of CPU occupancy intervals produced by a
//! simulation. Each slice is owned either by a process or by the idle
//! marker. Slices are contiguous, non-overlapping and start at t=0.
//!
//! Alongside the timeline, every CPU grant is recorded as a [`Dispatch`],
//! which carries the remaining work before and after the grant.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use super::{ProcessId, Ticks};

/// Label used for idle slices on the wire and in text output.
pub const IDLE_LABEL: &str = "Idle";

/// Who occupies the CPU during a slice.
///
/// Serialized as the bare process id, or the string `"Idle"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliceOwner {
    /// A process is running.
    Process(ProcessId),
    /// No process is eligible.
    Idle,
}

impl SliceOwner {
    /// The running process, if any.
    pub fn process_id(&self) -> Option<ProcessId> {
        match self {
            SliceOwner::Process(id) => Some(*id),
            SliceOwner::Idle => None,
        }
    }
}

impl fmt::Display for SliceOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SliceOwner::Process(id) => write!(f, "P{id}"),
            SliceOwner::Idle => f.write_str(IDLE_LABEL),
        }
    }
}

impl Serialize for SliceOwner {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SliceOwner::Process(id) => serializer.serialize_u32(*id),
            SliceOwner::Idle => serializer.serialize_str(IDLE_LABEL),
        }
    }
}

impl<'de> Deserialize<'de> for SliceOwner {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Id(ProcessId),
            Label(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Id(id) => Ok(SliceOwner::Process(id)),
            Raw::Label(label) if label == IDLE_LABEL => Ok(SliceOwner::Idle),
            Raw::Label(other) => Err(de::Error::custom(format!(
                "expected process id or \"{IDLE_LABEL}\", got \"{other}\""
            ))),
        }
    }
}

/// One contiguous interval of CPU occupancy: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineSlice {
    /// Process id or idle marker.
    #[serde(rename = "id")]
    pub owner: SliceOwner,
    /// Start tick (inclusive).
    pub start: Ticks,
    /// End tick (exclusive).
    pub end: Ticks,
}

impl TimelineSlice {
    /// Creates a slice for a running process.
    pub fn run(id: ProcessId, start: Ticks, end: Ticks) -> Self {
        Self {
            owner: SliceOwner::Process(id),
            start,
            end,
        }
    }

    /// Creates an idle slice.
    pub fn idle(start: Ticks, end: Ticks) -> Self {
        Self {
            owner: SliceOwner::Idle,
            start,
            end,
        }
    }

    /// Length of the slice in ticks.
    #[inline]
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }

    /// Whether this is an idle slice.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.owner == SliceOwner::Idle
    }
}

/// Ordered sequence of timeline slices for one simulation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    slices: Vec<TimelineSlice>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a process slice. Zero-length runs are dropped.
    pub fn push_run(&mut self, id: ProcessId, start: Ticks, end: Ticks) {
        if end > start {
            self.slices.push(TimelineSlice::run(id, start, end));
        }
    }

    /// Appends an idle slice. Zero-length gaps are dropped.
    pub fn push_idle(&mut self, start: Ticks, end: Ticks) {
        if end > start {
            self.slices.push(TimelineSlice::idle(start, end));
        }
    }

    /// All slices in time order.
    pub fn slices(&self) -> &[TimelineSlice] {
        &self.slices
    }

    /// Iterates slices in time order.
    pub fn iter(&self) -> std::slice::Iter<'_, TimelineSlice> {
        self.slices.iter()
    }

    /// Number of slices.
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    /// Whether the timeline has no slices.
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Start of the first slice (0 for an empty timeline).
    pub fn start_time(&self) -> Ticks {
        self.slices.first().map(|s| s.start).unwrap_or(0)
    }

    /// End of the last slice (0 for an empty timeline).
    pub fn makespan(&self) -> Ticks {
        self.slices.last().map(|s| s.end).unwrap_or(0)
    }

    /// Slices owned by a given process.
    pub fn slices_for(&self, id: ProcessId) -> Vec<&TimelineSlice> {
        self.slices
            .iter()
            .filter(|s| s.owner == SliceOwner::Process(id))
            .collect()
    }

    /// Total ticks a process spent on the CPU.
    pub fn run_time_of(&self, id: ProcessId) -> Ticks {
        self.slices_for(id).iter().map(|s| s.duration()).sum()
    }

    /// End of the process's last slice.
    pub fn completion_time(&self, id: ProcessId) -> Option<Ticks> {
        self.slices_for(id).iter().map(|s| s.end).max()
    }

    /// Ticks spent running any process.
    pub fn busy_time(&self) -> Ticks {
        self.slices
            .iter()
            .filter(|s| !s.is_idle())
            .map(|s| s.duration())
            .sum()
    }

    /// Ticks spent idle.
    pub fn idle_time(&self) -> Ticks {
        self.slices
            .iter()
            .filter(|s| s.is_idle())
            .map(|s| s.duration())
            .sum()
    }

    /// Whether slices are positive-length, time-ordered and gap-free.
    pub fn is_contiguous(&self) -> bool {
        self.slices.iter().all(|s| s.end > s.start)
            && self.slices.windows(2).all(|w| w[0].end == w[1].start)
    }

    /// Number of times the CPU switches from one process to another.
    ///
    /// Idle slices do not count as a process; a switch across an idle gap
    /// counts once.
    pub fn context_switches(&self) -> usize {
        let owners: Vec<ProcessId> = self
            .slices
            .iter()
            .filter_map(|s| s.owner.process_id())
            .collect();
        owners.windows(2).filter(|w| w[0] != w[1]).count()
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a TimelineSlice;
    type IntoIter = std::slice::Iter<'a, TimelineSlice>;

    fn into_iter(self) -> Self::IntoIter {
        self.slices.iter()
    }
}

/// Compact text Gantt chart: `| P1 | P2 | Idle |` over the tick marks.
impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.slices.is_empty() {
            return Ok(());
        }

        let mut bar = String::from("|");
        let mut ticks = String::new();
        for slice in &self.slices {
            let label = format!(" {} ", slice.owner);
            let mark = slice.start.to_string();
            let width = label.len().max(mark.len() + 1);
            bar.push_str(&format!("{label:^width$}|"));
            ticks.push_str(&format!("{mark:<w$}", w = width + 1));
        }
        ticks.push_str(&self.makespan().to_string());

        writeln!(f, "{bar}")?;
        write!(f, "{ticks}")
    }
}

/// A single CPU grant: one row of the per-round schedule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dispatch {
    /// 1-based round number.
    pub round: usize,
    /// Process that received the CPU.
    pub process_id: ProcessId,
    /// Tick at which the grant began.
    pub start: Ticks,
    /// Ticks consumed during the grant.
    pub run: Ticks,
    /// Remaining burst before the grant.
    pub remaining_before: Ticks,
    /// Remaining burst after the grant.
    pub remaining_after: Ticks,
}

impl Dispatch {
    /// End tick of the grant.
    #[inline]
    pub fn end(&self) -> Ticks {
        self.start + self.run
    }

    /// Whether the process finished during this grant.
    #[inline]
    pub fn completes(&self) -> bool {
        self.remaining_after == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_timeline() -> Timeline {
        let mut t = Timeline::new();
        t.push_idle(0, 2);
        t.push_run(1, 2, 5);
        t.push_run(2, 5, 6);
        t.push_run(1, 6, 8);
        t
    }

    #[test]
    fn test_timeline_basics() {
        let t = sample_timeline();
        assert_eq!(t.len(), 4);
        assert_eq!(t.start_time(), 0);
        assert_eq!(t.makespan(), 8);
        assert_eq!(t.busy_time(), 6);
        assert_eq!(t.idle_time(), 2);
        assert!(t.is_contiguous());
    }

    #[test]
    fn test_per_process_queries() {
        let t = sample_timeline();
        assert_eq!(t.slices_for(1).len(), 2);
        assert_eq!(t.run_time_of(1), 5);
        assert_eq!(t.completion_time(1), Some(8));
        assert_eq!(t.completion_time(2), Some(6));
        assert_eq!(t.completion_time(9), None);
    }

    #[test]
    fn test_zero_length_slices_dropped() {
        let mut t = Timeline::new();
        t.push_idle(3, 3);
        t.push_run(1, 3, 3);
        assert!(t.is_empty());
        assert_eq!(t.makespan(), 0);
    }

    #[test]
    fn test_gap_breaks_contiguity() {
        let mut t = Timeline::new();
        t.push_run(1, 0, 2);
        t.push_run(2, 3, 4);
        assert!(!t.is_contiguous());
    }

    #[test]
    fn test_context_switches() {
        let t = sample_timeline();
        // P1 → P2 → P1
        assert_eq!(t.context_switches(), 2);

        let mut same = Timeline::new();
        same.push_run(1, 0, 2);
        same.push_run(1, 2, 4);
        assert_eq!(same.context_switches(), 0);
    }

    #[test]
    fn test_slice_json_shape() {
        let t = sample_timeline();
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json[0]["id"], "Idle");
        assert_eq!(json[1]["id"], 1);
        assert_eq!(json[1]["start"], 2);
        assert_eq!(json[1]["end"], 5);

        let back: Timeline = serde_json::from_value(json).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn test_unknown_owner_label_rejected() {
        let err = serde_json::from_str::<TimelineSlice>(r#"{"id":"Busy","start":0,"end":1}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_display_gantt() {
        let t = sample_timeline();
        let text = t.to_string();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), "| Idle | P1 | P2 | P1 |");
        let marks = lines.next().unwrap();
        assert!(marks.starts_with('0'));
        assert!(marks.ends_with('8'));
        assert_eq!(Timeline::new().to_string(), "");
    }

    #[test]
    fn test_dispatch_helpers() {
        let d = Dispatch {
            round: 1,
            process_id: 1,
            start: 4,
            run: 2,
            remaining_before: 2,
            remaining_after: 0,
        };
        assert_eq!(d.end(), 6);
        assert!(d.completes());
    }
}
