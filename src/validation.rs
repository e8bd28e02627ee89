//! Input validation for process sets.
//!
//! Checks structural integrity of a process set before simulation.
//! Detects:
//! - Zero or duplicate IDs
//! - Negative arrival times
//! - Non-positive burst times
//! - Non-positive explicit priorities
//! - Time horizons that do not fit in [`Ticks`]
//!
//! A set that passes has `max(arrival) + Σburst <= Ticks::MAX`; every
//! clock value a policy reaches is bounded by that sum.
//!
//! Every policy runs these checks first; the lenient wire path in
//! [`crate::input`] substitutes defaults beforehand so that it always passes.

use std::collections::HashSet;
use std::fmt;

use crate::models::{Process, Ticks};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two processes share the same ID.
    DuplicateId,
    /// A process has ID 0.
    ZeroId,
    /// A process arrives before t=0.
    NegativeArrival,
    /// A process needs no CPU time (or negative time).
    NonPositiveBurst,
    /// An explicit priority is zero or negative.
    NonPositivePriority,
    /// The latest arrival plus the total burst exceeds the tick range.
    HorizonOverflow,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a process set.
///
/// Checks:
/// 1. No process has ID 0
/// 2. No duplicate process IDs
/// 3. All arrival times are >= 0
/// 4. All burst times are >= 1
/// 5. All explicit priorities are >= 1
/// 6. `max(arrival) + Σburst` fits in [`Ticks`]
///
/// An empty set is valid.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_processes(processes: &[Process]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for p in processes {
        if p.id == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroId,
                "Process IDs must be positive",
            ));
        } else if !ids.insert(p.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process ID: {}", p.id),
            ));
        }

        if p.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!("Process {} arrives at negative time {}", p.id, p.arrival_time),
            ));
        }

        if p.burst_time < 1 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!("Process {} has burst time {}", p.id, p.burst_time),
            ));
        }

        if let Some(priority) = p.priority {
            if priority < 1 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NonPositivePriority,
                    format!("Process {} has priority {}", p.id, priority),
                ));
            }
        }
    }

    if horizon(processes).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::HorizonOverflow,
            format!("Latest arrival plus total burst exceeds {}", Ticks::MAX),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Latest possible completion tick, `None` on overflow.
fn horizon(processes: &[Process]) -> Option<Ticks> {
    let latest_arrival = processes
        .iter()
        .map(|p| p.arrival_time.max(0))
        .max()
        .unwrap_or(0);
    processes
        .iter()
        .try_fold(latest_arrival, |acc, p| acc.checked_add(p.burst_time.max(0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_processes() -> Vec<Process> {
        vec![
            Process::new(1, 8),
            Process::new(2, 4).with_arrival(1),
            Process::new(3, 9).with_arrival(2).with_priority(2),
        ]
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_processes(&sample_processes()).is_ok());
    }

    #[test]
    fn test_empty_input_is_valid() {
        assert!(validate_processes(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_id() {
        let procs = vec![Process::new(1, 2), Process::new(1, 3)];
        let errors = validate_processes(&procs).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_zero_id() {
        let errors = validate_processes(&[Process::new(0, 2)]).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::ZeroId);
    }

    #[test]
    fn test_negative_arrival() {
        let errors = validate_processes(&[Process::new(1, 2).with_arrival(-1)]).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NegativeArrival);
    }

    #[test]
    fn test_non_positive_burst() {
        let errors = validate_processes(&[Process::new(1, 0)]).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NonPositiveBurst);
    }

    #[test]
    fn test_non_positive_priority() {
        let errors = validate_processes(&[Process::new(1, 2).with_priority(0)]).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NonPositivePriority);
    }

    #[test]
    fn test_horizon_overflow() {
        let procs = vec![Process::new(1, Ticks::MAX), Process::new(2, Ticks::MAX)];
        let errors = validate_processes(&procs).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::HorizonOverflow);

        let late = vec![Process::new(1, 2).with_arrival(Ticks::MAX - 1)];
        let errors = validate_processes(&late).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::HorizonOverflow);
    }

    #[test]
    fn test_horizon_at_limit_is_valid() {
        assert!(validate_processes(&[Process::new(1, Ticks::MAX)]).is_ok());

        let procs = vec![
            Process::new(1, Ticks::MAX - 10),
            Process::new(2, 5).with_arrival(5),
        ];
        assert!(validate_processes(&procs).is_ok());
    }

    #[test]
    fn test_multiple_errors() {
        let procs = vec![
            Process::new(1, 0).with_arrival(-5),
            Process::new(1, 3).with_priority(-1),
        ];
        let errors = validate_processes(&procs).unwrap_err();
        assert_eq!(errors.len(), 4);
    }
}
