//! Types for critical path computation.

/// Floor on the relative tolerance. Sums along a chain of tasks drift by an
/// ulp or so per task, so exact comparison is never used for slack.
const ROUNDING_FLOOR: f64 = 1024.0 * f64::EPSILON;

/// Absolute slack tolerance for a schedule ending at `project_end`.
///
/// `epsilon` is relative to the project length (or to 1.0 for schedules
/// shorter than one unit). Values below the rounding floor, and values that
/// are not finite, fall back to the floor.
pub fn slack_tolerance(epsilon: f64, project_end: f64) -> f64 {
    let epsilon = if epsilon.is_finite() {
        epsilon.max(ROUNDING_FLOOR)
    } else {
        ROUNDING_FLOOR
    };
    epsilon * project_end.abs().max(1.0)
}

/// Per-task timing information produced by one recompute.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TaskTiming {
    /// Earliest possible start time (from forward pass).
    pub earliest_start: f64,
    /// Earliest possible finish time (from forward pass).
    pub earliest_finish: f64,
    /// Latest allowable start time (from backward pass).
    pub latest_start: f64,
    /// Latest allowable finish time (from backward pass).
    pub latest_finish: f64,
    /// Slack = latest_start - earliest_start.
    pub slack: f64,
}

impl TaskTiming {
    /// Zero slack, within an absolute `tolerance` from `slack_tolerance`.
    pub fn is_critical(&self, tolerance: f64) -> bool {
        self.slack.abs() <= tolerance
    }
}
