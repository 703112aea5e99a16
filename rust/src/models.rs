//! Input records for building a task graph.
//!
//! These are the persisted shape of a project: a list of tasks and a list of
//! finish-to-start dependencies. The engine rebuilds its whole state from them.

/// A task to be scheduled.
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    pub id: String,
    /// Non-negative, time-unit agnostic (conventionally days).
    pub duration: f64,
}

impl Task {
    pub fn new(id: impl Into<String>, duration: f64) -> Self {
        Self {
            id: id.into(),
            duration,
        }
    }
}

/// A finish-to-start dependency: `successor` cannot start before
/// `predecessor` finishes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Dependency {
    pub predecessor: String,
    pub successor: String,
}

impl Dependency {
    pub fn new(predecessor: impl Into<String>, successor: impl Into<String>) -> Self {
        Self {
            predecessor: predecessor.into(),
            successor: successor.into(),
        }
    }
}
