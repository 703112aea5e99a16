//! Immutable schedule snapshot returned by a recompute.

#[cfg(feature = "python")]
use pyo3::prelude::*;
use rustc_hash::FxHashMap;

/// Computed schedule for one task.
#[cfg_attr(feature = "python", pyclass(get_all))]
#[derive(Clone, Debug, PartialEq)]
pub struct TaskSchedule {
    pub id: String,
    pub duration: f64,
    pub earliest_start: f64,
    pub earliest_finish: f64,
    pub latest_start: f64,
    pub latest_finish: f64,
    /// latest_start - earliest_start, never negative.
    pub slack: f64,
    pub is_critical: bool,
}

#[cfg(feature = "python")]
#[pymethods]
impl TaskSchedule {
    fn __repr__(&self) -> String {
        format!(
            "TaskSchedule(id={:?}, early={}..{}, late={}..{}, slack={}, critical={})",
            self.id,
            self.earliest_start,
            self.earliest_finish,
            self.latest_start,
            self.latest_finish,
            self.slack,
            self.is_critical
        )
    }
}

/// Read-only result of one recompute.
///
/// Rows are in task insertion order. Values describe the graph as it was at
/// the time of the recompute and are not updated by later mutations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScheduleResult {
    tasks: Vec<TaskSchedule>,
    by_id: FxHashMap<String, usize>,
    critical_path: Vec<String>,
    project_end: f64,
}

impl ScheduleResult {
    pub(crate) fn new(tasks: Vec<TaskSchedule>, critical_path: Vec<String>, project_end: f64) -> Self {
        let by_id = tasks
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.clone(), i))
            .collect();
        Self {
            tasks,
            by_id,
            critical_path,
            project_end,
        }
    }

    /// Per-task rows in task insertion order.
    pub fn tasks(&self) -> &[TaskSchedule] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&TaskSchedule> {
        self.by_id.get(id).map(|&i| &self.tasks[i])
    }

    /// One chain of critical task ids, source to sink.
    pub fn critical_path(&self) -> &[String] {
        &self.critical_path
    }

    /// Ids of every zero-slack task, in task insertion order.
    pub fn critical_tasks(&self) -> impl Iterator<Item = &str> + '_ {
        self.tasks
            .iter()
            .filter(|t| t.is_critical)
            .map(|t| t.id.as_str())
    }

    /// Maximum earliest finish over all tasks; 0.0 for an empty graph.
    pub fn project_end(&self) -> f64 {
        self.project_end
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
