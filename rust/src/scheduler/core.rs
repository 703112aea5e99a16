//! Core scheduler implementation.

use crate::config::SchedulerConfig;
use crate::critical_path::{
    analyze_slack, backward_pass, extract_critical_path, forward_pass, slack_tolerance,
    topological_order,
};
use crate::graph::{GraphError, TaskGraph};
use crate::models::{Dependency, Task};
use crate::{log_changes, log_debug, log_rejected};

use super::result::{ScheduleResult, TaskSchedule};

/// Critical Path Method scheduler over a mutable task graph.
///
/// Mutations are validated in full before anything changes, so a rejected
/// call leaves the graph exactly as it was. `recompute` is never run
/// implicitly; call it after a batch of mutations.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    graph: TaskGraph,
    config: SchedulerConfig,
}

impl Scheduler {
    /// Create an empty scheduler.
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            graph: TaskGraph::new(),
            config,
        }
    }

    /// Build a scheduler from persisted task and dependency records.
    ///
    /// Records go through the ordinary mutation path in order; the first
    /// invalid record aborts the load.
    pub fn from_parts(
        tasks: impl IntoIterator<Item = Task>,
        dependencies: impl IntoIterator<Item = Dependency>,
        config: SchedulerConfig,
    ) -> Result<Self, GraphError> {
        let mut scheduler = Self::new(config);
        for task in tasks {
            scheduler.add_task(&task.id, task.duration)?;
        }
        for dep in dependencies {
            scheduler.add_dependency(&dep.predecessor, &dep.successor)?;
        }
        Ok(scheduler)
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Read-only view of the task graph.
    pub fn graph(&self) -> &TaskGraph {
        &self.graph
    }

    pub fn add_task(&mut self, id: &str, duration: f64) -> Result<(), GraphError> {
        let verbosity = self.config.verbosity;
        self.graph
            .add_task(id, duration)
            .inspect_err(|e| log_rejected!(verbosity, "add_task", e))?;
        log_changes!(verbosity, "Added task {} (duration {})", id, duration);
        Ok(())
    }

    /// Remove a task along with every dependency that references it.
    pub fn remove_task(&mut self, id: &str) -> Result<(), GraphError> {
        let verbosity = self.config.verbosity;
        let cascaded = self
            .graph
            .remove_task(id)
            .inspect_err(|e| log_rejected!(verbosity, "remove_task", e))?;
        log_changes!(
            verbosity,
            "Removed task {} and {} dependencies",
            id,
            cascaded
        );
        Ok(())
    }

    pub fn add_dependency(&mut self, predecessor: &str, successor: &str) -> Result<(), GraphError> {
        let verbosity = self.config.verbosity;
        self.graph
            .add_dependency(predecessor, successor)
            .inspect_err(|e| log_rejected!(verbosity, "add_dependency", e))?;
        log_changes!(
            verbosity,
            "Added dependency {} -> {}",
            predecessor,
            successor
        );
        Ok(())
    }

    pub fn remove_dependency(&mut self, predecessor: &str, successor: &str) -> Result<(), GraphError> {
        let verbosity = self.config.verbosity;
        self.graph
            .remove_dependency(predecessor, successor)
            .inspect_err(|e| log_rejected!(verbosity, "remove_dependency", e))?;
        log_changes!(
            verbosity,
            "Removed dependency {} -> {}",
            predecessor,
            successor
        );
        Ok(())
    }

    /// Replace a task's duration. Edges are untouched.
    pub fn set_duration(&mut self, id: &str, duration: f64) -> Result<(), GraphError> {
        let verbosity = self.config.verbosity;
        let previous = self
            .graph
            .set_duration(id, duration)
            .inspect_err(|e| log_rejected!(verbosity, "set_duration", e))?;
        log_changes!(
            verbosity,
            "Duration of {} changed {} -> {}",
            id,
            previous,
            duration
        );
        Ok(())
    }

    /// Task records in insertion order.
    pub fn tasks(&self) -> Vec<Task> {
        self.graph
            .task_ids()
            .map(|id| Task::new(id, self.graph.duration_of(id).unwrap_or(0.0)))
            .collect()
    }

    /// Dependency records in insertion order.
    pub fn dependencies(&self) -> Vec<Dependency> {
        self.graph
            .dependencies()
            .map(|(p, s)| Dependency::new(p, s))
            .collect()
    }

    /// Run forward pass, backward pass, slack analysis and critical path
    /// extraction over the current graph.
    pub fn recompute(&self) -> ScheduleResult {
        let verbosity = self.config.verbosity;
        let epsilon = self.config.critical_epsilon;
        let graph = &self.graph;

        let order = topological_order(graph);
        log_debug!(
            verbosity,
            "Topological order: {:?}",
            order.iter().map(|&idx| graph.id_of(idx)).collect::<Vec<_>>()
        );

        let forward = forward_pass(graph, &order);
        let backward = backward_pass(graph, &order, forward.project_end);
        let timings = analyze_slack(graph, &order, &forward, &backward, epsilon);
        let tolerance = slack_tolerance(epsilon, forward.project_end);
        let path = extract_critical_path(
            graph,
            &timings,
            forward.project_end,
            epsilon,
            self.config.tie_break,
        );

        let tasks: Vec<TaskSchedule> = graph
            .order()
            .iter()
            .map(|&idx| {
                let timing = timings[idx as usize];
                log_debug!(
                    verbosity,
                    "  {}: ES={} EF={} LS={} LF={} slack={}",
                    graph.id_of(idx),
                    timing.earliest_start,
                    timing.earliest_finish,
                    timing.latest_start,
                    timing.latest_finish,
                    timing.slack
                );
                TaskSchedule {
                    id: graph.id_of(idx).to_string(),
                    duration: graph.duration(idx),
                    earliest_start: timing.earliest_start,
                    earliest_finish: timing.earliest_finish,
                    latest_start: timing.latest_start,
                    latest_finish: timing.latest_finish,
                    slack: timing.slack,
                    is_critical: timing.is_critical(tolerance),
                }
            })
            .collect();

        let critical_path: Vec<String> = path
            .into_iter()
            .map(|idx| graph.id_of(idx).to_string())
            .collect();

        log_changes!(
            verbosity,
            "Recomputed {} tasks: project end {}, critical path {:?}",
            tasks.len(),
            forward.project_end,
            critical_path
        );

        ScheduleResult::new(tasks, critical_path, forward.project_end)
    }
}
