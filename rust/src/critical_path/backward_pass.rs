//! Backward pass: latest start and finish times.

use crate::graph::TaskGraph;
use crate::interner::TaskIndex;

/// Result from the backward pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackwardPassResult {
    /// Latest allowable start per task, indexed by `TaskIndex`.
    pub latest_start: Vec<f64>,
    /// Latest allowable finish per task, indexed by `TaskIndex`.
    pub latest_finish: Vec<f64>,
}

/// Run the backward pass to compute latest start/finish times.
///
/// Tasks are processed in the reverse of the forward pass order, so every
/// successor's latest start is final before a predecessor reads it.
///
/// # Arguments
/// * `graph` - Task graph to process
/// * `order` - Topological order used by the forward pass
/// * `project_end` - Latest finish for tasks without successors
///
/// # Returns
/// * `BackwardPassResult` with latest start/finish for every live task
pub fn backward_pass(graph: &TaskGraph, order: &[TaskIndex], project_end: f64) -> BackwardPassResult {
    let n = graph.slot_count();
    let mut latest_start = vec![0.0; n];
    let mut latest_finish = vec![0.0; n];

    for &idx in order.iter().rev() {
        // Latest finish = min of all successor latest starts; sinks anchor on project end
        let finish = graph
            .successors(idx)
            .iter()
            .map(|&s| latest_start[s as usize])
            .reduce(f64::min)
            .unwrap_or(project_end);

        latest_finish[idx as usize] = finish;
        latest_start[idx as usize] = finish - graph.duration(idx);
    }

    BackwardPassResult {
        latest_start,
        latest_finish,
    }
}
