//! Critical path extraction.

use crate::config::TieBreak;
use crate::graph::TaskGraph;
use crate::interner::TaskIndex;

use super::types::{slack_tolerance, TaskTiming};

/// Choose one candidate according to the tie-break strategy.
fn pick(
    graph: &TaskGraph,
    tie_break: TieBreak,
    candidates: impl IntoIterator<Item = TaskIndex>,
) -> Option<TaskIndex> {
    let by_id = |a: &TaskIndex, b: &TaskIndex| graph.id_of(*a).cmp(graph.id_of(*b));
    match tie_break {
        TieBreak::LowestId => candidates.into_iter().min_by(by_id),
        TieBreak::LongestDuration => candidates.into_iter().min_by(|a, b| {
            graph
                .duration(*b)
                .total_cmp(&graph.duration(*a))
                .then_with(|| by_id(a, b))
        }),
    }
}

/// Extract one chain of critical tasks from a source to a sink.
///
/// Starts at a critical sink finishing at `project_end` and walks backward,
/// at each step taking a critical predecessor whose earliest finish equals the
/// current task's earliest start, until a task without predecessors is
/// reached. Finish times are matched exactly: the forward pass copies the
/// driving predecessor's finish into both the successor's start and the
/// project end. Criticality uses `epsilon` scaled by `slack_tolerance`. When several candidates qualify, `tie_break` decides. Returns the
/// chain ordered source to sink; empty for an empty graph.
///
/// Per-task `is_critical` flags are the authoritative "on some critical path"
/// signal; this chain is one concrete exemplar.
pub fn extract_critical_path(
    graph: &TaskGraph,
    timings: &[TaskTiming],
    project_end: f64,
    epsilon: f64,
    tie_break: TieBreak,
) -> Vec<TaskIndex> {
    let timing = |idx: TaskIndex| &timings[idx as usize];
    let tolerance = slack_tolerance(epsilon, project_end);
    let is_critical = |idx: TaskIndex| timing(idx).is_critical(tolerance);

    let sinks = graph.order().iter().copied().filter(|&idx| {
        graph.successors(idx).is_empty()
            && is_critical(idx)
            && timing(idx).earliest_finish == project_end
    });
    let Some(mut current) = pick(graph, tie_break, sinks) else {
        return Vec::new();
    };

    let mut path = vec![current];
    while !graph.predecessors(current).is_empty() {
        let start = timing(current).earliest_start;
        let driving: Vec<TaskIndex> = graph
            .predecessors(current)
            .iter()
            .copied()
            .filter(|&p| timing(p).earliest_finish == start)
            .collect();
        current = pick(graph, tie_break, driving.iter().copied().filter(|&p| is_critical(p)))
            .or_else(|| pick(graph, tie_break, driving.iter().copied()))
            .expect("earliest start is the finish of some predecessor");
        path.push(current);
    }

    path.reverse();
    path
}
