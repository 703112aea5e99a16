//! Forward pass: earliest start and finish times.

use std::collections::VecDeque;

use crate::graph::TaskGraph;
use crate::interner::TaskIndex;

/// Perform topological sort of the live tasks using Kahn's algorithm.
///
/// Returns task indices in order such that every predecessor comes before its
/// successors. Sources are seeded in task insertion order and successors are
/// released in edge order, so the order is deterministic for a given graph.
///
/// Panics if the graph contains a cycle. The cycle guard rejects every edge
/// that would close one, so reaching that state is a bug, not an input error.
pub fn topological_order(graph: &TaskGraph) -> Vec<TaskIndex> {
    // In-degree = number of predecessors still unprocessed
    let mut in_degree = vec![0usize; graph.slot_count()];
    for &idx in graph.order() {
        in_degree[idx as usize] = graph.predecessors(idx).len();
    }

    let mut queue: VecDeque<TaskIndex> = graph
        .order()
        .iter()
        .copied()
        .filter(|&idx| in_degree[idx as usize] == 0)
        .collect();

    let mut result: Vec<TaskIndex> = Vec::with_capacity(graph.task_count());

    while let Some(idx) = queue.pop_front() {
        result.push(idx);

        for &succ in graph.successors(idx) {
            let degree = &mut in_degree[succ as usize];
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(succ);
            }
        }
    }

    assert_eq!(
        result.len(),
        graph.task_count(),
        "cycle in task graph reached the scheduling passes"
    );
    result
}

/// Result from the forward pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ForwardPassResult {
    /// Earliest start per task, indexed by `TaskIndex`.
    pub earliest_start: Vec<f64>,
    /// Earliest finish per task, indexed by `TaskIndex`.
    pub earliest_finish: Vec<f64>,
    /// Maximum earliest finish over all tasks; 0.0 for an empty graph.
    pub project_end: f64,
}

/// Compute earliest start/finish for every task.
///
/// `order` must be a topological order of `graph`, so every predecessor's
/// earliest finish is final by the time it is read.
pub fn forward_pass(graph: &TaskGraph, order: &[TaskIndex]) -> ForwardPassResult {
    let n = graph.slot_count();
    let mut earliest_start = vec![0.0; n];
    let mut earliest_finish = vec![0.0; n];
    let mut project_end: f64 = 0.0;

    for &idx in order {
        // Earliest start = max of all predecessor finish times
        let start = graph
            .predecessors(idx)
            .iter()
            .map(|&p| earliest_finish[p as usize])
            .fold(0.0, f64::max);
        let finish = start + graph.duration(idx);

        earliest_start[idx as usize] = start;
        earliest_finish[idx as usize] = finish;
        project_end = project_end.max(finish);
    }

    ForwardPassResult {
        earliest_start,
        earliest_finish,
        project_end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_graph(tasks: &[(&str, f64)], deps: &[(&str, &str)]) -> TaskGraph {
        let mut graph = TaskGraph::new();
        for (id, duration) in tasks {
            graph.add_task(id, *duration).unwrap();
        }
        for (p, s) in deps {
            graph.add_dependency(p, s).unwrap();
        }
        graph
    }

    fn position(order: &[TaskIndex], graph: &TaskGraph, id: &str) -> usize {
        let idx = graph.index_of(id).unwrap();
        order.iter().position(|&t| t == idx).unwrap()
    }

    #[test]
    fn test_topological_order_respects_edges() {
        // Inserted in reverse of dependency order
        let graph = make_graph(
            &[("d", 1.0), ("c", 4.0), ("b", 2.0), ("a", 3.0)],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
        );
        let order = topological_order(&graph);
        assert_eq!(order.len(), 4);
        for (p, s) in graph.dependencies() {
            assert!(position(&order, &graph, p) < position(&order, &graph, s));
        }
    }

    #[test]
    fn test_topological_order_sources_in_insertion_order() {
        let graph = make_graph(&[("x", 1.0), ("y", 1.0), ("z", 1.0)], &[]);
        let order = topological_order(&graph);
        let ids: Vec<&str> = order.iter().map(|&idx| graph.id_of(idx)).collect();
        assert_eq!(ids, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_forward_pass_diamond() {
        let graph = make_graph(
            &[("a", 3.0), ("b", 2.0), ("c", 4.0), ("d", 1.0)],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
        );
        let order = topological_order(&graph);
        let result = forward_pass(&graph, &order);
        let es = |id| result.earliest_start[graph.index_of(id).unwrap() as usize];
        let ef = |id| result.earliest_finish[graph.index_of(id).unwrap() as usize];

        assert_eq!((es("a"), ef("a")), (0.0, 3.0));
        assert_eq!((es("b"), ef("b")), (3.0, 5.0));
        assert_eq!((es("c"), ef("c")), (3.0, 7.0));
        assert_eq!((es("d"), ef("d")), (7.0, 8.0));
        assert_eq!(result.project_end, 8.0);
    }

    #[test]
    fn test_forward_pass_zero_duration_milestone() {
        let graph = make_graph(
            &[("a", 2.0), ("gate", 0.0), ("b", 3.0)],
            &[("a", "gate"), ("gate", "b")],
        );
        let order = topological_order(&graph);
        let result = forward_pass(&graph, &order);
        let gate = graph.index_of("gate").unwrap() as usize;

        assert_eq!(result.earliest_start[gate], 2.0);
        assert_eq!(result.earliest_finish[gate], 2.0);
        assert_eq!(result.project_end, 5.0);
    }

    #[test]
    fn test_forward_pass_empty_graph() {
        let graph = TaskGraph::new();
        let order = topological_order(&graph);
        let result = forward_pass(&graph, &order);
        assert!(order.is_empty());
        assert_eq!(result.project_end, 0.0);
    }
}
