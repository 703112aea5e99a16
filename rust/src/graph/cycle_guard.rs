//! Reachability checks that keep the task graph acyclic.
//!
//! Adding `predecessor -> successor` closes a cycle exactly when `successor`
//! can already reach `predecessor` through existing successor edges. The
//! check runs before every edge insertion; the scheduling passes never see
//! a cyclic graph.

use crate::interner::TaskIndex;

use super::TaskGraph;

/// Find a path `from -> ... -> to` following successor edges.
///
/// Iterative depth-first search with an explicit stack. Returns the path
/// including both endpoints, or `None` if `to` is unreachable.
pub fn find_path(graph: &TaskGraph, from: TaskIndex, to: TaskIndex) -> Option<Vec<TaskIndex>> {
    let n = graph.slot_count();
    let mut visited = vec![false; n];
    let mut parent: Vec<Option<TaskIndex>> = vec![None; n];
    let mut stack = vec![from];
    visited[from as usize] = true;

    while let Some(node) = stack.pop() {
        if node == to {
            return Some(trace_back(&parent, to));
        }
        for &next in graph.successors(node) {
            if !visited[next as usize] {
                visited[next as usize] = true;
                parent[next as usize] = Some(node);
                stack.push(next);
            }
        }
    }
    None
}

fn trace_back(parent: &[Option<TaskIndex>], to: TaskIndex) -> Vec<TaskIndex> {
    let mut path = vec![to];
    let mut current = to;
    while let Some(prev) = parent[current as usize] {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}
