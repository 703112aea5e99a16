//! Slack analysis over forward and backward pass results.

use crate::graph::TaskGraph;
use crate::interner::TaskIndex;

use super::backward_pass::BackwardPassResult;
use super::forward_pass::ForwardPassResult;
use super::types::{slack_tolerance, TaskTiming};

/// Combine pass results into per-task timings with slack.
///
/// `epsilon` is scaled to the project length by `slack_tolerance`. Slack
/// within that tolerance of zero is snapped to exactly 0.0. Negative slack
/// beyond it means the passes disagree and panics.
pub fn analyze_slack(
    graph: &TaskGraph,
    order: &[TaskIndex],
    forward: &ForwardPassResult,
    backward: &BackwardPassResult,
    epsilon: f64,
) -> Vec<TaskTiming> {
    let mut timings = vec![TaskTiming::default(); graph.slot_count()];
    let tolerance = slack_tolerance(epsilon, forward.project_end);

    for &idx in order {
        let i = idx as usize;
        let raw = backward.latest_start[i] - forward.earliest_start[i];
        assert!(
            raw >= -tolerance,
            "negative slack {} for task {}",
            raw,
            graph.id_of(idx)
        );
        let slack = if raw <= tolerance { 0.0 } else { raw };

        timings[i] = TaskTiming {
            earliest_start: forward.earliest_start[i],
            earliest_finish: forward.earliest_finish[i],
            latest_start: backward.latest_start[i],
            latest_finish: backward.latest_finish[i],
            slack,
        };
    }

    timings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::critical_path::{backward_pass, forward_pass, topological_order};

    const EPS: f64 = 1e-9;

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

    fn analyze_with(graph: &TaskGraph, epsilon: f64) -> Vec<TaskTiming> {
        let order = topological_order(graph);
        let forward = forward_pass(graph, &order);
        let backward = backward_pass(graph, &order, forward.project_end);
        analyze_slack(graph, &order, &forward, &backward, epsilon)
    }

    fn analyze(graph: &TaskGraph) -> Vec<TaskTiming> {
        analyze_with(graph, EPS)
    }

    #[test]
    fn test_slack_and_critical_flags() {
        let graph = make_graph(
            &[("a", 3.0), ("b", 2.0), ("c", 4.0), ("d", 1.0)],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
        );
        let timings = analyze(&graph);
        let timing = |id| timings[graph.index_of(id).unwrap() as usize];

        assert_eq!(timing("b").slack, 2.0);
        assert!(!timing("b").is_critical(EPS));
        for id in ["a", "c", "d"] {
            assert_eq!(timing(id).slack, 0.0);
            assert!(timing(id).is_critical(EPS));
        }
    }

    #[test]
    fn test_float_noise_snapped_to_zero() {
        // 0.1 + 0.2 != 0.3 in binary floating point
        let graph = make_graph(
            &[("a", 0.1), ("b", 0.2), ("c", 0.3)],
            &[("a", "b")],
        );
        let timings = analyze(&graph);
        let c = timings[graph.index_of("c").unwrap() as usize];
        assert_eq!(c.slack, 0.0);
        assert!(c.is_critical(EPS));
    }

    #[test]
    fn test_large_durations_stay_non_negative() {
        // Rounding of (LF - d) - ES exceeds 1e-9 at this magnitude
        let graph = make_graph(
            &[
                ("a", 21692881.285714284),
                ("b", 12828017.42857143),
                ("c", 10056128.285714285),
                ("side", 1.0e7 / 7.0),
            ],
            &[("a", "b"), ("b", "c"), ("a", "side")],
        );
        let timings = analyze(&graph);
        let timing = |id| timings[graph.index_of(id).unwrap() as usize];

        for id in ["a", "b", "c"] {
            assert_eq!(timing(id).slack, 0.0);
        }
        assert!(timing("side").slack > 0.0);
    }

    #[test]
    fn test_zero_epsilon() {
        let graph = make_graph(&[("a", 3.0)], &[]);
        let timings = analyze_with(&graph, 0.0);
        let a = timings[graph.index_of("a").unwrap() as usize];
        assert_eq!(a.slack, 0.0);

        let graph = make_graph(
            &[("a", 0.1), ("b", 0.2), ("c", 0.3)],
            &[("a", "b")],
        );
        let timings = analyze_with(&graph, 0.0);
        for id in ["a", "b", "c"] {
            assert_eq!(timings[graph.index_of(id).unwrap() as usize].slack, 0.0);
        }
    }

    #[test]
    #[should_panic(expected = "negative slack")]
    fn test_negative_slack_panics() {
        let graph = make_graph(&[("a", 3.0)], &[]);
        let order = topological_order(&graph);
        let forward = forward_pass(&graph, &order);
        // Project end shorter than the longest chain
        let backward = backward_pass(&graph, &order, 1.0);
        analyze_slack(&graph, &order, &forward, &backward, EPS);
    }
}
