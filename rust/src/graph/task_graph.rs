//! Arena-backed task graph with finish-to-start edges.

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::interner::{TaskIdInterner, TaskIndex};

use super::cycle_guard;

/// Errors raised by structural graph mutations.
///
/// Every mutation is validated before any state changes, so an error always
/// leaves the graph exactly as it was.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Duplicate task id: {0}")]
    DuplicateTaskId(String),
    #[error("Unknown task: {0}")]
    UnknownTaskReference(String),
    #[error("Task cannot depend on itself: {0}")]
    SelfDependency(String),
    #[error("Dependency already exists: {predecessor} -> {successor}")]
    DuplicateDependency {
        predecessor: String,
        successor: String,
    },
    #[error(
        "Dependency {predecessor} -> {successor} would create a cycle: {}",
        .cycle.join(" -> ")
    )]
    CycleDetected {
        predecessor: String,
        successor: String,
        /// The closed loop the edge would create, starting and ending at `predecessor`.
        cycle: Vec<String>,
    },
    #[error("Dependency not found: {predecessor} -> {successor}")]
    DependencyNotFound {
        predecessor: String,
        successor: String,
    },
    #[error("Invalid duration for task {id}: {duration} (must be finite and non-negative)")]
    InvalidDuration { id: String, duration: f64 },
}

fn validate_duration(id: &str, duration: f64) -> Result<(), GraphError> {
    if duration.is_finite() && duration >= 0.0 {
        Ok(())
    } else {
        Err(GraphError::InvalidDuration {
            id: id.to_string(),
            duration,
        })
    }
}

/// Directed acyclic graph of tasks.
///
/// Tasks live in arena slots addressed by `TaskIndex`; edges are stored as a
/// flat list of index pairs. The successor and predecessor lists are derived
/// from the edge list and rebuilt after every structural mutation, so they
/// can never drift from it.
#[derive(Debug, Clone, Default)]
pub struct TaskGraph {
    interner: TaskIdInterner,
    /// Task durations indexed by slot. Released slots hold 0.0.
    durations: Vec<f64>,
    /// Live tasks in insertion order.
    order: Vec<TaskIndex>,
    /// Edges as (predecessor, successor) pairs in insertion order.
    edges: Vec<(TaskIndex, TaskIndex)>,
    edge_set: FxHashSet<(TaskIndex, TaskIndex)>,
    successors: Vec<Vec<TaskIndex>>,
    predecessors: Vec<Vec<TaskIndex>>,
}

impl TaskGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a task. Fails if the id is taken or the duration is not a
    /// finite non-negative number.
    pub fn add_task(&mut self, id: &str, duration: f64) -> Result<TaskIndex, GraphError> {
        if self.interner.get(id).is_some() {
            return Err(GraphError::DuplicateTaskId(id.to_string()));
        }
        validate_duration(id, duration)?;

        let idx = self.interner.intern(id);
        let slot = idx as usize;
        if slot == self.durations.len() {
            self.durations.push(duration);
        } else {
            self.durations[slot] = duration;
        }
        self.order.push(idx);
        self.rebuild_adjacency();
        Ok(idx)
    }

    /// Remove a task and every dependency that references it.
    ///
    /// Returns the number of dependencies removed along with the task.
    pub fn remove_task(&mut self, id: &str) -> Result<usize, GraphError> {
        let idx = self.require(id)?;

        let before = self.edges.len();
        self.edges.retain(|&(p, s)| p != idx && s != idx);
        self.edge_set.retain(|&(p, s)| p != idx && s != idx);
        let cascaded = before - self.edges.len();

        self.order.retain(|&t| t != idx);
        self.durations[idx as usize] = 0.0;
        self.interner.release(id);
        self.rebuild_adjacency();
        Ok(cascaded)
    }

    /// Add a finish-to-start dependency `predecessor -> successor`.
    ///
    /// Rejected if either task is unknown, the edge is a self-loop, the edge
    /// already exists, or `successor` can already reach `predecessor`.
    pub fn add_dependency(&mut self, predecessor: &str, successor: &str) -> Result<(), GraphError> {
        let p = self.require(predecessor)?;
        let s = self.require(successor)?;

        if p == s {
            return Err(GraphError::SelfDependency(predecessor.to_string()));
        }
        if self.edge_set.contains(&(p, s)) {
            return Err(GraphError::DuplicateDependency {
                predecessor: predecessor.to_string(),
                successor: successor.to_string(),
            });
        }
        if let Some(path) = cycle_guard::find_path(self, s, p) {
            let cycle = std::iter::once(predecessor.to_string())
                .chain(path.into_iter().map(|idx| self.id_of(idx).to_string()))
                .collect();
            return Err(GraphError::CycleDetected {
                predecessor: predecessor.to_string(),
                successor: successor.to_string(),
                cycle,
            });
        }

        self.edges.push((p, s));
        self.edge_set.insert((p, s));
        self.rebuild_adjacency();
        Ok(())
    }

    /// Remove the dependency `predecessor -> successor`.
    pub fn remove_dependency(
        &mut self,
        predecessor: &str,
        successor: &str,
    ) -> Result<(), GraphError> {
        let p = self.require(predecessor)?;
        let s = self.require(successor)?;

        if !self.edge_set.remove(&(p, s)) {
            return Err(GraphError::DependencyNotFound {
                predecessor: predecessor.to_string(),
                successor: successor.to_string(),
            });
        }
        self.edges.retain(|&edge| edge != (p, s));
        self.rebuild_adjacency();
        Ok(())
    }

    /// Replace a task's duration, returning the previous value.
    pub fn set_duration(&mut self, id: &str, duration: f64) -> Result<f64, GraphError> {
        let idx = self.require(id)?;
        validate_duration(id, duration)?;
        let slot = &mut self.durations[idx as usize];
        Ok(std::mem::replace(slot, duration))
    }

    pub fn contains_task(&self, id: &str) -> bool {
        self.interner.get(id).is_some()
    }

    pub fn task_count(&self) -> usize {
        self.interner.len()
    }

    pub fn dependency_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interner.is_empty()
    }

    pub fn duration_of(&self, id: &str) -> Option<f64> {
        self.index_of(id).map(|idx| self.duration(idx))
    }

    /// Ids of the tasks that directly depend on `id`, in edge insertion order.
    pub fn successors_of(&self, id: &str) -> Option<Vec<&str>> {
        let idx = self.index_of(id)?;
        Some(self.successors(idx).iter().map(|&s| self.id_of(s)).collect())
    }

    /// Ids of the tasks `id` directly depends on, in edge insertion order.
    pub fn predecessors_of(&self, id: &str) -> Option<Vec<&str>> {
        let idx = self.index_of(id)?;
        Some(self.predecessors(idx).iter().map(|&p| self.id_of(p)).collect())
    }

    /// Task ids in insertion order.
    pub fn task_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.iter().map(|&idx| self.id_of(idx))
    }

    /// Dependencies as (predecessor, successor) id pairs in insertion order.
    pub fn dependencies(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.edges
            .iter()
            .map(|&(p, s)| (self.id_of(p), self.id_of(s)))
    }

    // Index-level accessors used by the scheduling passes.

    #[inline]
    pub fn index_of(&self, id: &str) -> Option<TaskIndex> {
        self.interner.get(id)
    }

    /// Id of a live task slot.
    ///
    /// Panics if the slot has been released; indices handed out by this graph
    /// are only valid while their task is alive.
    #[inline]
    pub fn id_of(&self, idx: TaskIndex) -> &str {
        self.interner
            .resolve(idx)
            .expect("task index refers to a released slot")
    }

    #[inline]
    pub fn duration(&self, idx: TaskIndex) -> f64 {
        self.durations[idx as usize]
    }

    #[inline]
    pub fn successors(&self, idx: TaskIndex) -> &[TaskIndex] {
        &self.successors[idx as usize]
    }

    #[inline]
    pub fn predecessors(&self, idx: TaskIndex) -> &[TaskIndex] {
        &self.predecessors[idx as usize]
    }

    /// Live task indices in insertion order.
    pub fn order(&self) -> &[TaskIndex] {
        &self.order
    }

    /// Size of per-task vectors indexed by `TaskIndex`.
    pub fn slot_count(&self) -> usize {
        self.interner.slot_count()
    }

    fn require(&self, id: &str) -> Result<TaskIndex, GraphError> {
        self.index_of(id)
            .ok_or_else(|| GraphError::UnknownTaskReference(id.to_string()))
    }

    fn rebuild_adjacency(&mut self) {
        let n = self.slot_count();
        let mut successors: Vec<Vec<TaskIndex>> = vec![Vec::new(); n];
        let mut predecessors: Vec<Vec<TaskIndex>> = vec![Vec::new(); n];
        for &(p, s) in &self.edges {
            successors[p as usize].push(s);
            predecessors[s as usize].push(p);
        }
        self.successors = successors;
        self.predecessors = predecessors;
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

    fn snapshot(graph: &TaskGraph) -> (Vec<(String, f64)>, Vec<(String, String)>) {
        let tasks = graph
            .task_ids()
            .map(|id| (id.to_string(), graph.duration_of(id).unwrap()))
            .collect();
        let deps = graph
            .dependencies()
            .map(|(p, s)| (p.to_string(), s.to_string()))
            .collect();
        (tasks, deps)
    }

    #[test]
    fn test_add_task_and_query() {
        let graph = make_graph(&[("a", 3.0), ("b", 2.0)], &[("a", "b")]);
        assert_eq!(graph.task_count(), 2);
        assert_eq!(graph.dependency_count(), 1);
        assert!(graph.contains_task("a"));
        assert_eq!(graph.duration_of("b"), Some(2.0));
        assert_eq!(graph.successors_of("a"), Some(vec!["b"]));
        assert_eq!(graph.predecessors_of("b"), Some(vec!["a"]));
        assert_eq!(graph.predecessors_of("a"), Some(vec![]));
        assert_eq!(graph.successors_of("missing"), None);
    }

    #[test]
    fn test_duplicate_task_id() {
        let mut graph = make_graph(&[("a", 3.0)], &[]);
        assert_eq!(
            graph.add_task("a", 1.0),
            Err(GraphError::DuplicateTaskId("a".to_string()))
        );
        assert_eq!(graph.duration_of("a"), Some(3.0));
    }

    #[test]
    fn test_invalid_duration_rejected() {
        let mut graph = TaskGraph::new();
        assert!(matches!(
            graph.add_task("a", -1.0),
            Err(GraphError::InvalidDuration { .. })
        ));
        assert!(matches!(
            graph.add_task("a", f64::NAN),
            Err(GraphError::InvalidDuration { .. })
        ));
        assert!(matches!(
            graph.add_task("a", f64::INFINITY),
            Err(GraphError::InvalidDuration { .. })
        ));
        assert!(graph.is_empty());
        graph.add_task("a", 0.0).unwrap();
    }

    #[test]
    fn test_unknown_task_reference() {
        let mut graph = make_graph(&[("a", 1.0)], &[]);
        assert_eq!(
            graph.add_dependency("a", "ghost"),
            Err(GraphError::UnknownTaskReference("ghost".to_string()))
        );
        assert_eq!(
            graph.add_dependency("ghost", "a"),
            Err(GraphError::UnknownTaskReference("ghost".to_string()))
        );
        assert_eq!(
            graph.remove_dependency("ghost", "a"),
            Err(GraphError::UnknownTaskReference("ghost".to_string()))
        );
        assert_eq!(
            graph.remove_task("ghost"),
            Err(GraphError::UnknownTaskReference("ghost".to_string()))
        );
    }

    #[test]
    fn test_self_dependency() {
        let mut graph = make_graph(&[("a", 1.0)], &[]);
        assert_eq!(
            graph.add_dependency("a", "a"),
            Err(GraphError::SelfDependency("a".to_string()))
        );
        assert_eq!(graph.dependency_count(), 0);
    }

    #[test]
    fn test_duplicate_dependency() {
        let mut graph = make_graph(&[("a", 1.0), ("b", 1.0)], &[("a", "b")]);
        assert_eq!(
            graph.add_dependency("a", "b"),
            Err(GraphError::DuplicateDependency {
                predecessor: "a".to_string(),
                successor: "b".to_string(),
            })
        );
        assert_eq!(graph.dependency_count(), 1);
    }

    #[test]
    fn test_cycle_rejected_graph_unchanged() {
        let mut graph = make_graph(
            &[("a", 1.0), ("b", 1.0), ("c", 1.0)],
            &[("a", "b"), ("b", "c")],
        );
        let before = snapshot(&graph);

        let err = graph.add_dependency("c", "a").unwrap_err();
        assert_eq!(
            err,
            GraphError::CycleDetected {
                predecessor: "c".to_string(),
                successor: "a".to_string(),
                cycle: vec![
                    "c".to_string(),
                    "a".to_string(),
                    "b".to_string(),
                    "c".to_string()
                ],
            }
        );
        assert_eq!(
            err.to_string(),
            "Dependency c -> a would create a cycle: c -> a -> b -> c"
        );
        assert_eq!(snapshot(&graph), before);
        assert_eq!(graph.successors_of("c"), Some(vec![]));
    }

    #[test]
    fn test_two_node_cycle_rejected() {
        let mut graph = make_graph(&[("a", 1.0), ("b", 1.0)], &[("a", "b")]);
        assert!(matches!(
            graph.add_dependency("b", "a"),
            Err(GraphError::CycleDetected { .. })
        ));
    }

    #[test]
    fn test_remove_task_cascades() {
        let mut graph = make_graph(
            &[("a", 1.0), ("b", 1.0), ("c", 1.0)],
            &[("a", "b"), ("b", "c"), ("a", "c")],
        );
        assert_eq!(graph.remove_task("b"), Ok(2));
        assert_eq!(graph.task_count(), 2);
        assert_eq!(
            graph.dependencies().collect::<Vec<_>>(),
            vec![("a", "c")]
        );
        assert_eq!(graph.successors_of("a"), Some(vec!["c"]));
        assert!(!graph.contains_task("b"));
    }

    #[test]
    fn test_recycled_slot_starts_clean() {
        let mut graph = make_graph(&[("a", 1.0), ("b", 1.0)], &[("a", "b")]);
        graph.remove_task("b").unwrap();
        graph.add_task("c", 4.0).unwrap();

        assert_eq!(graph.predecessors_of("c"), Some(vec![]));
        assert_eq!(graph.successors_of("a"), Some(vec![]));
        assert_eq!(graph.duration_of("c"), Some(4.0));
        assert_eq!(graph.task_ids().collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn test_remove_dependency() {
        let mut graph = make_graph(&[("a", 1.0), ("b", 1.0)], &[("a", "b")]);
        graph.remove_dependency("a", "b").unwrap();
        assert_eq!(graph.dependency_count(), 0);
        assert_eq!(graph.predecessors_of("b"), Some(vec![]));
        assert_eq!(
            graph.remove_dependency("a", "b"),
            Err(GraphError::DependencyNotFound {
                predecessor: "a".to_string(),
                successor: "b".to_string(),
            })
        );
        // Edge can be re-added once removed
        graph.add_dependency("b", "a").unwrap();
    }

    #[test]
    fn test_set_duration() {
        let mut graph = make_graph(&[("a", 1.0)], &[]);
        assert_eq!(graph.set_duration("a", 5.0), Ok(1.0));
        assert_eq!(graph.duration_of("a"), Some(5.0));
        assert!(matches!(
            graph.set_duration("a", -2.0),
            Err(GraphError::InvalidDuration { .. })
        ));
        assert_eq!(graph.duration_of("a"), Some(5.0));
        assert_eq!(
            graph.set_duration("zzz", 1.0),
            Err(GraphError::UnknownTaskReference("zzz".to_string()))
        );
    }
}
