//! Task graph storage and structural validation.
//!
//! The graph owns tasks and finish-to-start edges. Every edge insertion goes
//! through the cycle guard, so a stored graph is always acyclic.

pub mod cycle_guard;
mod task_graph;

pub use task_graph::{GraphError, TaskGraph};
