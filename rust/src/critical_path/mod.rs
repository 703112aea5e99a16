//! Critical Path Method passes over a `TaskGraph`.
//!
//! A recompute runs these in sequence over a single topological order:
//! forward pass, backward pass, slack analysis, then critical path
//! extraction. Each pass is a pure function of the graph and the outputs of
//! the passes before it. Per-task vectors are indexed by `TaskIndex`.

mod backward_pass;
mod extraction;
mod forward_pass;
mod slack;
mod types;

pub use backward_pass::{backward_pass, BackwardPassResult};
pub use extraction::extract_critical_path;
pub use forward_pass::{forward_pass, topological_order, ForwardPassResult};
pub use slack::analyze_slack;
pub use types::{slack_tolerance, TaskTiming};
