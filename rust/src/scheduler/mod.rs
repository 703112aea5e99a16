//! Scheduler orchestrator.
//!
//! Owns a `TaskGraph`, validates every structural mutation before applying
//! it, and runs the full Critical Path Method recompute on demand. The engine
//! is synchronous and holds no hidden state: callers that share a scheduler
//! across threads must serialize access themselves.

mod core;
mod result;

pub use self::core::Scheduler;
pub use result::{ScheduleResult, TaskSchedule};
