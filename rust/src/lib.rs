//! Critical Path Method scheduling engine for task dependency graphs.
//!
//! Tasks carry a duration; dependencies are finish-to-start edges. The
//! `Scheduler` validates every structural mutation (unknown ids, duplicates,
//! self-loops, cycles) before applying it, and `Scheduler::recompute` runs a
//! full forward pass, backward pass, slack analysis and critical path
//! extraction over the current graph.
//!
//! ```
//! use critpath::{Scheduler, SchedulerConfig};
//!
//! let mut scheduler = Scheduler::new(SchedulerConfig::default());
//! scheduler.add_task("design", 3.0).unwrap();
//! scheduler.add_task("build", 5.0).unwrap();
//! scheduler.add_dependency("design", "build").unwrap();
//!
//! let result = scheduler.recompute();
//! assert_eq!(result.project_end(), 8.0);
//! assert_eq!(result.critical_path(), ["design", "build"]);
//! ```

// Allow clippy warning triggered by PyO3 macro expansion
#![cfg_attr(feature = "python", allow(clippy::useless_conversion))]

pub mod calendar;
mod config;
pub mod critical_path;
pub mod graph;
mod interner;
pub mod logging;
mod models;
#[cfg(feature = "python")]
mod python;
mod scheduler;

pub use calendar::{project, CalendarError, CalendarSchedule, CalendarTask};
pub use config::{ConfigError, SchedulerConfig, TieBreak, DEFAULT_CRITICAL_EPSILON};
pub use critical_path::TaskTiming;
pub use graph::{GraphError, TaskGraph};
pub use interner::TaskIndex;
pub use models::{Dependency, Task};
pub use scheduler::{ScheduleResult, Scheduler, TaskSchedule};
