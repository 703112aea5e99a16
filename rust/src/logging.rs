//! Verbosity-gated logging for the scheduler.
//!
//! Every line goes to stderr with a `[critpath]` prefix. Nothing is formatted
//! unless the level is enabled.
//! - 0: SILENT
//! - 1: CHANGES (accepted graph mutations, recompute summaries)
//! - 2: CHECKS (rejected mutations, tagged by kind)
//! - 3: DEBUG (topological order, per-task timings)

use crate::graph::GraphError;

pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_CHANGES: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Short tag for a rejected mutation, so cycle rejections can be grepped
/// apart from plain input mistakes.
pub fn rejection_kind(err: &GraphError) -> &'static str {
    match err {
        GraphError::CycleDetected { .. } => "cycle",
        GraphError::DuplicateTaskId(_) | GraphError::DuplicateDependency { .. } => "duplicate",
        GraphError::UnknownTaskReference(_) | GraphError::DependencyNotFound { .. } => "missing",
        GraphError::SelfDependency(_) => "self-loop",
        GraphError::InvalidDuration { .. } => "duration",
    }
}

/// Log at CHANGES level (verbosity >= 1).
#[macro_export]
macro_rules! log_changes {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHANGES {
            eprintln!("[critpath] {}", format_args!($($arg)*));
        }
    };
}

/// Log a rejected mutation at CHECKS level (verbosity >= 2).
///
/// `$err` is a `&GraphError`; the line carries its `rejection_kind` tag.
#[macro_export]
macro_rules! log_rejected {
    ($verbosity:expr, $operation:expr, $err:expr) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHECKS {
            let err: &$crate::graph::GraphError = $err;
            eprintln!(
                "[critpath] Rejected {} [{}]: {}",
                $operation,
                $crate::logging::rejection_kind(err),
                err
            );
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!("[critpath] {}", format_args!($($arg)*));
        }
    };
}
