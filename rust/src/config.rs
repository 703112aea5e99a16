//! Configuration types for the scheduling engine.

use std::str::FromStr;

#[cfg(feature = "python")]
use pyo3::prelude::*;
use thiserror::Error;

/// Default tolerance for slack comparisons, relative to the project length.
pub const DEFAULT_CRITICAL_EPSILON: f64 = 1e-9;

/// Errors raised while parsing configuration values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Unknown tie-break strategy: {0} (expected \"lowest_id\" or \"longest_duration\")")]
    UnknownTieBreak(String),
    #[error("Invalid critical epsilon: {0} (must be finite and non-negative)")]
    InvalidEpsilon(f64),
}

/// How to choose between equally valid candidates when extracting the
/// critical path (parallel critical branches, or several critical sinks).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// Lexicographically smallest task id.
    #[default]
    LowestId,
    /// Largest duration, lowest id among equals.
    LongestDuration,
}

impl TieBreak {
    pub fn as_str(&self) -> &'static str {
        match self {
            TieBreak::LowestId => "lowest_id",
            TieBreak::LongestDuration => "longest_duration",
        }
    }
}

impl FromStr for TieBreak {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lowest_id" => Ok(TieBreak::LowestId),
            "longest_duration" => Ok(TieBreak::LongestDuration),
            other => Err(ConfigError::UnknownTieBreak(other.to_string())),
        }
    }
}

/// Configuration for the scheduler.
#[cfg_attr(feature = "python", pyclass)]
#[derive(Clone, Debug, PartialEq)]
pub struct SchedulerConfig {
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub verbosity: u8,
    /// Slack tolerance, relative to the project length.
    #[cfg_attr(feature = "python", pyo3(get))]
    pub critical_epsilon: f64,
    /// Tie-break used by critical path extraction.
    pub tie_break: TieBreak,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            critical_epsilon: DEFAULT_CRITICAL_EPSILON,
            tie_break: TieBreak::default(),
        }
    }
}

impl SchedulerConfig {
    /// Build a validated configuration.
    pub fn new(verbosity: u8, critical_epsilon: f64, tie_break: TieBreak) -> Result<Self, ConfigError> {
        let config = Self {
            verbosity,
            critical_epsilon,
            tie_break,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check field values that struct literals can get wrong.
    ///
    /// `recompute` never fails on an invalid epsilon (it falls back to the
    /// rounding floor), but the configuration surfaces reject one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.critical_epsilon.is_finite() && self.critical_epsilon >= 0.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidEpsilon(self.critical_epsilon))
        }
    }
}

#[cfg(feature = "python")]
fn to_py_err(err: ConfigError) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(err.to_string())
}

#[cfg(feature = "python")]
#[pymethods]
impl SchedulerConfig {
    #[new]
    #[pyo3(signature = (verbosity=0, critical_epsilon=DEFAULT_CRITICAL_EPSILON, tie_break="lowest_id"))]
    fn py_new(verbosity: u8, critical_epsilon: f64, tie_break: &str) -> PyResult<Self> {
        let tie_break = tie_break.parse().map_err(to_py_err)?;
        Self::new(verbosity, critical_epsilon, tie_break).map_err(to_py_err)
    }

    #[setter(critical_epsilon)]
    fn py_set_critical_epsilon(&mut self, value: f64) -> PyResult<()> {
        let updated = Self {
            critical_epsilon: value,
            ..self.clone()
        };
        updated.validate().map_err(to_py_err)?;
        self.critical_epsilon = value;
        Ok(())
    }

    #[getter(tie_break)]
    fn py_tie_break(&self) -> &'static str {
        self.tie_break.as_str()
    }

    fn __repr__(&self) -> String {
        format!(
            "SchedulerConfig(verbosity={}, critical_epsilon={}, tie_break={:?})",
            self.verbosity,
            self.critical_epsilon,
            self.tie_break.as_str()
        )
    }
}
