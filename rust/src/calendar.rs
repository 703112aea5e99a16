//! Calendar projection of a computed schedule.
//!
//! Schedule times are unitless offsets from the project start. Renderers that
//! draw on a date axis can project them here, treating one unit as one
//! calendar day. Starts round down and finishes round up to whole days, so a
//! projected bar always covers its fractional span. Finish dates are
//! exclusive: a 3-day task starting on the 1st finishes on the 4th.

use chrono::{Days, NaiveDate};
#[cfg(feature = "python")]
use pyo3::prelude::*;
use thiserror::Error;

use crate::scheduler::ScheduleResult;

/// Errors that can occur during calendar projection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Date out of range: {0}")]
    OutOfRange(String),
}

/// One task's schedule on the calendar.
#[cfg_attr(feature = "python", pyclass(get_all))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarTask {
    pub id: String,
    pub earliest_start: NaiveDate,
    pub earliest_finish: NaiveDate,
    pub latest_start: NaiveDate,
    pub latest_finish: NaiveDate,
    pub is_critical: bool,
}

/// A `ScheduleResult` anchored at a start date.
#[cfg_attr(feature = "python", pyclass(get_all))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarSchedule {
    pub start: NaiveDate,
    pub project_end: NaiveDate,
    /// Rows in the same order as the source result.
    pub tasks: Vec<CalendarTask>,
}

fn offset_date(
    start: NaiveDate,
    offset_days: f64,
    round_up: bool,
    what: &str,
) -> Result<NaiveDate, CalendarError> {
    let whole = if round_up {
        offset_days.ceil()
    } else {
        offset_days.floor()
    };
    start
        .checked_add_days(Days::new(whole.max(0.0) as u64))
        .ok_or_else(|| CalendarError::OutOfRange(format!("{} = {} + {} days", what, start, whole)))
}

/// Project a schedule onto calendar days starting at `start`.
pub fn project(result: &ScheduleResult, start: NaiveDate) -> Result<CalendarSchedule, CalendarError> {
    let tasks = result
        .tasks()
        .iter()
        .map(|t| -> Result<CalendarTask, CalendarError> {
            Ok(CalendarTask {
                id: t.id.clone(),
                earliest_start: offset_date(start, t.earliest_start, false, &t.id)?,
                earliest_finish: offset_date(start, t.earliest_finish, true, &t.id)?,
                latest_start: offset_date(start, t.latest_start, false, &t.id)?,
                latest_finish: offset_date(start, t.latest_finish, true, &t.id)?,
                is_critical: t.is_critical,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CalendarSchedule {
        start,
        project_end: offset_date(start, result.project_end(), true, "project end")?,
        tasks,
    })
}
