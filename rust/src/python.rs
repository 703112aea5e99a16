//! Python bindings (cargo feature `python`).

use chrono::NaiveDate;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::calendar::{self, CalendarSchedule, CalendarTask};
use crate::config::SchedulerConfig;
use crate::graph::GraphError;
use crate::models::{Dependency, Task};
use crate::scheduler::{ScheduleResult, Scheduler, TaskSchedule};

fn to_py_err(err: GraphError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Schedule snapshot (PyO3 wrapper).
#[pyclass(name = "ScheduleResult")]
#[derive(Clone, Debug)]
pub struct PyScheduleResult {
    inner: ScheduleResult,
}

#[pymethods]
impl PyScheduleResult {
    #[getter]
    fn project_end(&self) -> f64 {
        self.inner.project_end()
    }

    #[getter]
    fn critical_path(&self) -> Vec<String> {
        self.inner.critical_path().to_vec()
    }

    #[getter]
    fn tasks(&self) -> Vec<TaskSchedule> {
        self.inner.tasks().to_vec()
    }

    fn get(&self, id: &str) -> Option<TaskSchedule> {
        self.inner.get(id).cloned()
    }

    /// Project onto calendar days, one unit per day, starting at `start`.
    fn project(&self, start: NaiveDate) -> PyResult<CalendarSchedule> {
        calendar::project(&self.inner, start).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduleResult(tasks={}, project_end={}, critical_path={:?})",
            self.inner.len(),
            self.inner.project_end(),
            self.inner.critical_path()
        )
    }
}

/// Critical path scheduler (PyO3 wrapper).
#[pyclass(name = "Scheduler")]
pub struct PyScheduler {
    inner: Scheduler,
}

#[pymethods]
impl PyScheduler {
    #[new]
    #[pyo3(signature = (tasks=Vec::new(), dependencies=Vec::new(), config=None))]
    fn new(
        tasks: Vec<(String, f64)>,
        dependencies: Vec<(String, String)>,
        config: Option<SchedulerConfig>,
    ) -> PyResult<Self> {
        let inner = Scheduler::from_parts(
            tasks.into_iter().map(|(id, duration)| Task::new(id, duration)),
            dependencies.into_iter().map(|(p, s)| Dependency::new(p, s)),
            config.unwrap_or_default(),
        )
        .map_err(to_py_err)?;
        Ok(Self { inner })
    }

    fn add_task(&mut self, id: &str, duration: f64) -> PyResult<()> {
        self.inner.add_task(id, duration).map_err(to_py_err)
    }

    fn remove_task(&mut self, id: &str) -> PyResult<()> {
        self.inner.remove_task(id).map_err(to_py_err)
    }

    fn add_dependency(&mut self, predecessor: &str, successor: &str) -> PyResult<()> {
        self.inner
            .add_dependency(predecessor, successor)
            .map_err(to_py_err)
    }

    fn remove_dependency(&mut self, predecessor: &str, successor: &str) -> PyResult<()> {
        self.inner
            .remove_dependency(predecessor, successor)
            .map_err(to_py_err)
    }

    fn set_duration(&mut self, id: &str, duration: f64) -> PyResult<()> {
        self.inner.set_duration(id, duration).map_err(to_py_err)
    }

    /// Task records as (id, duration) tuples in insertion order.
    fn tasks(&self) -> Vec<(String, f64)> {
        self.inner
            .tasks()
            .into_iter()
            .map(|t| (t.id, t.duration))
            .collect()
    }

    /// Dependency records as (predecessor, successor) tuples in insertion order.
    fn dependencies(&self) -> Vec<(String, String)> {
        self.inner
            .dependencies()
            .into_iter()
            .map(|d| (d.predecessor, d.successor))
            .collect()
    }

    fn recompute(&self) -> PyScheduleResult {
        PyScheduleResult {
            inner: self.inner.recompute(),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Scheduler(tasks={}, dependencies={})",
            self.inner.graph().task_count(),
            self.inner.graph().dependency_count()
        )
    }
}

/// The critpath Python module.
#[pymodule]
fn critpath(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<SchedulerConfig>()?;
    m.add_class::<TaskSchedule>()?;
    m.add_class::<PyScheduleResult>()?;
    m.add_class::<CalendarSchedule>()?;
    m.add_class::<CalendarTask>()?;
    m.add_class::<PyScheduler>()?;
    Ok(())
}
