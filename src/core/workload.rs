//! Aggregate inputs derived from a set of tasks.

use super::Task;
use crate::common::mean;
use serde::{Deserialize, Serialize};

/// Summary of the active tasks held by one employee or system.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveWorkload {
    pub task_count: usize,
    /// Sum of effective work weights.
    pub total_weight: f64,
    /// Mean priority, 0 when there are no active tasks.
    pub average_priority: f64,
}

impl ActiveWorkload {
    /// Summarizes the active tasks among `tasks`; inactive tasks are skipped.
    pub fn from_tasks<'a, I>(tasks: I) -> Self
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let active: Vec<&Task> = tasks.into_iter().filter(|task| task.is_active()).collect();
        Self {
            task_count: active.len(),
            total_weight: active.iter().map(|task| task.effective_work_weight()).sum(),
            average_priority: mean(active.iter().map(|task| f64::from(task.priority))),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.task_count == 0
    }
}
