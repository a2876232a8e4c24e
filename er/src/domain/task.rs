//! Planning tasks
//!
//! Only the completed / not-completed partition is used by the engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Overdue,
}

/// A planning task
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Task {
    /// Task identifier
    pub id: String,

    /// Short description
    pub title: String,

    /// Current status
    pub status: TaskStatus,

    /// Due date, if scheduled
    pub due_date: Option<NaiveDate>,
}

impl Task {
    /// Create a task with the given status
    pub fn new(id: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            id: id.into(),
            status,
            ..Default::default()
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}
