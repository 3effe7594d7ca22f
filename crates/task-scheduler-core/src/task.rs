use crate::Priority;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-assigned identifier, unique among resident tasks
pub type TaskId = u64;

/// A pending work item waiting to be scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Task {
    /// Stable task identifier used for reprioritization
    pub id: TaskId,

    /// Current priority (higher = served first)
    pub priority: Priority,
}

impl Task {
    /// Create a new task
    pub fn new(id: TaskId, priority: impl Into<Priority>) -> Self {
        Task {
            id,
            priority: priority.into(),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task {} (priority {})", self.id, self.priority)
    }
}
