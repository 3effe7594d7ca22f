use serde::{Deserialize, Serialize};

use crate::{Result, SchedulerError};

/// Upper bound on pre-allocated heap slots, guards against typos in config files
pub const MAX_INITIAL_CAPACITY: usize = 1 << 24;

/// What `change_task_priority` does when the id is not resident
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownTaskPolicy {
    /// Leave the scheduler untouched and report success
    #[default]
    Ignore,
    /// Fail with `SchedulerError::TaskNotFound`
    Reject,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub unknown_task: UnknownTaskPolicy,
    pub initial_capacity: usize,
}

impl SchedulerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity > MAX_INITIAL_CAPACITY {
            return Err(SchedulerError::Config(format!(
                "initial_capacity {} exceeds maximum of {}",
                self.initial_capacity, MAX_INITIAL_CAPACITY
            )));
        }
        Ok(())
    }
}
