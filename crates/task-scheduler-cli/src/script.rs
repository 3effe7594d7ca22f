//! Operation scripts replayed against a scheduler.
//!
//! A script is a YAML or JSON list such as:
//!
//! ```yaml
//! - { op: submit, id: 1, priority: 10 }
//! - { op: reprioritize, id: 1, priority: 100 }
//! - { op: next }
//! - { op: remove, id: 2 }
//! - { op: drain }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use task_scheduler_core::{Scheduler, SchedulerError, TaskId};
use thiserror::Error;
use tracing::{debug, info};

use crate::output::Dispatched;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Submit { id: TaskId, priority: i64 },
    Reprioritize { id: TaskId, priority: i64 },
    Next,
    Remove { id: TaskId },
    Drain,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Submit { id, priority } => write!(f, "submit {} @ {}", id, priority),
            Operation::Reprioritize { id, priority } => write!(f, "reprioritize {} -> {}", id, priority),
            Operation::Next => write!(f, "next"),
            Operation::Remove { id } => write!(f, "remove {}", id),
            Operation::Drain => write!(f, "drain"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub operations: Vec<Operation>,
}

impl Script {
    /// Load a script, parsing `.json` files as JSON and anything else as YAML
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let script = if is_json {
            serde_json::from_str(&contents)?
        } else {
            serde_yaml::from_str(&contents)?
        };
        Ok(script)
    }
}

#[derive(Error, Debug)]
#[error("step {step} ({operation}) failed")]
pub struct ReplayError {
    pub step: usize,
    pub operation: Operation,
    #[source]
    pub source: SchedulerError,
}

/// Apply every operation in order, collecting each task that leaves the
/// scheduler. Stops at the first failing operation.
pub fn replay(scheduler: &mut Scheduler, script: &Script) -> Result<Vec<Dispatched>, ReplayError> {
    let mut dispatched = Vec::new();

    for (index, operation) in script.operations.iter().enumerate() {
        let step = index + 1;
        debug!(step, %operation, "Applying operation");

        let fail = |source| ReplayError {
            step,
            operation: operation.clone(),
            source,
        };

        match *operation {
            Operation::Submit { id, priority } => scheduler.submit(id, priority).map_err(fail)?,
            Operation::Reprioritize { id, priority } => {
                scheduler.change_task_priority(id, priority).map_err(fail)?
            }
            Operation::Next => {
                let task = scheduler.get_task().map_err(fail)?;
                dispatched.push(Dispatched::new(step, task));
            }
            Operation::Remove { id } => {
                let task = scheduler.remove_task(id).map_err(fail)?;
                dispatched.push(Dispatched::new(step, task));
            }
            Operation::Drain => {
                dispatched.extend(scheduler.drain().into_iter().map(|task| Dispatched::new(step, task)));
            }
        }
    }

    info!(
        steps = script.operations.len(),
        dispatched = dispatched.len(),
        pending = scheduler.len(),
        "Replay finished"
    );
    Ok(dispatched)
}

/// Five tasks, two dispatches, a boost for the lowest one, two more dispatches
pub fn demo_script() -> Script {
    let mut operations: Vec<Operation> = (1..=5)
        .map(|id| Operation::Submit {
            id,
            priority: id as i64 * 10,
        })
        .collect();
    operations.extend([
        Operation::Next,
        Operation::Next,
        Operation::Reprioritize { id: 1, priority: 100 },
        Operation::Next,
        Operation::Next,
    ]);
    Script { operations }
}
