use tracing::{debug, trace, warn};

use crate::heap::PriorityHeap;
use crate::{Priority, Result, SchedulerConfig, SchedulerError, Task, TaskId, UnknownTaskPolicy};

/// Hands out pending tasks highest priority first.
///
/// The scheduler is single-threaded plain data. Callers that share one
/// across threads must wrap it in their own lock.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    heap: PriorityHeap,
    config: SchedulerConfig,
}

impl Scheduler {
    /// Create an empty scheduler with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SchedulerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Scheduler {
            heap: PriorityHeap::with_capacity(config.initial_capacity),
            config,
        })
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Submit a task.
    ///
    /// Ids must be unique among resident tasks; a second task with the same
    /// id is rejected with `DuplicateTask` and the scheduler is unchanged.
    pub fn add_task(&mut self, task: Task) -> Result<()> {
        if let Err(err) = self.heap.insert(task) {
            warn!(task_id = task.id, "Rejecting duplicate task");
            return Err(err);
        }
        debug!(task_id = task.id, priority = %task.priority, pending = self.heap.len(), "Task submitted");
        Ok(())
    }

    /// Shorthand for `add_task(Task::new(id, priority))`
    pub fn submit(&mut self, id: TaskId, priority: impl Into<Priority>) -> Result<()> {
        self.add_task(Task::new(id, priority))
    }

    /// Change the priority of a pending task in place.
    ///
    /// An unknown id is silently ignored under `UnknownTaskPolicy::Ignore`
    /// (the default) and fails with `TaskNotFound` under
    /// `UnknownTaskPolicy::Reject`.
    pub fn change_task_priority(&mut self, id: TaskId, new_priority: impl Into<Priority>) -> Result<()> {
        let new_priority = new_priority.into();
        match self.heap.change_priority(id, new_priority) {
            Some(old_priority) => {
                debug!(task_id = id, from = %old_priority, to = %new_priority, "Task reprioritized");
                Ok(())
            }
            None => match self.config.unknown_task {
                UnknownTaskPolicy::Ignore => {
                    trace!(task_id = id, "Ignoring reprioritize for unknown task");
                    Ok(())
                }
                UnknownTaskPolicy::Reject => {
                    warn!(task_id = id, "Reprioritize for unknown task");
                    Err(SchedulerError::TaskNotFound(id))
                }
            },
        }
    }

    /// Remove and return the highest-priority task
    pub fn get_task(&mut self) -> Result<Task> {
        let task = self.heap.extract_max().ok_or(SchedulerError::Empty)?;
        debug!(task_id = task.id, priority = %task.priority, pending = self.heap.len(), "Task dispatched");
        Ok(task)
    }

    /// Next task to be dispatched, without removing it
    pub fn peek_task(&self) -> Option<&Task> {
        self.heap.peek()
    }

    /// Cancel a pending task
    pub fn remove_task(&mut self, id: TaskId) -> Result<Task> {
        let task = self.heap.remove(id).ok_or(SchedulerError::TaskNotFound(id))?;
        debug!(task_id = id, pending = self.heap.len(), "Task removed");
        Ok(task)
    }

    pub fn priority_of(&self, id: TaskId) -> Option<Priority> {
        self.heap.get(id).map(|task| task.priority)
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.heap.contains(id)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        debug!(dropped = self.heap.len(), "Scheduler cleared");
        self.heap.clear();
    }

    /// Remove every pending task, in dispatch order
    pub fn drain(&mut self) -> Vec<Task> {
        let heap = std::mem::take(&mut self.heap);
        let tasks = heap.into_sorted_vec();
        debug!(drained = tasks.len(), "Scheduler drained");
        tasks
    }

    /// Read-only view of the underlying heap
    pub fn heap(&self) -> &PriorityHeap {
        &self.heap
    }
}
