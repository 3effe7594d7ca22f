//! Array-backed binary max-heap of tasks keyed by priority.
//!
//! Storage is a dense `Vec<Task>` laid out as a complete binary tree:
//! the parent of slot `i` is `(i - 1) / 2` and its children are `2i + 1`
//! and `2i + 2`. A side table maps every resident `TaskId` to its current
//! slot so a task can be located without scanning.
//!
//! # Invariants
//!
//! - For every slot `i > 0`: `tasks[i].priority <= tasks[parent(i)].priority`
//! - For every slot `i`: `positions[&tasks[i].id] == i`
//! - `positions.len() == tasks.len()`
//!
//! Equal priorities are ordered by heap structure only. Nothing here
//! guarantees FIFO among ties.

use std::collections::HashMap;

use crate::{Priority, Result, SchedulerError, Task, TaskId};

/// Binary max-heap with O(1) lookup by task id.
#[derive(Debug, Clone, Default)]
pub struct PriorityHeap {
    tasks: Vec<Task>,
    positions: HashMap<TaskId, usize>,
}

#[inline]
fn parent(index: usize) -> Option<usize> {
    if index == 0 {
        None
    } else {
        Some((index - 1) / 2)
    }
}

#[inline]
fn left(index: usize) -> usize {
    2 * index + 1
}

#[inline]
fn right(index: usize) -> usize {
    2 * index + 2
}

impl PriorityHeap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        PriorityHeap {
            tasks: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Highest-priority task, without removing it
    pub fn peek(&self) -> Option<&Task> {
        self.tasks.first()
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.positions.contains_key(&id)
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.positions.get(&id).map(|&index| &self.tasks[index])
    }

    /// Storage in heap order (root first)
    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    /// Iterate over resident tasks in storage order
    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
        self.positions.clear();
    }

    /// Append a task and sift it up to its place.
    ///
    /// Fails with `DuplicateTask` if the id is already resident; the heap is
    /// left unchanged.
    pub fn insert(&mut self, task: Task) -> Result<()> {
        if self.positions.contains_key(&task.id) {
            return Err(SchedulerError::DuplicateTask(task.id));
        }
        let index = self.tasks.len();
        self.positions.insert(task.id, index);
        self.tasks.push(task);
        self.sift_up(index);
        Ok(())
    }

    /// Remove and return the highest-priority task
    pub fn extract_max(&mut self) -> Option<Task> {
        if self.tasks.is_empty() {
            return None;
        }
        Some(self.remove_at(0))
    }

    /// Overwrite the priority of a resident task and restore heap order.
    ///
    /// Returns the previous priority, or `None` when no task has this id
    /// (the heap is left untouched).
    pub fn change_priority(&mut self, id: TaskId, new_priority: Priority) -> Option<Priority> {
        let index = *self.positions.get(&id)?;
        let old_priority = self.tasks[index].priority;
        self.tasks[index].priority = new_priority;

        if new_priority > old_priority {
            self.sift_up(index);
        } else if new_priority < old_priority {
            self.sift_down(index);
        }

        Some(old_priority)
    }

    /// Remove a task by id, wherever it sits in the heap
    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        let index = *self.positions.get(&id)?;
        Some(self.remove_at(index))
    }

    /// Consume the heap, returning tasks from highest to lowest priority
    pub fn into_sorted_vec(mut self) -> Vec<Task> {
        let mut sorted = Vec::with_capacity(self.tasks.len());
        while let Some(task) = self.extract_max() {
            sorted.push(task);
        }
        sorted
    }

    fn remove_at(&mut self, index: usize) -> Task {
        let removed = self.tasks.swap_remove(index);
        self.positions.remove(&removed.id);

        // The former last leaf now sits at `index` and may belong above or
        // below it.
        if index < self.tasks.len() {
            self.positions.insert(self.tasks[index].id, index);
            if !self.sift_up(index) {
                self.sift_down(index);
            }
        }

        removed
    }

    /// Returns `true` if the element moved.
    fn sift_up(&mut self, mut index: usize) -> bool {
        let start = index;
        while let Some(parent_index) = parent(index) {
            if self.tasks[index].priority > self.tasks[parent_index].priority {
                self.swap(index, parent_index);
                index = parent_index;
            } else {
                break;
            }
        }
        index != start
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.tasks.len();
        loop {
            let mut largest = index;
            let left_index = left(index);
            let right_index = right(index);

            if left_index < len && self.tasks[left_index].priority > self.tasks[largest].priority {
                largest = left_index;
            }
            if right_index < len && self.tasks[right_index].priority > self.tasks[largest].priority {
                largest = right_index;
            }
            if largest == index {
                break;
            }

            self.swap(index, largest);
            index = largest;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.tasks.swap(a, b);
        self.positions.insert(self.tasks[a].id, a);
        self.positions.insert(self.tasks[b].id, b);
    }
}

impl<'a> IntoIterator for &'a PriorityHeap {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Later tasks reusing an id already collected are dropped.
impl FromIterator<Task> for PriorityHeap {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        let mut heap = PriorityHeap::new();
        for task in iter {
            let _ = heap.insert(task);
        }
        heap
    }
}
