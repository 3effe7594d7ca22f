//! Task Scheduler Core Library
//!
//! Priority-ordered task storage with in-place reprioritization by task id.

mod config;
mod error;
pub mod heap;
mod priority;
mod scheduler;
mod task;

pub use config::{SchedulerConfig, UnknownTaskPolicy};
pub use error::{Result, SchedulerError};
pub use heap::PriorityHeap;
pub use priority::Priority;
pub use scheduler::Scheduler;
pub use task::{Task, TaskId};
