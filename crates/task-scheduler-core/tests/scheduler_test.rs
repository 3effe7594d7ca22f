// Integration tests for the scheduler and its heap

use std::collections::HashMap;

use proptest::prelude::*;
use task_scheduler_core::{
    Priority, PriorityHeap, Scheduler, SchedulerConfig, SchedulerError, Task, TaskId,
    UnknownTaskPolicy,
};

fn assert_heap_property(heap: &PriorityHeap) {
    let tasks = heap.as_slice();
    for i in 1..tasks.len() {
        let parent = (i - 1) / 2;
        assert!(
            tasks[i].priority <= tasks[parent].priority,
            "{} at slot {} outranks its parent {} at slot {}",
            tasks[i],
            i,
            tasks[parent],
            parent
        );
    }
}

#[test]
fn test_scheduler_scenario() {
    let mut scheduler = Scheduler::new();
    for (id, priority) in [(1, 10), (2, 20), (3, 30), (4, 40), (5, 50)] {
        scheduler.add_task(Task::new(id, priority)).unwrap();
    }

    assert_eq!(scheduler.get_task().unwrap().priority, Priority::new(50));
    assert_eq!(scheduler.get_task().unwrap().priority, Priority::new(40));

    scheduler.change_task_priority(1, 100).unwrap();

    assert_eq!(scheduler.get_task().unwrap(), Task::new(1, 100));
    assert_eq!(scheduler.get_task().unwrap().priority, Priority::new(30));
    assert_eq!(scheduler.len(), 1);
}

#[test]
fn test_fresh_scheduler_is_empty() {
    let mut scheduler = Scheduler::new();
    assert!(scheduler.is_empty());
    match scheduler.get_task() {
        Err(SchedulerError::Empty) => {}
        other => panic!("Expected Empty error, got {:?}", other),
    }
}

#[test]
fn test_reprioritize_down_moves_behind_siblings() {
    let mut scheduler = Scheduler::new();
    for (id, priority) in [(1, 90), (2, 80), (3, 70), (4, 60)] {
        scheduler.submit(id, priority).unwrap();
    }

    scheduler.change_task_priority(1, 65).unwrap();

    let order: Vec<TaskId> = std::iter::from_fn(|| scheduler.get_task().ok())
        .map(|task| task.id)
        .collect();
    assert_eq!(order, vec![2, 3, 1, 4]);
}

#[test]
fn test_error_messages() {
    assert_eq!(SchedulerError::Empty.to_string(), "Scheduler is empty");
    assert_eq!(SchedulerError::DuplicateTask(3).to_string(), "Task already exists: 3");
    assert_eq!(SchedulerError::TaskNotFound(9).to_string(), "Task not found: 9");
}

#[derive(Debug, Clone)]
enum Op {
    Submit(TaskId, i64),
    Reprioritize(TaskId, i64),
    Next,
    Remove(TaskId),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    // Small id space so reprioritize and remove usually hit resident tasks.
    prop_oneof![
        3 => (0u64..32, -1000i64..1000).prop_map(|(id, p)| Op::Submit(id, p)),
        2 => (0u64..32, -1000i64..1000).prop_map(|(id, p)| Op::Reprioritize(id, p)),
        2 => Just(Op::Next),
        1 => (0u64..32).prop_map(Op::Remove),
    ]
}

proptest! {
    #[test]
    fn prop_matches_reference_model(ops in prop::collection::vec(op_strategy(), 0..200)) {
        let mut scheduler = Scheduler::new();
        let mut model: HashMap<TaskId, i64> = HashMap::new();

        for op in ops {
            match op {
                Op::Submit(id, p) => {
                    let result = scheduler.submit(id, p);
                    if model.contains_key(&id) {
                        prop_assert_eq!(result, Err(SchedulerError::DuplicateTask(id)));
                    } else {
                        prop_assert!(result.is_ok());
                        model.insert(id, p);
                    }
                }
                Op::Reprioritize(id, p) => {
                    prop_assert!(scheduler.change_task_priority(id, p).is_ok());
                    if let Some(slot) = model.get_mut(&id) {
                        *slot = p;
                    }
                }
                Op::Next => {
                    match scheduler.get_task() {
                        Ok(task) => {
                            let max = model.values().copied().max();
                            prop_assert_eq!(Some(task.priority.value()), max);
                            prop_assert_eq!(model.remove(&task.id), Some(task.priority.value()));
                        }
                        Err(err) => {
                            prop_assert_eq!(err, SchedulerError::Empty);
                            prop_assert!(model.is_empty());
                        }
                    }
                }
                Op::Remove(id) => {
                    match model.remove(&id) {
                        Some(p) => prop_assert_eq!(scheduler.remove_task(id), Ok(Task::new(id, p))),
                        None => prop_assert_eq!(scheduler.remove_task(id), Err(SchedulerError::TaskNotFound(id))),
                    }
                }
            }

            assert_heap_property(scheduler.heap());
            prop_assert_eq!(scheduler.len(), model.len());
            for (&id, &p) in &model {
                prop_assert_eq!(scheduler.priority_of(id), Some(Priority::new(p)));
            }
        }
    }

    #[test]
    fn prop_size_accounting(priorities in prop::collection::vec(any::<i64>(), 0..100), extracts in 0usize..100) {
        let mut scheduler = Scheduler::new();
        for (id, &p) in priorities.iter().enumerate() {
            scheduler.submit(id as TaskId, p).unwrap();
        }

        let m = extracts.min(priorities.len());
        for _ in 0..m {
            scheduler.get_task().unwrap();
        }
        prop_assert_eq!(scheduler.len(), priorities.len() - m);
    }

    #[test]
    fn prop_unknown_reprioritize_is_noop(
        priorities in prop::collection::vec(-100i64..100, 1..50),
        new_priority in any::<i64>(),
    ) {
        let mut scheduler = Scheduler::new();
        for (id, &p) in priorities.iter().enumerate() {
            scheduler.submit(id as TaskId, p).unwrap();
        }
        let before = scheduler.heap().as_slice().to_vec();

        scheduler.change_task_priority(priorities.len() as TaskId + 1, new_priority).unwrap();

        prop_assert_eq!(scheduler.heap().as_slice(), before.as_slice());
    }

    #[test]
    fn prop_drain_is_descending(priorities in prop::collection::vec(any::<i64>(), 0..100)) {
        let mut scheduler = Scheduler::new();
        for (id, &p) in priorities.iter().enumerate() {
            scheduler.submit(id as TaskId, p).unwrap();
        }

        let drained = scheduler.drain();
        prop_assert_eq!(drained.len(), priorities.len());
        prop_assert!(drained.windows(2).all(|w| w[0].priority >= w[1].priority));
    }
}

#[test]
fn test_reject_policy_keeps_heap_unchanged() {
    let mut scheduler = Scheduler::with_config(SchedulerConfig {
        unknown_task: UnknownTaskPolicy::Reject,
        initial_capacity: 16,
    })
    .unwrap();
    scheduler.submit(1, 1).unwrap();
    scheduler.submit(2, 2).unwrap();
    let before = scheduler.heap().as_slice().to_vec();

    assert!(scheduler.change_task_priority(3, 100).is_err());
    assert_eq!(scheduler.heap().as_slice(), before.as_slice());
}
