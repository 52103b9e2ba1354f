use crate::library::scheduler::interface::{Scheduler, Task, TaskHandle, TaskId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// One thread per task, sleeping out the delay before running it.
#[derive(Debug, Default)]
pub struct SchedulerThread {
    next_id: AtomicU64,
}

impl SchedulerThread {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for SchedulerThread {
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle {
        let handle = TaskHandle::new(TaskId(self.next_id.fetch_add(1, Ordering::SeqCst)));
        let task_handle = handle.clone();

        std::thread::spawn(move || {
            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
            if task_handle.is_cancelled() {
                return;
            }
            task();
        });

        handle
    }
}
