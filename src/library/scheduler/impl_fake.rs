use crate::library::lock::lock;
use crate::library::scheduler::interface::{Scheduler, Task, TaskHandle, TaskId};
use std::sync::Mutex;
use std::time::Duration;

struct Pending {
    due: Duration,
    handle: TaskHandle,
    task: Task,
}

#[derive(Default)]
struct Clock {
    now: Duration,
    next_id: u64,
    queue: Vec<Pending>,
}

/// Manual clock. Nothing runs until `advance` is called; tasks scheduled by a
/// running task are picked up in the same `advance` if they fall due.
#[derive(Default)]
pub struct SchedulerFake {
    clock: Mutex<Clock>,
}

#[allow(dead_code)]
impl SchedulerFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        lock(&self.clock).now
    }

    /// Runs every task due at the current instant.
    pub fn run_pending(&self) {
        self.advance(Duration::ZERO);
    }

    pub fn advance(&self, by: Duration) {
        let target = lock(&self.clock).now + by;

        loop {
            let next = {
                let mut clock = lock(&self.clock);
                let position = clock
                    .queue
                    .iter()
                    .enumerate()
                    .filter(|(_, pending)| pending.due <= target)
                    .min_by_key(|(_, pending)| (pending.due, pending.handle.id()))
                    .map(|(position, _)| position);

                match position {
                    Some(position) => {
                        let pending = clock.queue.remove(position);
                        clock.now = pending.due;
                        Some(pending)
                    }
                    None => None,
                }
            };

            match next {
                Some(pending) if pending.handle.is_cancelled() => continue,
                Some(pending) => (pending.task)(),
                None => break,
            }
        }

        lock(&self.clock).now = target;
    }

    /// Number of scheduled tasks that are neither run nor cancelled.
    pub fn pending_count(&self) -> usize {
        lock(&self.clock)
            .queue
            .iter()
            .filter(|pending| !pending.handle.is_cancelled())
            .count()
    }
}

impl Scheduler for SchedulerFake {
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle {
        let mut clock = lock(&self.clock);
        let handle = TaskHandle::new(TaskId(clock.next_id));
        clock.next_id += 1;
        let due = clock.now + delay;
        clock.queue.push(Pending {
            due,
            handle: handle.clone(),
            task,
        });
        handle
    }
}
