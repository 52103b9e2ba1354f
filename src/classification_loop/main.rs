use crate::capture_controller::video_sink::VideoSink;
use crate::classification_loop::core::{
    init, transition, Event, LoopError, LoopState, State, Timer, Timing,
};
use crate::config::Config;
use crate::image_classifier::interface::{Classification, ImageClassifier};
use crate::library::lock::lock;
use crate::library::logger::interface::Logger;
use crate::library::scheduler::interface::{Scheduler, TaskHandle};
use std::collections::VecDeque;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
pub(super) struct Session {
    pub model: Arc<dyn ImageClassifier + Send + Sync>,
    pub sink: VideoSink,
}

pub(super) struct Machine {
    pub state: State,
    pub timing: Timing,
    pub session: Option<Session>,
    /// Bumped on every schedule and cancel; a timer whose epoch is behind
    /// fired after it was superseded and is ignored.
    pub timer_epoch: u64,
    pub pending: Option<TaskHandle>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoopNotification {
    Label(Classification),
    Stopped(LoopError),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoopOutput {
    pub label: Option<Classification>,
    pub error: Option<LoopError>,
    pub cycles: u64,
}

pub(super) struct Inner {
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub scheduler: Arc<dyn Scheduler + Send + Sync>,
    pub machine: Mutex<Machine>,
    pub output: Mutex<LoopOutput>,
    pub subscribers: Mutex<Vec<Sender<LoopNotification>>>,
    config: Config,
}

#[derive(Clone)]
pub struct ClassificationLoop {
    pub(super) inner: Arc<Inner>,
}

impl ClassificationLoop {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        scheduler: Arc<dyn Scheduler + Send + Sync>,
    ) -> Self {
        let timing = Timing {
            interval: config.classify_interval,
            ready_poll_interval: config.ready_poll_interval,
            max_ready_attempts: config.max_ready_attempts,
        };

        Self {
            inner: Arc::new(Inner {
                logger: logger.with_namespace("loop"),
                scheduler,
                machine: Mutex::new(Machine {
                    state: init(),
                    timing,
                    session: None,
                    timer_epoch: 0,
                    pending: None,
                }),
                output: Mutex::new(LoopOutput::default()),
                subscribers: Mutex::new(Vec::new()),
                config,
            }),
        }
    }

    pub fn subscribe(&self) -> Receiver<LoopNotification> {
        let (tx, rx) = channel();
        lock(&self.inner.subscribers).push(tx);
        rx
    }

    /// Starts cycling over `sink`. Ignored while a loop is already running.
    pub fn begin_loop(
        &self,
        model: Arc<dyn ImageClassifier + Send + Sync>,
        sink: VideoSink,
        interval: Duration,
    ) {
        let mut machine = lock(&self.inner.machine);

        if machine.state.loop_state() == LoopState::Running {
            let _ = self
                .inner
                .logger
                .info("Loop already running, ignoring begin");
            return;
        }

        machine.timing = Timing {
            interval,
            ready_poll_interval: self.inner.config.ready_poll_interval,
            max_ready_attempts: self.inner.config.max_ready_attempts,
        };
        machine.session = Some(Session { model, sink });
        *lock(&self.inner.output) = LoopOutput::default();

        self.process(&mut machine, Event::Begin);
    }

    pub fn end_loop(&self) {
        self.dispatch(Event::End);
    }

    pub fn loop_state(&self) -> LoopState {
        lock(&self.inner.machine).state.loop_state()
    }

    pub fn output(&self) -> LoopOutput {
        lock(&self.inner.output).clone()
    }

    pub(super) fn dispatch(&self, event: Event) {
        let mut machine = lock(&self.inner.machine);
        self.process(&mut machine, event);
    }

    pub(super) fn on_timer(&self, epoch: u64, timer: Timer) {
        let mut machine = lock(&self.inner.machine);
        if machine.timer_epoch != epoch {
            let _ = self
                .inner
                .logger
                .info(&format!("Dropping superseded {:?} timer", timer));
            return;
        }
        machine.pending = None;
        self.process(&mut machine, Event::TimerFired(timer));
    }

    fn process(&self, machine: &mut Machine, event: Event) {
        let mut queue = VecDeque::from([event]);

        while let Some(event) = queue.pop_front() {
            let _ = self.inner.logger.info(&format!(
                "old state: {:?}, event: {}",
                machine.state,
                event.to_display_string()
            ));

            let (new_state, effects) = transition(&machine.timing, machine.state.clone(), event);

            let _ = self.inner.logger.info(&format!(
                "new state: {:?}, effects: [{}]",
                new_state,
                effects
                    .iter()
                    .map(|effect| effect.to_display_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ));

            machine.state = new_state;

            for effect in effects {
                if let Some(next) = self.run_effect(machine, effect) {
                    queue.push_back(next);
                }
            }
        }
    }
}
