use crate::capture_controller::video_sink::{SinkFrame, SourceId};
use crate::image_classifier::interface::{top, Classification, ClassificationError};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub interval: Duration,
    pub ready_poll_interval: Duration,
    /// Frame checks before giving up, the first one included.
    pub max_ready_attempts: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoopError {
    #[error("Video not ready: no frame after {attempts} checks")]
    FrameNotReady { attempts: u32 },
    #[error("Model classification error: {0}")]
    Classification(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    Ended,
    Failed(LoopError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum State {
    Idle,
    AwaitingFrame {
        attempts: u32,
    },
    /// One inference is in flight for a frame of `source`. With `discard` set
    /// its result is dropped and the cycle restarts on the current source.
    Classifying {
        source: SourceId,
        discard: bool,
    },
    Scheduled,
    Stopped {
        reason: StopReason,
        in_flight: Option<SourceId>,
    },
}

impl State {
    pub fn loop_state(&self) -> LoopState {
        match self {
            State::Idle => LoopState::Idle,
            State::AwaitingFrame { .. } | State::Classifying { .. } | State::Scheduled => {
                LoopState::Running
            }
            State::Stopped { .. } => LoopState::Stopped,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    FrameRetry,
    NextCycle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Begin,
    FrameChecked(Option<SinkFrame>),
    ClassifyDone {
        source: SourceId,
        /// Source attached to the sink when the result came back.
        current: Option<SourceId>,
        result: Result<Vec<Classification>, ClassificationError>,
    },
    TimerFired(Timer),
    /// A label was dropped because its source was replaced before it could
    /// be published.
    Superseded,
    End,
}

impl Event {
    pub fn to_display_string(&self) -> String {
        match self {
            Event::FrameChecked(Some(frame)) => format!("FrameChecked({:?})", frame.source),
            event => format!("{:?}", event),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    CheckFrame,
    Classify { frame: SinkFrame },
    Schedule { delay: Duration, timer: Timer },
    CancelScheduled,
    Publish {
        source: SourceId,
        classification: Classification,
    },
    Report { error: LoopError },
}

impl Effect {
    pub fn to_display_string(&self) -> String {
        match self {
            Effect::Classify { frame } => format!("Classify({:?})", frame.source),
            effect => format!("{:?}", effect),
        }
    }
}

pub fn init() -> State {
    State::Idle
}

pub fn transition(timing: &Timing, state: State, event: Event) -> (State, Vec<Effect>) {
    match (state.clone(), event) {
        // Starting
        (State::Idle, Event::Begin)
        | (
            State::Stopped {
                in_flight: None, ..
            },
            Event::Begin,
        ) => (
            State::AwaitingFrame { attempts: 0 },
            vec![Effect::CheckFrame],
        ),
        (
            State::Stopped {
                in_flight: Some(source),
                ..
            },
            Event::Begin,
        ) => (
            State::Classifying {
                source,
                discard: true,
            },
            vec![],
        ),

        // Waiting for a frame
        (State::AwaitingFrame { .. }, Event::FrameChecked(Some(frame))) => (
            State::Classifying {
                source: frame.source,
                discard: false,
            },
            vec![Effect::Classify { frame }],
        ),
        (State::AwaitingFrame { attempts }, Event::FrameChecked(None)) => {
            let attempts = attempts + 1;
            if attempts >= timing.max_ready_attempts.max(1) {
                let error = LoopError::FrameNotReady { attempts };
                (
                    State::Stopped {
                        reason: StopReason::Failed(error.clone()),
                        in_flight: None,
                    },
                    vec![Effect::Report { error }],
                )
            } else {
                (
                    State::AwaitingFrame { attempts },
                    vec![Effect::Schedule {
                        delay: timing.ready_poll_interval,
                        timer: Timer::FrameRetry,
                    }],
                )
            }
        }
        (State::AwaitingFrame { .. }, Event::TimerFired(Timer::FrameRetry)) => {
            (state, vec![Effect::CheckFrame])
        }

        // Inference
        (
            State::Classifying {
                source,
                discard,
            },
            Event::ClassifyDone {
                source: done,
                current,
                result,
            },
        ) if done == source => {
            if discard || current != Some(source) {
                return (
                    State::AwaitingFrame { attempts: 0 },
                    vec![Effect::CheckFrame],
                );
            }

            match result {
                Ok(classifications) => {
                    let mut effects: Vec<Effect> = top(&classifications)
                        .map(|classification| Effect::Publish {
                            source,
                            classification: classification.clone(),
                        })
                        .into_iter()
                        .collect();
                    effects.push(Effect::Schedule {
                        delay: timing.interval,
                        timer: Timer::NextCycle,
                    });
                    (State::Scheduled, effects)
                }
                Err(e) => {
                    let error = LoopError::Classification(e.to_string());
                    (
                        State::Stopped {
                            reason: StopReason::Failed(error.clone()),
                            in_flight: None,
                        },
                        vec![Effect::Report { error }],
                    )
                }
            }
        }
        (
            State::Stopped {
                reason,
                in_flight: Some(source),
            },
            Event::ClassifyDone { source: done, .. },
        ) if done == source => (
            State::Stopped {
                reason,
                in_flight: None,
            },
            vec![],
        ),

        // Next cycle
        (State::Scheduled, Event::TimerFired(Timer::NextCycle)) => (
            State::AwaitingFrame { attempts: 0 },
            vec![Effect::CheckFrame],
        ),
        (State::Scheduled, Event::Superseded) => (
            State::AwaitingFrame { attempts: 0 },
            vec![Effect::CancelScheduled, Effect::CheckFrame],
        ),

        // Teardown
        (State::Idle, Event::End) => (
            State::Stopped {
                reason: StopReason::Ended,
                in_flight: None,
            },
            vec![],
        ),
        (State::AwaitingFrame { .. }, Event::End) | (State::Scheduled, Event::End) => (
            State::Stopped {
                reason: StopReason::Ended,
                in_flight: None,
            },
            vec![Effect::CancelScheduled],
        ),
        (State::Classifying { source, .. }, Event::End) => (
            State::Stopped {
                reason: StopReason::Ended,
                in_flight: Some(source),
            },
            vec![Effect::CancelScheduled],
        ),

        _ => (state, vec![]),
    }
}
