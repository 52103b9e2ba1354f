use super::main::{ClassificationLoop, LoopNotification, Machine};
use crate::classification_loop::core::{Effect, Event};
use crate::library::lock::lock;
use std::sync::Arc;
use std::time::Duration;

impl ClassificationLoop {
    /// Runs one effect. Effects that complete synchronously hand back the
    /// follow-up event; asynchronous ones dispatch it later themselves.
    pub(super) fn run_effect(&self, machine: &mut Machine, effect: Effect) -> Option<Event> {
        match effect {
            Effect::CheckFrame => {
                let frame = machine
                    .session
                    .as_ref()
                    .and_then(|session| session.sink.grab());
                Some(Event::FrameChecked(frame))
            }
            Effect::Classify { frame } => {
                let Some(session) = machine.session.clone() else {
                    let _ = self.inner.logger.error("Classify without a session");
                    return None;
                };
                let weak = Arc::downgrade(&self.inner);

                self.inner.scheduler.schedule(
                    Duration::ZERO,
                    Box::new(move || {
                        let result = session.model.classify(&frame.frame);
                        let current = session.sink.current_source();
                        if let Some(inner) = weak.upgrade() {
                            ClassificationLoop { inner }.dispatch(Event::ClassifyDone {
                                source: frame.source,
                                current,
                                result,
                            });
                        }
                    }),
                );
                None
            }
            Effect::Schedule { delay, timer } => {
                if let Some(previous) = machine.pending.take() {
                    previous.cancel();
                }
                machine.timer_epoch += 1;
                let epoch = machine.timer_epoch;
                let weak = Arc::downgrade(&self.inner);

                let handle = self.inner.scheduler.schedule(
                    delay,
                    Box::new(move || {
                        if let Some(inner) = weak.upgrade() {
                            ClassificationLoop { inner }.on_timer(epoch, timer);
                        }
                    }),
                );
                machine.pending = Some(handle);
                None
            }
            Effect::CancelScheduled => {
                machine.timer_epoch += 1;
                if let Some(handle) = machine.pending.take() {
                    handle.cancel();
                }
                None
            }
            Effect::Publish {
                source,
                classification,
            } => {
                let Some(session) = machine.session.as_ref() else {
                    return None;
                };
                let published = session.sink.with_current(source, || {
                    {
                        let mut output = lock(&self.inner.output);
                        output.label = Some(classification.clone());
                        output.error = None;
                        output.cycles += 1;
                    }
                    self.notify(LoopNotification::Label(classification.clone()));
                });

                if published.is_none() {
                    let _ = self.inner.logger.info(&format!(
                        "Dropping label {} from replaced {:?}",
                        classification.label, source
                    ));
                    return Some(Event::Superseded);
                }
                let _ = self.inner.logger.info(&format!(
                    "Label: {} ({:.2})",
                    classification.label, classification.confidence
                ));
                None
            }
            Effect::Report { error } => {
                let _ = self.inner.logger.error(&error.to_string());
                lock(&self.inner.output).error = Some(error.clone());
                self.notify(LoopNotification::Stopped(error));
                None
            }
        }
    }

    fn notify(&self, notification: LoopNotification) {
        lock(&self.inner.subscribers)
            .retain(|subscriber| subscriber.send(notification.clone()).is_ok());
    }
}
