use crate::capture_controller::interface::{CaptureDevice, CaptureError, CaptureEvent};
use crate::capture_controller::video_sink::{SourceId, VideoSink};
use crate::config::Config;
use crate::library::lock::lock;
use crate::library::logger::interface::Logger;
use crate::library::scheduler::interface::{Scheduler, TaskHandle};
use crate::media_runtime::interface::{DeviceKind, MediaRuntime, VideoConstraint};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

struct Inner {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    runtime: Arc<dyn MediaRuntime + Send + Sync>,
    scheduler: Arc<dyn Scheduler + Send + Sync>,
    sink: VideoSink,
    // Serializes attach/release so a superseded stream is stopped exactly once.
    attach_lock: Mutex<()>,
    ready_watch: Mutex<Option<TaskHandle>>,
    subscribers: Mutex<Vec<Sender<CaptureEvent>>>,
}

#[derive(Clone)]
pub struct CaptureController {
    inner: Arc<Inner>,
}

impl CaptureController {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        runtime: Arc<dyn MediaRuntime + Send + Sync>,
        scheduler: Arc<dyn Scheduler + Send + Sync>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                logger: logger.with_namespace("capture"),
                runtime,
                scheduler,
                sink: VideoSink::new(),
                attach_lock: Mutex::new(()),
                ready_watch: Mutex::new(None),
                subscribers: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn subscribe(&self) -> Receiver<CaptureEvent> {
        let (tx, rx) = channel();
        lock(&self.inner.subscribers).push(tx);
        rx
    }

    pub fn sink(&self) -> VideoSink {
        self.inner.sink.clone()
    }

    pub fn list_devices(&self) -> Result<Vec<CaptureDevice>, CaptureError> {
        let devices = self.inner.runtime.enumerate_devices().map_err(|e| {
            let _ = self.inner.logger.error(&format!("Enumeration failed: {}", e));
            CaptureError::from(e)
        })?;

        let cameras: Vec<CaptureDevice> = devices
            .into_iter()
            .filter(|device| device.kind == DeviceKind::VideoInput)
            .filter(|device| !device.device_id.is_empty())
            .map(|device| CaptureDevice {
                id: device.device_id,
                label: device.label,
                kind: device.kind,
            })
            .collect();

        let _ = self
            .inner
            .logger
            .info(&format!("Found {} camera(s)", cameras.len()));

        Ok(cameras)
    }

    /// Attaches a stream from `device_id`, or from the runtime's default camera
    /// when `None`. Any stream already attached is released first.
    pub fn start(&self, device_id: Option<&str>) -> Result<VideoSink, CaptureError> {
        let constraint = match device_id {
            Some(device_id) => VideoConstraint::Exact(device_id.to_string()),
            None => VideoConstraint::Default,
        };
        self.attach(constraint)
    }

    /// Releases the current stream, then attaches one from `device_id`. The old
    /// stream stays released even when the new one cannot be acquired.
    pub fn switch(&self, device_id: &str) -> Result<VideoSink, CaptureError> {
        self.attach(VideoConstraint::Exact(device_id.to_string()))
    }

    pub fn stop(&self) {
        let _guard = lock(&self.inner.attach_lock);
        self.inner.release_current();
    }

    fn attach(&self, constraint: VideoConstraint) -> Result<VideoSink, CaptureError> {
        let _guard = lock(&self.inner.attach_lock);

        self.inner.release_current();

        let stream = self
            .inner
            .runtime
            .get_user_media(&constraint)
            .map_err(|e| {
                let _ = self
                    .inner
                    .logger
                    .error(&format!("Acquiring {:?} failed: {}", constraint, e));
                CaptureError::from(e)
            })?;

        let device_id = stream.device_id().to_string();
        let source = self.inner.sink.attach(stream);
        let _ = self
            .inner
            .logger
            .info(&format!("Attached {} as {:?}", device_id, source));

        Inner::watch_ready(&self.inner, source, 0);

        Ok(self.inner.sink.clone())
    }
}

impl Inner {
    fn emit(&self, event: CaptureEvent) {
        lock(&self.subscribers).retain(|subscriber| subscriber.send(event).is_ok());
    }

    fn release_current(&self) {
        if let Some(handle) = lock(&self.ready_watch).take() {
            handle.cancel();
        }

        let Some((source, stream)) = self.sink.detach() else {
            return;
        };

        for track in stream.tracks() {
            track.stop();
        }
        let _ = self.logger.info(&format!(
            "Released {:?} ({})",
            source,
            stream.device_id()
        ));
    }

    fn watch_ready(inner: &Arc<Inner>, source: SourceId, attempt: u32) {
        if inner.sink.current_source() != Some(source) {
            return;
        }

        if inner.sink.poll_ready() {
            let _ = inner.logger.info(&format!("{:?} is producing frames", source));
            inner.emit(CaptureEvent::Ready(source));
            return;
        }

        let attempts = attempt + 1;
        if attempts >= inner.config.max_ready_attempts.max(1) {
            let _ = inner.logger.error(&format!(
                "{:?} produced no frame after {} checks",
                source, attempts
            ));
            inner.emit(CaptureEvent::NotReady(source));
            return;
        }

        let weak = Arc::downgrade(inner);
        let handle = inner.scheduler.schedule(
            inner.config.ready_poll_interval,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    Inner::watch_ready(&inner, source, attempts);
                }
            }),
        );
        *lock(&inner.ready_watch) = Some(handle);
    }
}
