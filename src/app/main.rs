use crate::app::core::{device_options, reselect, AppView, ModelStatus, Screen, UiEvent};
use crate::capture_controller::interface::CaptureEvent;
use crate::capture_controller::main::CaptureController;
use crate::capture_controller::video_sink::SinkFrame;
use crate::classification_loop::main::{ClassificationLoop, LoopNotification};
use crate::config::Config;
use crate::image_classifier::interface::{ClassificationError, ImageClassifier, ModelLoader};
use crate::library::lock::lock;
use crate::library::logger::interface::Logger;
use crate::library::scheduler::interface::Scheduler;
use crate::media_runtime::interface::MediaRuntime;
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};
use std::time::Duration;

type LoadedModel = Result<Arc<dyn ImageClassifier + Send + Sync>, ClassificationError>;

pub struct App {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    scheduler: Arc<dyn Scheduler + Send + Sync>,
    loader: Arc<dyn ModelLoader + Send + Sync>,
    model: Arc<Mutex<Option<LoadedModel>>>,
    controller: CaptureController,
    classification_loop: ClassificationLoop,
    capture_events: Receiver<CaptureEvent>,
    loop_events: Receiver<LoopNotification>,
    begin_on_ready: bool,
    view: AppView,
}

impl App {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        runtime: Arc<dyn MediaRuntime + Send + Sync>,
        scheduler: Arc<dyn Scheduler + Send + Sync>,
        loader: Arc<dyn ModelLoader + Send + Sync>,
    ) -> Self {
        let controller = CaptureController::new(
            config.clone(),
            logger.clone(),
            runtime,
            scheduler.clone(),
        );
        let classification_loop =
            ClassificationLoop::new(config.clone(), logger.clone(), scheduler.clone());
        let capture_events = controller.subscribe();
        let loop_events = classification_loop.subscribe();

        Self {
            config,
            logger: logger.with_namespace("app"),
            scheduler,
            loader,
            model: Arc::new(Mutex::new(None)),
            controller,
            classification_loop,
            capture_events,
            loop_events,
            begin_on_ready: false,
            view: AppView::default(),
        }
    }

    pub fn view(&self) -> &AppView {
        &self.view
    }

    /// Loads the model in the background; `pump` picks up the outcome.
    pub fn load_model(&self) {
        let loader = self.loader.clone();
        let slot = self.model.clone();
        let logger = self.logger.clone();

        self.scheduler.schedule(
            Duration::ZERO,
            Box::new(move || {
                let loaded = loader.load();
                if let Err(e) = &loaded {
                    let _ = logger.error(&format!("Model load error: {}", e));
                }
                *lock(&slot) = Some(loaded);
            }),
        );
    }

    pub fn video_ready(&self) -> bool {
        self.view.capturing && self.controller.sink().is_ready()
    }

    pub fn current_frame(&self) -> Option<SinkFrame> {
        if !self.view.capturing {
            return None;
        }
        self.controller.sink().grab()
    }

    pub fn handle(&mut self, event: UiEvent) {
        let _ = self.logger.info(&format!("ui event: {:?}", event));

        match event {
            UiEvent::OpenCapture => {
                self.view.screen = Screen::Capture;
                self.view.status = self.view.resting_status();
                match self.controller.list_devices() {
                    Ok(devices) => {
                        self.view.devices = device_options(&devices);
                        self.view.selected =
                            reselect(&self.view.devices, self.view.selected.take());
                    }
                    Err(e) => self.view.status = Some(e.to_string()),
                }
            }
            UiEvent::SelectDevice(device_id) => {
                self.view.selected = Some(device_id.clone());
                if self.view.capturing {
                    if let Err(e) = self.controller.switch(&device_id) {
                        self.fail_capture(e.to_string());
                    }
                }
            }
            UiEvent::StartCapture => self.start_capture(),
            UiEvent::Back => {
                self.shutdown();
                self.view.screen = Screen::Landing;
                self.view.status = self.view.resting_status();
            }
        }
    }

    /// Drains capture and loop notifications into the view.
    pub fn pump(&mut self) {
        self.poll_model();

        while let Ok(event) = self.capture_events.try_recv() {
            match event {
                CaptureEvent::Ready(source) => {
                    let current = self.controller.sink().current_source();
                    if self.begin_on_ready && current == Some(source) {
                        self.begin_loop();
                    }
                }
                CaptureEvent::NotReady(source) => {
                    if self.controller.sink().current_source() == Some(source) {
                        self.begin_on_ready = false;
                        self.view.status = Some("Video not ready".to_string());
                    }
                }
            }
        }

        while let Ok(notification) = self.loop_events.try_recv() {
            match notification {
                LoopNotification::Label(classification) => {
                    self.view.label = classification.label;
                    self.view.labels_published += 1;
                    self.view.status = None;
                }
                LoopNotification::Stopped(error) => {
                    self.view.status = Some(error.to_string());
                }
            }
        }
    }

    /// Ends the loop before releasing the camera so no cycle runs against a
    /// released stream.
    pub fn shutdown(&mut self) {
        self.classification_loop.end_loop();
        self.controller.stop();
        self.begin_on_ready = false;
        self.view.capturing = false;
        self.view.label.clear();
    }

    fn start_capture(&mut self) {
        if !self.view.can_start() {
            self.view.status = Some("Model is not loaded yet".to_string());
            return;
        }

        self.classification_loop.end_loop();
        match self.controller.start(self.view.selected.as_deref()) {
            Ok(sink) => {
                self.view.capturing = true;
                self.view.status = None;
                self.view.label.clear();
                self.view.selected = sink.device_id();
                self.begin_on_ready = true;
            }
            Err(e) => self.fail_capture(e.to_string()),
        }
    }

    fn begin_loop(&mut self) {
        let model = match lock(&self.model).as_ref() {
            Some(Ok(model)) => model.clone(),
            _ => return,
        };
        self.begin_on_ready = false;
        self.classification_loop.begin_loop(
            model,
            self.controller.sink(),
            self.config.classify_interval,
        );
    }

    fn fail_capture(&mut self, message: String) {
        let _ = self.logger.error(&message);
        self.shutdown();
        self.view.status = Some(message);
    }

    fn poll_model(&mut self) {
        if self.view.model != ModelStatus::Loading {
            return;
        }
        match lock(&self.model).as_ref() {
            Some(Ok(_)) => self.view.model = ModelStatus::Ready,
            Some(Err(e)) => {
                self.view.model = ModelStatus::Failed(e.to_string());
                self.view.status = self.view.resting_status();
            }
            None => {}
        }
    }
}
