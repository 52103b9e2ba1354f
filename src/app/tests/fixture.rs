use crate::app::main::App;
use crate::config::Config;
use crate::image_classifier::impl_scripted::{ImageClassifierScripted, ModelLoaderScripted};
use crate::image_classifier::interface::{Classification, ClassificationError};
use crate::library::logger::impl_fake::LoggerFake;
use crate::library::scheduler::impl_fake::SchedulerFake;
use crate::media_runtime::impl_fake::MediaRuntimeFake;
use crate::media_runtime::interface::{DeviceKind, MediaDeviceInfo};
use std::sync::Arc;

pub struct Fixture {
    pub config: Config,
    pub logger: LoggerFake,
    pub scheduler: Arc<SchedulerFake>,
    pub runtime: Arc<MediaRuntimeFake>,
    pub model: Arc<ImageClassifierScripted>,
    pub app: App,
}

impl Fixture {
    pub fn new(responses: Vec<Result<Vec<Classification>, ClassificationError>>) -> Self {
        let model = Arc::new(ImageClassifierScripted::new(responses));
        Self::with_loader(model.clone(), ModelLoaderScripted::ok(model))
    }

    pub fn failing_load(detail: &str) -> Self {
        let model = Arc::new(ImageClassifierScripted::new(vec![]));
        Self::with_loader(model, ModelLoaderScripted::failing(detail))
    }

    fn with_loader(model: Arc<ImageClassifierScripted>, loader: ModelLoaderScripted) -> Self {
        let config = Config::default();
        let logger = LoggerFake::new();
        let scheduler = Arc::new(SchedulerFake::new());
        let runtime = Arc::new(MediaRuntimeFake::new(
            Arc::new(logger.clone()),
            vec![
                MediaDeviceInfo {
                    device_id: "cam1".to_string(),
                    label: "Front".to_string(),
                    kind: DeviceKind::VideoInput,
                },
                MediaDeviceInfo {
                    device_id: "cam2".to_string(),
                    label: String::new(),
                    kind: DeviceKind::VideoInput,
                },
                MediaDeviceInfo {
                    device_id: "mic1".to_string(),
                    label: "Microphone".to_string(),
                    kind: DeviceKind::AudioInput,
                },
            ],
        ));
        let app = App::new(
            config.clone(),
            Arc::new(logger.clone()),
            runtime.clone(),
            scheduler.clone(),
            Arc::new(loader),
        );

        Self {
            config,
            logger,
            scheduler,
            runtime,
            model,
            app,
        }
    }

    /// Loads the model and opens the capture screen.
    pub fn open(&mut self) {
        self.app.load_model();
        self.scheduler.run_pending();
        self.app.pump();
        self.app.handle(crate::app::core::UiEvent::OpenCapture);
    }

    /// Runs whatever is due and folds the notifications into the view.
    pub fn settle(&mut self) {
        self.app.pump();
        self.scheduler.run_pending();
        self.app.pump();
    }
}
