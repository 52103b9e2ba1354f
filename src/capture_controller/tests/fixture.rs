use crate::capture_controller::main::CaptureController;
use crate::config::Config;
use crate::library::logger::impl_fake::LoggerFake;
use crate::library::scheduler::impl_fake::SchedulerFake;
use crate::media_runtime::impl_fake::MediaRuntimeFake;
use crate::media_runtime::interface::{DeviceKind, MediaDeviceInfo};
use std::sync::Arc;

pub fn device(id: &str, label: &str, kind: DeviceKind) -> MediaDeviceInfo {
    MediaDeviceInfo {
        device_id: id.to_string(),
        label: label.to_string(),
        kind,
    }
}

pub struct Fixture {
    pub config: Config,
    pub logger: LoggerFake,
    pub runtime: Arc<MediaRuntimeFake>,
    pub scheduler: Arc<SchedulerFake>,
    pub controller: CaptureController,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_devices(vec![
            device("cam1", "Front", DeviceKind::VideoInput),
            device("cam2", "", DeviceKind::VideoInput),
            device("mic1", "Microphone", DeviceKind::AudioInput),
        ])
    }

    pub fn with_devices(devices: Vec<MediaDeviceInfo>) -> Self {
        let config = Config::default();
        let logger = LoggerFake::new();
        let runtime = Arc::new(MediaRuntimeFake::new(Arc::new(logger.clone()), devices));
        let scheduler = Arc::new(SchedulerFake::new());
        let controller = CaptureController::new(
            config.clone(),
            Arc::new(logger.clone()),
            runtime.clone(),
            scheduler.clone(),
        );

        Self {
            config,
            logger,
            runtime,
            scheduler,
            controller,
        }
    }
}
