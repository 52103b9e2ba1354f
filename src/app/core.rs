use crate::capture_controller::interface::CaptureDevice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Landing,
    Capture,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    OpenCapture,
    SelectDevice(String),
    StartCapture,
    Back,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceOption {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelStatus {
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppView {
    pub screen: Screen,
    pub devices: Vec<DeviceOption>,
    pub selected: Option<String>,
    pub model: ModelStatus,
    pub capturing: bool,
    pub label: String,
    /// Single-line status or error shown above the video.
    pub status: Option<String>,
    pub labels_published: u64,
}

impl Default for AppView {
    fn default() -> Self {
        Self {
            screen: Screen::Landing,
            devices: vec![],
            selected: None,
            model: ModelStatus::Loading,
            capturing: false,
            label: String::new(),
            status: None,
            labels_published: 0,
        }
    }
}

impl AppView {
    pub fn can_start(&self) -> bool {
        self.model == ModelStatus::Ready
    }

    /// Status to show when nothing capture-related is pending. A failed model
    /// load stays visible for as long as the app runs.
    pub fn resting_status(&self) -> Option<String> {
        match &self.model {
            ModelStatus::Failed(detail) => Some(format!("Model load error: {}", detail)),
            ModelStatus::Loading | ModelStatus::Ready => None,
        }
    }

    pub fn selected_device_label(&self) -> Option<&str> {
        let selected = self.selected.as_deref()?;
        self.devices
            .iter()
            .find(|device| device.id == selected)
            .map(|device| device.label.as_str())
    }
}

pub fn device_options(devices: &[CaptureDevice]) -> Vec<DeviceOption> {
    devices
        .iter()
        .enumerate()
        .map(|(index, device)| DeviceOption {
            id: device.id.clone(),
            label: device.display_label(index),
        })
        .collect()
}

/// Keeps the current selection when it is still listed, otherwise falls back
/// to the first device.
pub fn reselect(devices: &[DeviceOption], selected: Option<String>) -> Option<String> {
    match selected {
        Some(id) if devices.iter().any(|device| device.id == id) => Some(id),
        _ => devices.first().map(|device| device.id.clone()),
    }
}
