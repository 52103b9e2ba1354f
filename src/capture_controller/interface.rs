use crate::capture_controller::video_sink::SourceId;
use crate::media_runtime::interface::{DeviceKind, MediaError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureDevice {
    pub id: String,
    pub label: String,
    pub kind: DeviceKind,
}

impl CaptureDevice {
    /// Label for the device selector. Runtimes hide labels until camera
    /// permission is granted, so fall back to the 1-based position.
    pub fn display_label(&self, index: usize) -> String {
        if self.label.trim().is_empty() {
            format!("Camera {}", index + 1)
        } else {
            self.label.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureEvent {
    /// The stream attached as `SourceId` is producing frames.
    Ready(SourceId),
    /// The stream never produced a frame within the readiness budget.
    NotReady(SourceId),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("Camera permission denied ({0})")]
    Permission(String),
    #[error("Camera unavailable ({0})")]
    DeviceUnavailable(String),
}

impl From<MediaError> for CaptureError {
    fn from(error: MediaError) -> Self {
        match error {
            MediaError::NotAllowed(detail) => CaptureError::Permission(detail),
            MediaError::NotFound(detail) | MediaError::NotReadable(detail) => {
                CaptureError::DeviceUnavailable(detail)
            }
        }
    }
}
