use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    VideoInput,
    AudioInput,
    AudioOutput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaDeviceInfo {
    pub device_id: String,
    pub label: String,
    pub kind: DeviceKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoConstraint {
    /// Whatever camera the runtime picks.
    Default,
    Exact(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MediaError {
    #[error("access denied: {0}")]
    NotAllowed(String),
    #[error("no such device: {0}")]
    NotFound(String),
    #[error("device is in use: {0}")]
    NotReadable(String),
}

/// A decoded RGB8 video frame.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixels", &format_args!("[{} bytes]", self.pixels.len()))
            .finish()
    }
}

pub trait MediaTrack: Send + Sync {
    /// Releases the hardware behind the track.
    fn stop(&self);
    fn is_live(&self) -> bool;
}

pub trait MediaStream: Send + Sync {
    fn device_id(&self) -> &str;
    fn tracks(&self) -> Vec<Arc<dyn MediaTrack>>;
    /// True once the stream has decoded at least one frame and is still live.
    /// Has no side effects.
    fn is_producing(&self) -> bool;
    /// Readiness check made while waiting for the first frame. Streams that
    /// need to be driven to start decoding advance here.
    fn poll_ready(&self) -> bool;
    fn grab_frame(&self) -> Option<Frame>;
}

pub trait MediaRuntime: Send + Sync {
    fn enumerate_devices(&self) -> Result<Vec<MediaDeviceInfo>, MediaError>;
    fn get_user_media(
        &self,
        constraint: &VideoConstraint,
    ) -> Result<Arc<dyn MediaStream>, MediaError>;
}
