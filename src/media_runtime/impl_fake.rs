use crate::library::lock::lock;
use crate::library::logger::interface::Logger;
use crate::media_runtime::interface::{
    DeviceKind, Frame, MediaDeviceInfo, MediaError, MediaRuntime, MediaStream, MediaTrack,
    VideoConstraint,
};
use rand::Rng;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

const FRAME_WIDTH: u32 = 64;
const FRAME_HEIGHT: u32 = 48;

pub struct FakeTrack {
    live: AtomicBool,
    stop_calls: AtomicU32,
}

impl FakeTrack {
    #[allow(dead_code)]
    pub fn stop_calls(&self) -> u32 {
        self.stop_calls.load(Ordering::SeqCst)
    }
}

impl MediaTrack for FakeTrack {
    fn stop(&self) {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        self.live.store(false, Ordering::SeqCst);
    }

    fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }
}

pub struct FakeStream {
    device_id: String,
    tracks: Vec<Arc<FakeTrack>>,
    warmup_remaining: AtomicU32,
    frames_grabbed: AtomicU64,
    tint: [u8; 3],
}

#[allow(dead_code)]
impl FakeStream {
    pub fn fake_tracks(&self) -> &[Arc<FakeTrack>] {
        &self.tracks
    }

    /// Total `stop` calls across every track of this stream.
    pub fn stop_calls(&self) -> u32 {
        self.tracks.iter().map(|track| track.stop_calls()).sum()
    }

    pub fn is_released(&self) -> bool {
        self.tracks.iter().all(|track| !track.is_live())
    }

    pub fn frames_grabbed(&self) -> u64 {
        self.frames_grabbed.load(Ordering::SeqCst)
    }

    fn is_live(&self) -> bool {
        self.tracks.iter().all(|track| track.is_live())
    }
}

impl MediaStream for FakeStream {
    fn device_id(&self) -> &str {
        &self.device_id
    }

    fn tracks(&self) -> Vec<Arc<dyn MediaTrack>> {
        self.tracks
            .iter()
            .map(|track| track.clone() as Arc<dyn MediaTrack>)
            .collect()
    }

    fn is_producing(&self) -> bool {
        self.is_live() && self.warmup_remaining.load(Ordering::SeqCst) == 0
    }

    fn poll_ready(&self) -> bool {
        if !self.is_live() {
            return false;
        }
        let warming = self
            .warmup_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        !warming
    }

    fn grab_frame(&self) -> Option<Frame> {
        if !self.is_producing() {
            return None;
        }
        self.frames_grabbed.fetch_add(1, Ordering::SeqCst);

        let mut rng = rand::rng();
        let mut pixels = Vec::with_capacity((FRAME_WIDTH * FRAME_HEIGHT * 3) as usize);
        for y in 0..FRAME_HEIGHT {
            for x in 0..FRAME_WIDTH {
                let shade = ((x + y) * 255 / (FRAME_WIDTH + FRAME_HEIGHT)) as u16;
                for channel in self.tint {
                    let value = (shade * channel as u16 / 255) as u8;
                    pixels.push(value.saturating_add(rng.random_range(0..16)));
                }
            }
        }

        Some(Frame {
            width: FRAME_WIDTH,
            height: FRAME_HEIGHT,
            pixels,
        })
    }
}

#[derive(Default)]
struct FakeState {
    devices: Vec<MediaDeviceInfo>,
    permission_denied: bool,
    warmup_polls: u32,
    next_stream: u64,
    streams: Vec<Arc<FakeStream>>,
}

/// In-memory camera runtime. A device stays busy while any track of a stream
/// opened on it is live, like a real camera holding its hardware lock.
pub struct MediaRuntimeFake {
    logger: Arc<dyn Logger + Send + Sync>,
    state: Mutex<FakeState>,
}

#[allow(dead_code)]
impl MediaRuntimeFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, devices: Vec<MediaDeviceInfo>) -> Self {
        Self {
            logger: logger.with_namespace("media").with_namespace("fake"),
            state: Mutex::new(FakeState {
                devices,
                ..FakeState::default()
            }),
        }
    }

    pub fn set_permission_denied(&self, denied: bool) {
        lock(&self.state).permission_denied = denied;
    }

    /// Readiness polls every new stream fails before it produces frames.
    pub fn set_warmup_polls(&self, polls: u32) {
        lock(&self.state).warmup_polls = polls;
    }

    pub fn unplug(&self, device_id: &str) {
        lock(&self.state)
            .devices
            .retain(|device| device.device_id != device_id);
    }

    pub fn streams(&self) -> Vec<Arc<FakeStream>> {
        lock(&self.state).streams.clone()
    }

    fn select_device(
        state: &FakeState,
        constraint: &VideoConstraint,
    ) -> Result<MediaDeviceInfo, MediaError> {
        let mut video_inputs = state
            .devices
            .iter()
            .filter(|device| device.kind == DeviceKind::VideoInput);

        let device = match constraint {
            VideoConstraint::Default => video_inputs.next(),
            VideoConstraint::Exact(device_id) => {
                video_inputs.find(|device| &device.device_id == device_id)
            }
        };

        device.cloned().ok_or_else(|| match constraint {
            VideoConstraint::Default => MediaError::NotFound("no video input".to_string()),
            VideoConstraint::Exact(device_id) => MediaError::NotFound(device_id.clone()),
        })
    }
}

impl MediaRuntime for MediaRuntimeFake {
    fn enumerate_devices(&self) -> Result<Vec<MediaDeviceInfo>, MediaError> {
        let state = lock(&self.state);
        if state.permission_denied {
            return Err(MediaError::NotAllowed("device enumeration".to_string()));
        }
        Ok(state.devices.clone())
    }

    fn get_user_media(
        &self,
        constraint: &VideoConstraint,
    ) -> Result<Arc<dyn MediaStream>, MediaError> {
        let mut state = lock(&self.state);
        if state.permission_denied {
            return Err(MediaError::NotAllowed("camera".to_string()));
        }

        let device = Self::select_device(&state, constraint)?;

        let busy = state
            .streams
            .iter()
            .any(|stream| stream.device_id == device.device_id && stream.is_live());
        if busy {
            return Err(MediaError::NotReadable(device.device_id));
        }

        let stream_number = state.next_stream;
        state.next_stream += 1;

        let tint = match device.device_id.bytes().map(u32::from).sum::<u32>() % 3 {
            0 => [255, 120, 60],
            1 => [60, 200, 255],
            _ => [140, 255, 120],
        };

        let stream = Arc::new(FakeStream {
            device_id: device.device_id.clone(),
            tracks: vec![Arc::new(FakeTrack {
                live: AtomicBool::new(true),
                stop_calls: AtomicU32::new(0),
            })],
            warmup_remaining: AtomicU32::new(state.warmup_polls),
            frames_grabbed: AtomicU64::new(0),
            tint,
        });
        state.streams.push(stream.clone());

        let _ = self.logger.info(&format!(
            "Opened stream {} on {}",
            stream_number, device.device_id
        ));

        Ok(stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_fake::LoggerFake;

    fn camera(device_id: &str) -> MediaDeviceInfo {
        MediaDeviceInfo {
            device_id: device_id.to_string(),
            label: String::new(),
            kind: DeviceKind::VideoInput,
        }
    }

    #[test]
    fn device_is_busy_until_its_tracks_stop() {
        let runtime = MediaRuntimeFake::new(Arc::new(LoggerFake::new()), vec![camera("cam1")]);

        let stream = runtime.get_user_media(&VideoConstraint::Default).unwrap();
        assert_eq!(
            runtime
                .get_user_media(&VideoConstraint::Exact("cam1".to_string()))
                .err(),
            Some(MediaError::NotReadable("cam1".to_string()))
        );

        for track in stream.tracks() {
            track.stop();
        }
        assert!(runtime
            .get_user_media(&VideoConstraint::Exact("cam1".to_string()))
            .is_ok());
    }

    #[test]
    fn stream_warms_up_before_producing() {
        let runtime = MediaRuntimeFake::new(Arc::new(LoggerFake::new()), vec![camera("cam1")]);
        runtime.set_warmup_polls(2);

        let stream = runtime.get_user_media(&VideoConstraint::Default).unwrap();

        assert!(stream.grab_frame().is_none());
        for _ in 0..5 {
            assert!(!stream.is_producing());
        }
        assert!(!stream.poll_ready());
        assert!(!stream.poll_ready());
        assert!(stream.poll_ready());
        assert!(stream.is_producing());

        let frame = stream.grab_frame().unwrap();
        assert_eq!(frame.pixels.len(), (frame.width * frame.height * 3) as usize);
    }

    #[test]
    fn denied_permission_blocks_enumeration_and_capture() {
        let runtime = MediaRuntimeFake::new(Arc::new(LoggerFake::new()), vec![camera("cam1")]);
        runtime.set_permission_denied(true);

        assert!(matches!(
            runtime.enumerate_devices(),
            Err(MediaError::NotAllowed(_))
        ));
        assert!(matches!(
            runtime.get_user_media(&VideoConstraint::Default),
            Err(MediaError::NotAllowed(_))
        ));
    }
}
