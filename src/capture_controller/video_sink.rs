use crate::library::lock::lock;
use crate::media_runtime::interface::{Frame, MediaStream};
use std::sync::{Arc, Mutex};

/// Identifies one attached stream. Every attach gets a new id, so anything
/// derived from a frame can be checked against the stream currently attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct SinkFrame {
    pub source: SourceId,
    pub frame: Frame,
}

struct Attached {
    source: SourceId,
    stream: Arc<dyn MediaStream>,
}

#[derive(Default)]
struct Slot {
    next_source: u64,
    attached: Option<Attached>,
}

/// The display surface a stream is attached to. Cloning shares the surface;
/// only the capture controller attaches or detaches streams.
#[derive(Clone, Default)]
pub struct VideoSink {
    slot: Arc<Mutex<Slot>>,
}

impl VideoSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn attach(&self, stream: Arc<dyn MediaStream>) -> SourceId {
        let mut slot = lock(&self.slot);
        slot.next_source += 1;
        let source = SourceId(slot.next_source);
        slot.attached = Some(Attached { source, stream });
        source
    }

    pub(crate) fn detach(&self) -> Option<(SourceId, Arc<dyn MediaStream>)> {
        lock(&self.slot)
            .attached
            .take()
            .map(|attached| (attached.source, attached.stream))
    }

    pub fn current_source(&self) -> Option<SourceId> {
        lock(&self.slot)
            .attached
            .as_ref()
            .map(|attached| attached.source)
    }

    pub fn device_id(&self) -> Option<String> {
        lock(&self.slot)
            .attached
            .as_ref()
            .map(|attached| attached.stream.device_id().to_string())
    }

    pub fn is_ready(&self) -> bool {
        self.attached_stream()
            .map(|(_, stream)| stream.is_producing())
            .unwrap_or(false)
    }

    /// Readiness check that lets the stream advance its startup.
    pub(crate) fn poll_ready(&self) -> bool {
        self.attached_stream()
            .map(|(_, stream)| stream.poll_ready())
            .unwrap_or(false)
    }

    /// Runs `f` only while `source` is attached. The slot stays locked for the
    /// duration, so no attach or detach can interleave with `f`.
    pub fn with_current<R>(&self, source: SourceId, f: impl FnOnce() -> R) -> Option<R> {
        let slot = lock(&self.slot);
        match &slot.attached {
            Some(attached) if attached.source == source => Some(f()),
            _ => None,
        }
    }

    /// Current frame, or `None` while nothing is attached or the stream has
    /// not produced a frame yet.
    pub fn grab(&self) -> Option<SinkFrame> {
        let (source, stream) = self.attached_stream()?;
        if !stream.is_producing() {
            return None;
        }
        stream
            .grab_frame()
            .map(|frame| SinkFrame { source, frame })
    }

    fn attached_stream(&self) -> Option<(SourceId, Arc<dyn MediaStream>)> {
        lock(&self.slot)
            .attached
            .as_ref()
            .map(|attached| (attached.source, attached.stream.clone()))
    }
}
