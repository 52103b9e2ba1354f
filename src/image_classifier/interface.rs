use crate::media_runtime::interface::Frame;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub confidence: f32,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClassificationError {
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("model failed to load: {0}")]
    Load(String),
}

pub trait ImageClassifier: Send + Sync {
    /// Ranked labels for one frame, highest confidence first.
    fn classify(&self, frame: &Frame) -> Result<Vec<Classification>, ClassificationError>;
}

pub trait ModelLoader: Send + Sync {
    fn load(&self) -> Result<Arc<dyn ImageClassifier + Send + Sync>, ClassificationError>;
}

/// Highest-confidence entry. Ties keep the earlier entry.
pub fn top(classifications: &[Classification]) -> Option<&Classification> {
    classifications.iter().fold(None, |best, candidate| match best {
        Some(best) if best.confidence >= candidate.confidence => Some(best),
        _ => Some(candidate),
    })
}
