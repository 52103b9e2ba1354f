use crate::image_classifier::interface::{
    Classification, ClassificationError, ImageClassifier, ModelLoader,
};
use crate::library::logger::interface::Logger;
use crate::media_runtime::interface::Frame;
use rand::distr::{Distribution, Uniform};
use std::sync::Arc;
use std::time::Duration;

const LABELS: [&str; 18] = [
    "coffee mug",
    "cup",
    "water bottle",
    "computer keyboard",
    "mouse",
    "laptop",
    "cellular telephone",
    "desk",
    "table lamp",
    "golden retriever",
    "tabby cat",
    "potted plant",
    "wall clock",
    "notebook",
    "backpack",
    "sunglasses",
    "television",
    "remote control",
];

/// Random ImageNet-style labels, enough to drive the demo without weights.
pub struct ImageClassifierFake {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("classifier").with_namespace("fake"),
        }
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(&self, frame: &Frame) -> Result<Vec<Classification>, ClassificationError> {
        let _ = self.logger.info(&format!(
            "Classifying {}x{} frame...",
            frame.width, frame.height
        ));

        let mut rng = rand::rng();
        let index_dist = Uniform::new(0, LABELS.len())
            .map_err(|e| ClassificationError::Inference(e.to_string()))?;
        let confidence_dist = Uniform::new(0.0f32, 1.0f32)
            .map_err(|e| ClassificationError::Inference(e.to_string()))?;

        let mut classifications: Vec<Classification> = (0..3)
            .map(|_| Classification {
                label: LABELS[index_dist.sample(&mut rng)].to_string(),
                confidence: confidence_dist.sample(&mut rng),
            })
            .collect();
        classifications.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        Ok(classifications)
    }
}

pub struct ModelLoaderFake {
    logger: Arc<dyn Logger + Send + Sync>,
    load_time: Duration,
}

impl ModelLoaderFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, load_time: Duration) -> Self {
        Self {
            logger: logger.with_namespace("model_loader").with_namespace("fake"),
            load_time,
        }
    }
}

impl ModelLoader for ModelLoaderFake {
    fn load(&self) -> Result<Arc<dyn ImageClassifier + Send + Sync>, ClassificationError> {
        let _ = self.logger.info("Loading model...");
        std::thread::sleep(self.load_time);
        let _ = self.logger.info("Model loaded");
        Ok(Arc::new(ImageClassifierFake::new(self.logger.clone())))
    }
}
