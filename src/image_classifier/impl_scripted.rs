use crate::image_classifier::interface::{
    Classification, ClassificationError, ImageClassifier, ModelLoader,
};
use crate::library::lock::lock;
use crate::media_runtime::interface::Frame;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Response = Result<Vec<Classification>, ClassificationError>;

pub fn ranked(label: &str, confidence: f32) -> Vec<Classification> {
    vec![Classification {
        label: label.to_string(),
        confidence,
    }]
}

/// Replays queued responses in order; the last one repeats once the queue
/// runs dry. Tracks how many calls overlap.
pub struct ImageClassifierScripted {
    responses: Mutex<VecDeque<Response>>,
    last: Mutex<Response>,
    delay: Duration,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ImageClassifierScripted {
    pub fn new(responses: Vec<Response>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            last: Mutex::new(Ok(vec![])),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl ImageClassifier for ImageClassifierScripted {
    fn classify(&self, _frame: &Frame) -> Result<Vec<Classification>, ClassificationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(in_flight, Ordering::SeqCst);

        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }

        let response = match lock(&self.responses).pop_front() {
            Some(response) => {
                *lock(&self.last) = response.clone();
                response
            }
            None => lock(&self.last).clone(),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        response
    }
}

pub struct ModelLoaderScripted {
    result: Result<Arc<dyn ImageClassifier + Send + Sync>, ClassificationError>,
}

impl ModelLoaderScripted {
    pub fn ok(model: Arc<dyn ImageClassifier + Send + Sync>) -> Self {
        Self { result: Ok(model) }
    }

    pub fn failing(detail: &str) -> Self {
        Self {
            result: Err(ClassificationError::Load(detail.to_string())),
        }
    }
}

impl ModelLoader for ModelLoaderScripted {
    fn load(&self) -> Result<Arc<dyn ImageClassifier + Send + Sync>, ClassificationError> {
        self.result.clone()
    }
}
