use crate::library::lock::lock;
use crate::library::logger::interface::{join_namespace, Logger};
use std::sync::{Arc, Mutex};

/// Records every line instead of printing it. Namespaced children share the
/// same buffer as their parent.
#[derive(Debug, Clone, Default)]
pub struct LoggerFake {
    namespace: Option<String>,
    lines: Arc<Mutex<Vec<String>>>,
}

impl LoggerFake {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn lines(&self) -> Vec<String> {
        lock(&self.lines).clone()
    }

    fn push(&self, level: &str, message: &str) {
        let line = match &self.namespace {
            Some(namespace) => format!("{} {}: {}", level, namespace, message),
            None => format!("{} {}", level, message),
        };
        lock(&self.lines).push(line);
    }
}

impl Logger for LoggerFake {
    fn info(&self, message: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.push("INFO", message);
        Ok(())
    }

    fn error(&self, message: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.push("ERROR", message);
        Ok(())
    }

    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync> {
        Arc::new(LoggerFake {
            namespace: Some(join_namespace(&self.namespace, namespace)),
            lines: self.lines.clone(),
        })
    }
}
