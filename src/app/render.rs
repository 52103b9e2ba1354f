use crate::app::core::{AppView, ModelStatus, Screen};
use crate::device_display::interface::DeviceDisplay;
use crate::library::lock::lock;
use std::error::Error;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct Render {
    device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
}

impl Render {
    pub fn new(device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>) -> Self {
        Self { device_display }
    }

    pub fn render(&self, view: &AppView) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut device_display = lock(&self.device_display);

        device_display.clear()?;

        let lines = match view.screen {
            Screen::Landing => vec![
                "Live classifier".to_string(),
                "Open capture to begin".to_string(),
            ],
            Screen::Capture => {
                let camera = view.selected_device_label().unwrap_or("No camera");
                let model = match &view.model {
                    ModelStatus::Loading => "Model: loading...".to_string(),
                    ModelStatus::Ready if view.capturing => "Model: running".to_string(),
                    ModelStatus::Ready => "Model: ready".to_string(),
                    ModelStatus::Failed(_) => "Model: failed".to_string(),
                };
                let label = if view.label.is_empty() {
                    "Label: -".to_string()
                } else {
                    format!("Label: {}", view.label)
                };
                vec![
                    format!("Camera: {}", camera),
                    model,
                    label,
                    view.status.clone().unwrap_or_default(),
                ]
            }
        };

        let num_lines = device_display.num_lines() as usize;
        for (index, line) in lines.iter().take(num_lines).enumerate() {
            device_display.write_line(index as u8, line)?;
        }

        Ok(())
    }
}
