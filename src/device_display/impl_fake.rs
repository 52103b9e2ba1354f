use crate::device_display::interface::DeviceDisplay;
use std::error::Error;

/// Keeps the panel contents in memory for assertions.
pub struct DeviceDisplayFake {
    lines: Vec<String>,
    width: u8,
}

#[allow(dead_code)]
impl DeviceDisplayFake {
    pub fn new(lines: u8, width: u8) -> Self {
        Self {
            lines: vec![String::new(); lines as usize],
            width,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        for line in &mut self.lines {
            line.clear();
        }
        Ok(())
    }

    fn write_line(&mut self, line: u8, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        let width = self.width as usize;
        let slot = self
            .lines
            .get_mut(line as usize)
            .ok_or("Invalid line number")?;
        *slot = text.chars().take(width).collect();
        Ok(())
    }

    fn num_lines(&self) -> u8 {
        self.lines.len() as u8
    }
}
