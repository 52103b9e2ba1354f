use std::error::Error;

/// A fixed-size text panel.
pub trait DeviceDisplay: Send + Sync {
    /// Clear all text from the panel
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Write text to a specific line (0-based). Text longer than the panel
    /// is cut; an out-of-range line is an error.
    fn write_line(&mut self, line: u8, text: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn num_lines(&self) -> u8;
}
