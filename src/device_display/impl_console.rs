use crate::device_display::interface::DeviceDisplay;
use std::error::Error;

pub struct DeviceDisplayConsole {
    display_buffer: Vec<Vec<char>>,
    width: usize,
}

impl DeviceDisplayConsole {
    pub fn new(lines: u8, width: u8) -> Self {
        Self {
            display_buffer: vec![vec![' '; width as usize]; lines as usize],
            width: width as usize,
        }
    }

    fn frame_lines(&self) -> Vec<String> {
        let border = "─".repeat(self.width);
        let mut lines = vec![format!("┌{}┐", border)];
        for row in &self.display_buffer {
            lines.push(format!("│{}│", row.iter().collect::<String>()));
        }
        lines.push(format!("└{}┘", border));
        lines
    }

    fn render_display(&self) {
        for line in self.frame_lines() {
            println!("{}", line);
        }
    }
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        for row in &mut self.display_buffer {
            row.fill(' ');
        }
        Ok(())
    }

    fn write_line(&mut self, line: u8, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        let width = self.width;
        let row = self
            .display_buffer
            .get_mut(line as usize)
            .ok_or("Invalid line number")?;

        row.fill(' ');
        for (i, c) in text.chars().take(width).enumerate() {
            row[i] = c;
        }

        // Last line completes a screen.
        if line as usize + 1 == self.display_buffer.len() {
            self.render_display();
        }
        Ok(())
    }

    fn num_lines(&self) -> u8 {
        self.display_buffer.len() as u8
    }
}
