use crate::media_runtime::interface::{DeviceKind, MediaDeviceInfo};
use chrono::Offset;
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Gui,
    Console,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub classify_interval: Duration,
    pub ready_poll_interval: Duration,
    pub max_ready_attempts: u32,
    pub model_load_time: Duration,
    pub logger_timezone: chrono::FixedOffset,
    pub display: DisplayMode,
    pub console_cycles: u32,
    pub fake_devices: Vec<MediaDeviceInfo>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            classify_interval: Duration::from_secs(3),
            ready_poll_interval: Duration::from_millis(100),
            max_ready_attempts: 50,
            model_load_time: Duration::from_millis(500),
            logger_timezone: utc(),
            display: DisplayMode::Gui,
            console_cycles: 3,
            fake_devices: vec![
                MediaDeviceInfo {
                    device_id: "fake-front".to_string(),
                    label: "Front Camera".to_string(),
                    kind: DeviceKind::VideoInput,
                },
                MediaDeviceInfo {
                    device_id: "fake-usb".to_string(),
                    label: String::new(),
                    kind: DeviceKind::VideoInput,
                },
                MediaDeviceInfo {
                    device_id: "fake-mic".to_string(),
                    label: "Built-in Microphone".to_string(),
                    kind: DeviceKind::AudioInput,
                },
            ],
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "live-classifier", about = "Classify what the camera sees")]
struct Args {
    /// Print labels on the console instead of opening a window.
    #[arg(long)]
    console: bool,
    #[arg(long)]
    interval_ms: Option<u64>,
    /// Labels to print before the console run exits.
    #[arg(long)]
    cycles: Option<u32>,
}

impl Config {
    /// Applies `--console`, `--interval-ms N` and `--cycles N` on top of the
    /// defaults.
    pub fn from_args<I>(args: I) -> Result<Self, Box<dyn std::error::Error + Send + Sync>>
    where
        I: IntoIterator<Item = String>,
    {
        let argv = std::iter::once("live-classifier".to_string()).chain(args);
        let args = Args::try_parse_from(argv)?;
        let mut config = Config::default();

        if args.console {
            config.display = DisplayMode::Console;
        }
        if let Some(millis) = args.interval_ms {
            config.classify_interval = Duration::from_millis(millis);
        }
        if let Some(cycles) = args.cycles {
            config.console_cycles = cycles;
        }

        Ok(config)
    }
}

fn utc() -> chrono::FixedOffset {
    chrono::Utc.fix()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn defaults_poll_every_three_seconds() {
        let config = Config::from_args(args(&[])).unwrap();

        assert_eq!(config.classify_interval, Duration::from_secs(3));
        assert_eq!(config.display, DisplayMode::Gui);
    }

    #[test]
    fn overrides_are_applied() {
        let config =
            Config::from_args(args(&["--console", "--interval-ms", "500", "--cycles", "7"]))
                .unwrap();

        assert_eq!(config.display, DisplayMode::Console);
        assert_eq!(config.classify_interval, Duration::from_millis(500));
        assert_eq!(config.console_cycles, 7);
    }

    #[test]
    fn bad_arguments_are_rejected() {
        assert!(Config::from_args(args(&["--interval-ms"])).is_err());
        assert!(Config::from_args(args(&["--interval-ms", "soon"])).is_err());
        assert!(Config::from_args(args(&["--fullscreen"])).is_err());
    }
}
