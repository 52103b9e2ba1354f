use app::main::App;
use app::render::Render;
use config::{Config, DisplayMode};
use device_display::impl_console::DeviceDisplayConsole;
use image_classifier::impl_fake::ModelLoaderFake;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use library::scheduler::impl_thread::SchedulerThread;
use media_runtime::impl_fake::MediaRuntimeFake;
use std::sync::{Arc, Mutex};

mod app;
mod capture_controller;
mod classification_loop;
mod config;
mod device_display;
mod image_classifier;
mod library;
mod media_runtime;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_args(std::env::args().skip(1))?;

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let scheduler = Arc::new(SchedulerThread::new());

    let runtime = Arc::new(MediaRuntimeFake::new(
        logger.with_namespace("media"),
        config.fake_devices.clone(),
    ));

    let loader = Arc::new(ModelLoaderFake::new(
        logger.with_namespace("model"),
        config.model_load_time,
    ));

    let mut app = App::new(config.clone(), logger.clone(), runtime, scheduler, loader);

    app.load_model();

    match config.display {
        DisplayMode::Gui => app::gui::run(app),
        DisplayMode::Console => {
            let device_display = Arc::new(Mutex::new(DeviceDisplayConsole::new(4, 40)));
            let render = Render::new(device_display);
            app::console::run(&config, &mut app, &render)
        }
    }
}
