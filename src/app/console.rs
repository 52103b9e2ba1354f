use crate::app::core::{ModelStatus, UiEvent};
use crate::app::main::App;
use crate::app::render::Render;
use crate::config::Config;
use std::error::Error;
use std::time::Duration;

const TICK: Duration = Duration::from_millis(50);

/// Drives the app without a window: open the capture screen, wait for the
/// model, start the first camera and print each label until enough cycles
/// ran or the loop reported an error.
pub fn run(
    config: &Config,
    app: &mut App,
    render: &Render,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    app.handle(UiEvent::OpenCapture);

    loop {
        app.pump();
        match &app.view().model {
            ModelStatus::Loading => std::thread::sleep(TICK),
            ModelStatus::Ready => break,
            ModelStatus::Failed(detail) => {
                render.render(app.view())?;
                return Err(format!("Model load error: {}", detail).into());
            }
        }
    }

    app.handle(UiEvent::StartCapture);

    let mut last_published = 0;
    loop {
        app.pump();

        let view = app.view();
        if !view.capturing {
            break;
        }
        if view.labels_published != last_published {
            last_published = view.labels_published;
            render.render(view)?;
        }
        if view.labels_published >= config.console_cycles as u64 {
            break;
        }
        if view.status.is_some() {
            render.render(view)?;
            break;
        }
        std::thread::sleep(TICK);
    }

    let failure = app.view().status.clone();
    app.handle(UiEvent::Back);
    render.render(app.view())?;

    match failure {
        Some(message) => Err(message.into()),
        None => Ok(()),
    }
}
