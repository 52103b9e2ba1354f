use crate::app::core::{Screen, UiEvent};
use crate::app::main::App;
use eframe::egui;
use std::error::Error;
use std::time::Duration;

const REPAINT_EVERY: Duration = Duration::from_millis(100);

struct GuiWindow {
    app: App,
    texture: Option<egui::TextureHandle>,
}

impl GuiWindow {
    fn new(app: App) -> Self {
        Self { app, texture: None }
    }

    fn landing(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.heading("Live classifier");
            ui.add_space(20.0);
            if ui.button("Open camera").clicked() {
                self.app.handle(UiEvent::OpenCapture);
            }
        });
    }

    fn capture(&mut self, ui: &mut egui::Ui) {
        let view = self.app.view().clone();
        let mut selected = view.selected.clone().unwrap_or_default();

        ui.horizontal(|ui| {
            if ui.button("Back").clicked() {
                self.app.handle(UiEvent::Back);
            }

            egui::ComboBox::from_label("Camera")
                .selected_text(view.selected_device_label().unwrap_or("No camera"))
                .show_ui(ui, |ui| {
                    for device in &view.devices {
                        ui.selectable_value(&mut selected, device.id.clone(), device.label.as_str());
                    }
                });

            let start = ui.add_enabled(view.can_start(), egui::Button::new("Start"));
            if start.clicked() {
                self.app.handle(UiEvent::StartCapture);
            }
        });

        if view.selected.as_deref() != Some(selected.as_str()) && !selected.is_empty() {
            self.app.handle(UiEvent::SelectDevice(selected));
        }

        if let Some(status) = &view.status {
            ui.colored_label(egui::Color32::RED, status.as_str());
        }

        if let Some(sink_frame) = self.app.current_frame() {
            let frame = sink_frame.frame;
            let image = egui::ColorImage::from_rgb(
                [frame.width as usize, frame.height as usize],
                &frame.pixels,
            );
            match &mut self.texture {
                Some(texture) => texture.set(image, egui::TextureOptions::default()),
                None => {
                    self.texture = Some(ui.ctx().load_texture(
                        "video",
                        image,
                        egui::TextureOptions::default(),
                    ))
                }
            }
        }

        if view.capturing {
            match &self.texture {
                Some(texture) if self.app.video_ready() => {
                    ui.image((texture.id(), egui::vec2(320.0, 240.0)));
                }
                _ => {
                    ui.label("Starting camera...");
                }
            }
        }

        ui.label(egui::RichText::new(&view.label).size(24.0).strong());
    }
}

impl eframe::App for GuiWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.app.pump();

        let screen = self.app.view().screen;
        egui::CentralPanel::default().show(ctx, |ui| match screen {
            Screen::Landing => self.landing(ui),
            Screen::Capture => self.capture(ui),
        });

        ctx.request_repaint_after(REPAINT_EVERY);
    }
}

impl Drop for GuiWindow {
    fn drop(&mut self) {
        self.app.shutdown();
    }
}

pub fn run(app: App) -> Result<(), Box<dyn Error + Send + Sync>> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([400.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Live classifier",
        options,
        Box::new(|_cc| Box::new(GuiWindow::new(app))),
    )
    .map_err(|e| e.to_string().into())
}
