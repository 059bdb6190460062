mod app;
mod icons;
mod layout;

use eframe::egui;

use crate::app::OrganizerApp;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Organizador SDLC & STLC"),
        ..Default::default()
    };

    eframe::run_native(
        "Organizador SDLC & STLC",
        options,
        Box::new(|cc| Ok(Box::new(OrganizerApp::new(cc)))),
    )
}
