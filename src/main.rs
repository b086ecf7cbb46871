use anyhow::Result;
use eframe::egui;

mod app;
mod core;
mod messaging;
mod midi;
mod ui;

fn main() -> Result<()> {
    env_logger::init();
    log::info!("starting Mac Piano");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([920.0, 760.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Mac Piano",
        options,
        Box::new(|_cc| {
            let app = match app::PianoApp::new() {
                Ok(app) => app,
                Err(e) => {
                    log::error!("failed to create app: {e:#}");
                    std::process::exit(1);
                }
            };
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("application error: {e}"))
}
