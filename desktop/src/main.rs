mod app;
mod model;

use app::DesktopApp;
use eframe::egui;
use orange_sorter_common::{ModelPaths, OnnxClassifier};

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt::init();

    // Loaded once; there is no retry or fallback if this fails, the window
    // just reports the stored error on every analysis request.
    let classifier = OnnxClassifier::load(&ModelPaths::default());
    if let Err(err) = &classifier {
        tracing::error!(%err, "failed to load the pretrained model");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([460.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Orange Detector",
        options,
        Box::new(|cc| Box::new(DesktopApp::new(cc, classifier))),
    )
}
