mod app;
mod convert;
mod host;
mod messages;
mod panels;
mod states;
mod workers;

use std::path::PathBuf;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 820.0])
            .with_min_inner_size([360.0, 600.0])
            .with_title("Barcode Scanner"),
        ..Default::default()
    };

    eframe::run_native(
        "BarcodeScanner",
        options,
        Box::new(move |cc| Ok(Box::new(app::ScannerApp::new(&cc.egui_ctx, config_path)))),
    )
}
