use scanner_core::model::SUPPORTED_SYMBOLOGIES;
use scanner_core::permission::PermissionState;

use crate::app::ScannerApp;

use super::section_header;

pub fn show(ctx: &egui::Context, app: &mut ScannerApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.heading("Barcode Scanner");
            ui.label("Scan QR codes and barcodes with your camera");
            ui.add_space(16.0);

            match app.ui_state.gate.state() {
                PermissionState::Unknown if app.ui_state.probing => {
                    ui.spinner();
                    ui.label("Checking camera access...");
                }
                PermissionState::Unknown => {
                    ui.label("Camera access has not been checked");
                }
                PermissionState::Denied => {
                    super::error_banner(
                        ui,
                        "Camera access denied. Allow camera access and restart the app.",
                    );
                }
                PermissionState::Granted => {
                    let start = egui::Button::new(egui::RichText::new("Start Scanning").heading())
                        .min_size(egui::vec2(220.0, 48.0));
                    if ui.add(start).clicked() {
                        app.open_scanner(ctx);
                    }
                }
            }
        });

        ui.add_space(24.0);
        section_header(ui, "Supported formats", None);
        ui.horizontal_wrapped(|ui| {
            for symbology in SUPPORTED_SYMBOLOGIES {
                ui.label(egui::RichText::new(symbology.label()).monospace());
            }
        });

        ui.add_space(12.0);
        let count = app.ui_state.devices.len().to_string();
        section_header(ui, "Cameras", Some(&count));
        for device in &app.ui_state.devices {
            let facing = device
                .facing
                .map(|f| f.to_string())
                .unwrap_or_else(|| "unknown".into());
            ui.label(format!("{} ({facing})", device.label));
        }
    });
}
