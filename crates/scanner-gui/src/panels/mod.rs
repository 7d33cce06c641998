pub mod landing;
pub mod menu_bar;
pub mod result;
pub mod scanner;
pub mod status;

pub(crate) fn section_header(ui: &mut egui::Ui, label: &str, status: Option<&str>) {
    ui.horizontal(|ui| {
        ui.strong(label);
        if let Some(s) = status {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.small(s);
            });
        }
    });
}

/// Red banner used for scanner errors.
pub(crate) fn error_banner(ui: &mut egui::Ui, message: &str) {
    egui::Frame::new()
        .fill(egui::Color32::from_rgb(254, 226, 226))
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(248, 113, 113)))
        .corner_radius(6.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.colored_label(egui::Color32::from_rgb(153, 27, 27), message);
        });
}
