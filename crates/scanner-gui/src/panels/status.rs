use std::time::Instant;

use crate::app::ScannerApp;

pub fn show(ctx: &egui::Context, app: &mut ScannerApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        if let Some(notice) = app.ui_state.active_notice(Instant::now()) {
            ui.colored_label(egui::Color32::from_rgb(22, 163, 74), notice);
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }

        // Log area, fixed height for 3 lines.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 3.0 + spacing * 2.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for msg in &app.ui_state.log_messages {
                    ui.small(msg);
                }
            });

        ui.horizontal(|ui| {
            ui.label(format!("Camera: {}", app.ui_state.gate.state()));
            ui.separator();
            ui.label(app.ui_state.nav.current().to_string());
            if let Some(scan) = &app.scan {
                ui.separator();
                ui.label(scan.session.phase().to_string());
                ui.separator();
                ui.label(scan.session.profile().family.to_string());
            }
        });
    });
}
