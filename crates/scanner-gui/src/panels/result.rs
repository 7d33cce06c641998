use scanner_core::presenter::{ClipboardChain, ResultAction, ResultView};

use crate::app::ScannerApp;
use crate::host::EguiClipboard;

pub fn show(ctx: &egui::Context, app: &mut ScannerApp) {
    let Some(view) = app
        .scan
        .as_ref()
        .and_then(|s| s.session.result())
        .map(ResultView::from)
    else {
        return;
    };

    let mut chosen: Option<ResultAction> = None;
    let mut go_back = false;

    egui::CentralPanel::default().show(ctx, |ui| {
        if ui.button("\u{2190} Back").clicked() {
            go_back = true;
        }
        ui.add_space(12.0);
        ui.heading("Scan Result");
        ui.add_space(8.0);

        egui::Grid::new("result_grid")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label(egui::RichText::new("Format").weak());
                ui.label(egui::RichText::new(&view.format).strong());
                ui.end_row();

                ui.label(egui::RichText::new("Content").weak());
                ui.add(
                    egui::Label::new(egui::RichText::new(&view.content).monospace())
                        .selectable(true)
                        .wrap(),
                );
                ui.end_row();

                ui.label(egui::RichText::new("Scanned").weak());
                ui.label(&view.scanned_at);
                ui.end_row();
            });

        ui.add_space(16.0);
        for action in view.actions() {
            let button = egui::Button::new(action.to_string()).min_size(egui::vec2(200.0, 36.0));
            if ui.add(button).clicked() {
                chosen = Some(action);
            }
        }
    });

    if go_back {
        app.close_scanner();
        return;
    }

    match chosen {
        Some(ResultAction::Copy) => {
            let mut clipboard = ClipboardChain::new(Some(Box::new(EguiClipboard::new(ctx))), None);
            if let Some(notice) = clipboard.copy(&view.content).notice() {
                app.ui_state.show_notice(notice);
            }
        }
        Some(ResultAction::OpenUrl(url)) => {
            ctx.open_url(egui::OpenUrl::new_tab(url));
        }
        Some(ResultAction::ScanAgain) => {
            if let Some(scan) = app.scan.as_mut() {
                scan.session.scan_again();
            }
        }
        None => {}
    }
}
