use std::time::{Duration, Instant};

use scanner_core::session::SessionPhase;

use crate::app::ScannerApp;
use crate::states::{ScanScreen, ViewportState};

const FOCUS_RING_TIME: Duration = Duration::from_millis(800);
const FOCUS_RING_RADIUS: f32 = 28.0;

pub fn show(ctx: &egui::Context, app: &mut ScannerApp) {
    let mut go_back = false;

    egui::TopBottomPanel::top("scanner_controls").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if ui.button("\u{2190} Back").clicked() {
                go_back = true;
            }
            let Some(scan) = app.scan.as_mut() else {
                return;
            };
            let scanning = scan.session.phase() == SessionPhase::Scanning;

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Switch Camera").clicked() {
                    scan.session.switch_camera();
                }
                if scan.session.torch_available() {
                    let label = if scan.session.torch_enabled() {
                        "Torch Off"
                    } else {
                        "Torch On"
                    };
                    if ui.add_enabled(scanning, egui::Button::new(label)).clicked() {
                        scan.session.toggle_torch();
                    }
                }
            });
        });
    });

    if go_back {
        app.close_scanner();
        return;
    }

    egui::CentralPanel::default().show(ctx, |ui| {
        let ScannerApp { scan, viewport, .. } = app;
        let Some(scan) = scan.as_mut() else {
            ui.label("Scanner is not running");
            return;
        };

        if let Some(error) = scan.session.error() {
            super::error_banner(ui, &error.message);
            ui.add_space(6.0);
        }

        let now = Instant::now();
        match scan.session.phase() {
            SessionPhase::Initializing { .. } => {
                let left = scan.session.warmup_remaining(now).unwrap_or_default();
                ui.vertical_centered(|ui| {
                    ui.add_space(48.0);
                    ui.spinner();
                    ui.label(format!("Starting camera... {:.1}s", left.as_secs_f32()));
                });
            }
            SessionPhase::Scanning => live_view(ui, scan, viewport, now),
            _ => {}
        }

        let tips = scan.session.profile().scanning_tips();
        if !tips.is_empty() {
            ui.add_space(8.0);
            super::section_header(ui, "Tips", None);
            if scan.scroll_locked() {
                show_tips(ui, tips);
            } else {
                egui::ScrollArea::vertical().show(ui, |ui| show_tips(ui, tips));
            }
        }
    });
}

fn show_tips(ui: &mut egui::Ui, tips: &[&str]) {
    for tip in tips {
        ui.label(format!("\u{2022} {tip}"));
    }
}

fn live_view(ui: &mut egui::Ui, scan: &mut ScanScreen, viewport: &mut ViewportState, now: Instant) {
    let available = ui.available_size();
    let height = (available.y - 120.0).max(200.0);
    let sense = if scan.touch_guarded() {
        egui::Sense::click()
    } else {
        egui::Sense::click_and_drag()
    };
    let (rect, response) = ui.allocate_exact_size(egui::vec2(available.x, height), sense);
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 8.0, egui::Color32::BLACK);

    if let (Some(texture), Some(size)) = (&viewport.texture, viewport.image_size) {
        let img_rect = fit_rect(rect, egui::vec2(size[0] as f32, size[1] as f32));
        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
        painter.image(texture.id(), img_rect, uv, egui::Color32::WHITE);
    }

    let reticle = egui::Rect::from_center_size(
        rect.center(),
        egui::vec2(rect.width() * 0.7, rect.height() * 0.4),
    );
    painter.rect_stroke(
        reticle,
        8.0,
        egui::Stroke::new(2.0, egui::Color32::WHITE),
        egui::StrokeKind::Inside,
    );

    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            let x = (pos.x - rect.left()) / rect.width();
            let y = (pos.y - rect.top()) / rect.height();
            if scan.session.focus_at(x, y, now) {
                viewport.focus_tap = Some((pos, now));
            }
        }
    }

    if let Some((pos, at)) = viewport.focus_tap {
        if now.duration_since(at) < FOCUS_RING_TIME {
            painter.circle_stroke(
                pos,
                FOCUS_RING_RADIUS,
                egui::Stroke::new(2.0, egui::Color32::YELLOW),
            );
        } else {
            viewport.focus_tap = None;
        }
    }
}

/// Largest rect with the frame's aspect ratio centered inside `outer`.
fn fit_rect(outer: egui::Rect, image: egui::Vec2) -> egui::Rect {
    if image.x <= 0.0 || image.y <= 0.0 {
        return outer;
    }
    let scale = (outer.width() / image.x).min(outer.height() / image.y);
    egui::Rect::from_center_size(outer.center(), image * scale)
}
