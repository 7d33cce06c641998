use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

use scanner_core::camera::{CameraBackend, ReplayCamera};
use scanner_core::config::ScannerConfig;
use scanner_core::routing::Route;
use scanner_core::session::SessionPhase;

use crate::convert::gray_to_color_image;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::states::{ScanScreen, UIState, ViewportState};
use crate::workers;

const FRAME_INTERVAL: Duration = Duration::from_millis(33);

pub struct ScannerApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub config: ScannerConfig,
    pub camera: Arc<dyn CameraBackend>,
    /// Bumped on every config import; stale camera results are dropped.
    pub generation: u64,
    pub ui_state: UIState,
    pub viewport: ViewportState,
    pub scan: Option<ScanScreen>,
    pub show_about: bool,
}

impl ScannerApp {
    pub fn new(ctx: &egui::Context, config_path: Option<PathBuf>) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = workers::spawn_worker(result_tx, ctx.clone());

        let mut ui_state = UIState::default();
        let (config, base_dir) = match config_path {
            Some(path) => match ScannerConfig::load(&path) {
                Ok(config) => {
                    ui_state.add_log(format!("Loaded config: {}", path.display()));
                    (config, path.parent().map(Path::to_path_buf))
                }
                Err(e) => {
                    ui_state.add_log(format!("ERROR: Failed to load {}: {e}", path.display()));
                    (ScannerConfig::default(), None)
                }
            },
            None => (ScannerConfig::default(), None),
        };
        let camera: Arc<dyn CameraBackend> = Arc::new(ReplayCamera::from_config(
            &config.camera,
            base_dir.as_deref(),
        ));

        let mut app = Self {
            cmd_tx,
            result_rx,
            config,
            camera,
            generation: 0,
            ui_state,
            viewport: ViewportState::default(),
            scan: None,
            show_about: false,
        };
        app.check_camera();
        app
    }

    /// Start the one-off permission probe and device listing.
    fn check_camera(&mut self) {
        self.ui_state.probing = true;
        self.send_command(WorkerCommand::ProbeCamera {
            camera: Arc::clone(&self.camera),
            generation: self.generation,
        });
        self.send_command(WorkerCommand::ListDevices {
            camera: Arc::clone(&self.camera),
            generation: self.generation,
        });
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::Permission { state, generation } => {
                    if generation != self.generation {
                        continue;
                    }
                    self.ui_state.probing = false;
                    let state = self.ui_state.gate.resolve(state);
                    self.ui_state.add_log(format!("Camera permission: {state}"));
                }
                WorkerResult::Devices {
                    devices,
                    generation,
                } => {
                    if generation != self.generation {
                        continue;
                    }
                    self.ui_state
                        .add_log(format!("{} camera(s) found", devices.len()));
                    self.ui_state.devices = devices;
                }
                WorkerResult::ConfigLoaded { config, path } => {
                    self.apply_config(config, &path);
                }
                WorkerResult::Error { message } => {
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    /// Swap in a new config. This is a fresh start: the scan screen closes
    /// and camera access is checked again.
    fn apply_config(&mut self, config: ScannerConfig, path: &Path) {
        self.close_scanner();
        self.generation += 1;
        self.camera = Arc::new(ReplayCamera::from_config(&config.camera, path.parent()));
        self.config = config;
        self.ui_state = UIState {
            log_messages: std::mem::take(&mut self.ui_state.log_messages),
            ..UIState::default()
        };
        self.ui_state
            .add_log(format!("Loaded config: {}", path.display()));
        self.check_camera();
    }

    pub fn open_scanner(&mut self, ctx: &egui::Context) {
        match self.ui_state.nav.navigate(Route::Scanner, &self.ui_state.gate) {
            Ok(_) => {
                self.viewport.clear();
                self.scan = Some(ScanScreen::open(
                    ctx,
                    &self.config,
                    Arc::clone(&self.camera),
                    Instant::now(),
                ));
            }
            Err(e) => self.ui_state.add_log(format!("ERROR: {e}")),
        }
    }

    pub fn close_scanner(&mut self) {
        // Dropping the screen tears down the session and reverts its effects.
        self.scan = None;
        self.viewport.clear();
        self.ui_state.nav.back();
    }

    fn advance_scanner(&mut self, ctx: &egui::Context) {
        let Some(scan) = self.scan.as_mut() else {
            return;
        };
        scan.session.tick(Instant::now());

        match scan.session.phase() {
            SessionPhase::Initializing { .. } | SessionPhase::Scanning => {
                if let Some((id, frame)) = scan.session.latest_frame_since(self.viewport.frame_id) {
                    let image = gray_to_color_image(&frame);
                    let size = image.size;
                    let texture = ctx.load_texture("viewport", image, egui::TextureOptions::LINEAR);
                    self.viewport.texture = Some(texture);
                    self.viewport.image_size = Some(size);
                    self.viewport.frame_id = id;
                }
                ctx.request_repaint_after(FRAME_INTERVAL);
            }
            SessionPhase::ResultShown | SessionPhase::Idle | SessionPhase::Closed => {}
        }
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }
}

impl eframe::App for ScannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results();
        self.advance_scanner(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);

        match self.ui_state.nav.current() {
            Route::Landing => panels::landing::show(ctx, self),
            Route::Scanner => {
                let showing_result = self
                    .scan
                    .as_ref()
                    .is_some_and(|s| s.session.phase() == SessionPhase::ResultShown);
                if showing_result {
                    panels::result::show(ctx, self);
                } else {
                    panels::scanner::show(ctx, self);
                }
            }
        }

        if self.show_about {
            egui::Window::new("About Barcode Scanner")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Barcode Scanner");
                        ui.label("Scan QR codes and barcodes with your camera");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}
