use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use scanner_core::camera::CameraBackend;
use scanner_core::decode::qr_decoder_factory;
use scanner_core::effects::{EffectHost, EffectScope, ScreenEffect};
use scanner_core::error::ScanError;
use scanner_core::feedback::LogHaptics;
use scanner_core::model::FacingMode;
use scanner_core::permission::{PermissionGate, PermissionState};
use scanner_core::platform::{PlatformFamily, PlatformProfile};
use scanner_core::presenter::{ClipboardChain, ClipboardWriter, ResultView};
use scanner_core::routing::{Navigator, Route};
use scanner_core::session::{SessionController, SessionDeps, SessionPhase};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Clone, Copy, ValueEnum)]
pub enum PlatformArg {
    Native,
    Ios,
    Android,
    Desktop,
}

#[derive(Args)]
pub struct ScanArgs {
    /// Give up after this many seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,

    /// Camera to scan with (environment/back or user/front)
    #[arg(long, default_value = "environment")]
    pub facing: FacingMode,

    /// Platform profile for warm-up and focus tuning
    #[arg(long, value_enum, default_value = "native")]
    pub platform: PlatformArg,

    /// Turn the torch on once scanning starts
    #[arg(long)]
    pub torch: bool,

    /// Also write the decoded text to stdout as plain text
    #[arg(long)]
    pub copy: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(config_path: Option<&Path>, args: &ScanArgs) -> Result<()> {
    let (config, camera) = super::load_rig(config_path)?;
    let camera: Arc<dyn CameraBackend> = Arc::new(camera);

    let mut gate = PermissionGate::new();
    if gate.check_camera_availability(camera.as_ref()) != PermissionState::Granted {
        bail!("Camera access denied");
    }
    let mut nav = Navigator::new();
    nav.navigate(Route::Scanner, &gate)?;

    let profile = match args.platform {
        PlatformArg::Native => PlatformProfile::native(&config),
        PlatformArg::Ios => PlatformProfile::resolve(PlatformFamily::Ios, &config),
        PlatformArg::Android => PlatformProfile::resolve(PlatformFamily::Android, &config),
        PlatformArg::Desktop => PlatformProfile::resolve(PlatformFamily::Desktop, &config),
    };
    if !args.json {
        crate::summary::print_tips(profile.scanning_tips());
    }

    let effects = EffectScope::acquire(TerminalHost::new(), &profile.scan_effects);
    let mut session = SessionController::new(
        &config,
        profile,
        SessionDeps {
            camera,
            decoders: Arc::new(qr_decoder_factory()),
            haptics: Box::new(LogHaptics),
        },
    );
    if args.facing != session.constraints().facing_mode {
        session.switch_camera();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));

    let started = Instant::now();
    let deadline = started + Duration::from_secs(args.timeout);
    session.start(started);

    let mut torch_requested = false;
    let mut shown_error: Option<String> = None;
    loop {
        let now = Instant::now();
        session.tick(now);

        match session.phase() {
            SessionPhase::Initializing { .. } => {
                let left = session.warmup_remaining(now).unwrap_or_default();
                pb.set_message(format!("Starting camera ({:.1}s)", left.as_secs_f32()));
            }
            SessionPhase::Scanning => {
                if args.torch && !torch_requested {
                    torch_requested = true;
                    if !session.toggle_torch() {
                        pb.println("  Torch not available on this camera");
                    }
                }
                if let Some(error) = session.error() {
                    if shown_error.as_deref() != Some(error.message.as_str()) {
                        pb.println(format!("  {error}"));
                        shown_error = Some(error.message.clone());
                    }
                }
                pb.set_message(format!(
                    "Scanning with the {} camera...",
                    session.constraints().facing_mode
                ));
            }
            SessionPhase::ResultShown | SessionPhase::Idle | SessionPhase::Closed => break,
        }

        if now >= deadline {
            pb.finish_and_clear();
            bail!("No barcode found within {}s", args.timeout);
        }
        std::thread::sleep(POLL_INTERVAL);
    }
    pb.finish_and_clear();

    let view = session
        .result()
        .map(ResultView::from)
        .context("Scan ended without a result")?;
    session.teardown();
    drop(effects);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        crate::summary::print_result(&view);
    }

    if args.copy {
        let mut clipboard = ClipboardChain::new(None, Some(Box::new(StdoutClipboard)));
        if let Some(notice) = clipboard.copy(&view.content).notice() {
            eprintln!("{notice}");
        }
    }

    Ok(())
}

/// Screen effects a terminal can honour: the cursor is hidden while the
/// viewport is pinned; the color scheme is left alone.
struct TerminalHost {
    term: Term,
}

impl TerminalHost {
    fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }
}

impl EffectHost for TerminalHost {
    fn apply(&mut self, effect: ScreenEffect) -> scanner_core::error::Result<()> {
        match effect {
            ScreenEffect::LightMode => Ok(()),
            ScreenEffect::ScrollLock => Ok(self.term.hide_cursor()?),
            ScreenEffect::WakeLock | ScreenEffect::TouchGuard => Err(ScanError::ConstraintApply(
                format!("{effect} is not available in a terminal"),
            )),
        }
    }

    fn revert(&mut self, effect: ScreenEffect) {
        if effect == ScreenEffect::ScrollLock {
            let _ = self.term.show_cursor();
        }
    }
}

/// Legacy copy path: the payload goes to stdout for the caller to pipe.
struct StdoutClipboard;

impl ClipboardWriter for StdoutClipboard {
    fn write_text(&mut self, text: &str) -> scanner_core::error::Result<()> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{text}")?;
        out.flush()?;
        Ok(())
    }
}
