//! egui implementations of the scanner's host ports.

use scanner_core::effects::{EffectHost, ScreenEffect};
use scanner_core::error::{Result, ScanError};
use scanner_core::presenter::ClipboardWriter;

/// Screen effects on an egui window.
///
/// Light mode swaps the theme and restores the previous preference on
/// revert. Scroll lock and touch guard carry no window state of their own;
/// the scanner panel checks the scope for them. There is no wake lock.
pub struct EguiEffects {
    ctx: egui::Context,
    saved_theme: Option<egui::ThemePreference>,
}

impl EguiEffects {
    pub fn new(ctx: &egui::Context) -> Self {
        Self {
            ctx: ctx.clone(),
            saved_theme: None,
        }
    }
}

impl EffectHost for EguiEffects {
    fn apply(&mut self, effect: ScreenEffect) -> Result<()> {
        match effect {
            ScreenEffect::LightMode => {
                self.saved_theme = Some(self.ctx.options(|o| o.theme_preference));
                self.ctx.set_theme(egui::Theme::Light);
                Ok(())
            }
            ScreenEffect::ScrollLock | ScreenEffect::TouchGuard => Ok(()),
            ScreenEffect::WakeLock => Err(ScanError::ConstraintApply(
                "wake lock is not supported by this window system".into(),
            )),
        }
    }

    fn revert(&mut self, effect: ScreenEffect) {
        if effect == ScreenEffect::LightMode {
            if let Some(theme) = self.saved_theme.take() {
                self.ctx.set_theme(theme);
            }
        }
    }
}

/// Writes through egui's platform clipboard output.
pub struct EguiClipboard {
    ctx: egui::Context,
}

impl EguiClipboard {
    pub fn new(ctx: &egui::Context) -> Self {
        Self { ctx: ctx.clone() }
    }
}

impl ClipboardWriter for EguiClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.ctx.copy_text(text.to_owned());
        Ok(())
    }
}
