//! Screen-level side effects held only while the scan screen is mounted.
//!
//! Hosts implement [`EffectHost`] for whatever the effect means on their
//! surface (a window theme, a wake lock, a touch filter). The scan screen
//! acquires an [`EffectScope`] on mount; dropping the scope reverts every
//! effect it applied, in reverse order.

use tracing::{debug, warn};

use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScreenEffect {
    /// Force the light color scheme.
    LightMode,
    /// Pin the page so the viewport cannot scroll or bounce.
    ScrollLock,
    /// Keep the display awake.
    WakeLock,
    /// Swallow default touch handling over the scanner.
    TouchGuard,
}

impl std::fmt::Display for ScreenEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LightMode => write!(f, "Light mode"),
            Self::ScrollLock => write!(f, "Scroll lock"),
            Self::WakeLock => write!(f, "Wake lock"),
            Self::TouchGuard => write!(f, "Touch guard"),
        }
    }
}

/// Applies and reverts screen effects on a concrete front-end.
pub trait EffectHost {
    fn apply(&mut self, effect: ScreenEffect) -> Result<()>;
    fn revert(&mut self, effect: ScreenEffect);
}

/// Effects acquired for the lifetime of one scan screen.
pub struct EffectScope<H: EffectHost> {
    host: H,
    acquired: Vec<ScreenEffect>,
}

impl<H: EffectHost> EffectScope<H> {
    /// Apply `effects` in order. An effect the host refuses is logged and
    /// left out of the scope.
    pub fn acquire(mut host: H, effects: &[ScreenEffect]) -> Self {
        let mut acquired = Vec::with_capacity(effects.len());
        for &effect in effects {
            if acquired.contains(&effect) {
                continue;
            }
            match host.apply(effect) {
                Ok(()) => {
                    debug!(%effect, "screen effect acquired");
                    acquired.push(effect);
                }
                Err(e) => warn!(%effect, error = %e, "screen effect unavailable"),
            }
        }
        Self { host, acquired }
    }

    pub fn is_active(&self, effect: ScreenEffect) -> bool {
        self.acquired.contains(&effect)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Revert every acquired effect. Safe to call more than once.
    pub fn release(&mut self) {
        while let Some(effect) = self.acquired.pop() {
            self.host.revert(effect);
            debug!(%effect, "screen effect released");
        }
    }
}

impl<H: EffectHost> Drop for EffectScope<H> {
    fn drop(&mut self) {
        self.release();
    }
}
