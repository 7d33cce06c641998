use tracing::debug;

use crate::error::{Result, ScanError};
use crate::permission::PermissionGate;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Landing,
    Scanner,
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Landing => write!(f, "/"),
            Self::Scanner => write!(f, "/scanner"),
        }
    }
}

/// Current screen, with the scan screen gated on camera permission.
#[derive(Debug, Default)]
pub struct Navigator {
    current: Route,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Route {
        self.current
    }

    pub fn navigate(&mut self, route: Route, gate: &PermissionGate) -> Result<Route> {
        if route == Route::Scanner && !gate.allows_scanning() {
            return Err(ScanError::PermissionDenied(format!(
                "camera permission is {}",
                gate.state()
            )));
        }
        debug!(from = %self.current, to = %route, "navigate");
        self.current = route;
        Ok(route)
    }

    pub fn back(&mut self) -> Route {
        self.current = Route::Landing;
        self.current
    }
}
