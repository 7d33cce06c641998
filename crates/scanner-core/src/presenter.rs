use serde::Serialize;
use tracing::error;
use url::Url;

use crate::consts::COPIED_MESSAGE;
use crate::error::Result;
use crate::model::ScanResult;

/// Treat `text` as a link when it parses as an absolute URL.
pub fn is_url(text: &str) -> bool {
    Url::parse(text).is_ok()
}

/// Action offered on the result screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResultAction {
    Copy,
    OpenUrl(String),
    ScanAgain,
}

impl std::fmt::Display for ResultAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Copy => write!(f, "Copy to Clipboard"),
            Self::OpenUrl(_) => write!(f, "Open URL"),
            Self::ScanAgain => write!(f, "Scan Again"),
        }
    }
}

/// Display-ready view of a scan result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResultView {
    pub format: String,
    pub content: String,
    pub scanned_at: String,
    pub open_url: Option<String>,
}

impl ResultView {
    pub fn new(result: &ScanResult) -> Self {
        let content = result.text().to_string();
        let open_url = is_url(&content).then(|| content.clone());
        Self {
            format: result.format().to_string(),
            content,
            scanned_at: result.timestamp().to_string(),
            open_url,
        }
    }

    /// Actions in display order.
    pub fn actions(&self) -> Vec<ResultAction> {
        let mut actions = vec![ResultAction::Copy];
        if let Some(url) = &self.open_url {
            actions.push(ResultAction::OpenUrl(url.clone()));
        }
        actions.push(ResultAction::ScanAgain);
        actions
    }
}

impl From<&ScanResult> for ResultView {
    fn from(result: &ScanResult) -> Self {
        Self::new(result)
    }
}

/// Something that can take text for the system clipboard.
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// No clipboard API; the legacy path was used.
    CopiedWithFallback,
    Failed,
}

impl CopyOutcome {
    pub fn is_success(self) -> bool {
        !matches!(self, Self::Failed)
    }

    /// Notice shown to the user, if any. Failures are only logged.
    pub fn notice(self) -> Option<&'static str> {
        self.is_success().then_some(COPIED_MESSAGE)
    }
}

/// Clipboard API with a legacy fallback for hosts that lack one.
#[derive(Default)]
pub struct ClipboardChain {
    primary: Option<Box<dyn ClipboardWriter>>,
    fallback: Option<Box<dyn ClipboardWriter>>,
}

impl ClipboardChain {
    pub fn new(
        primary: Option<Box<dyn ClipboardWriter>>,
        fallback: Option<Box<dyn ClipboardWriter>>,
    ) -> Self {
        Self { primary, fallback }
    }

    /// Copy `text`. A primary clipboard that rejects the write does not fall
    /// back; the legacy path is only used when no primary exists.
    pub fn copy(&mut self, text: &str) -> CopyOutcome {
        if let Some(primary) = self.primary.as_mut() {
            return match primary.write_text(text) {
                Ok(()) => CopyOutcome::Copied,
                Err(e) => {
                    error!(error = %e, "could not copy text");
                    CopyOutcome::Failed
                }
            };
        }

        match self.fallback.as_mut() {
            Some(fallback) => match fallback.write_text(text) {
                Ok(()) => CopyOutcome::CopiedWithFallback,
                Err(e) => {
                    error!(error = %e, "could not copy text");
                    CopyOutcome::Failed
                }
            },
            None => {
                error!("could not copy text: no clipboard available");
                CopyOutcome::Failed
            }
        }
    }
}
