mod scan;
mod ui;
mod viewport;

pub use scan::ScanScreen;
pub use ui::UIState;
pub use viewport::ViewportState;
