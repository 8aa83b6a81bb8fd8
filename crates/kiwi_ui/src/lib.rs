pub mod overlay;

pub use overlay::{to_color32, OverlayStats, UiOverlay};
