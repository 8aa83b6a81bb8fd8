use std::sync::Arc;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

pub struct PlatformConfig {
    pub title: String,
    /// Logical pixels.
    pub width: u32,
    pub height: u32,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            title: "KIWI LORE".to_string(),
            width: 800,
            height: 600,
        }
    }
}

pub fn create_window(event_loop: &ActiveEventLoop, config: &PlatformConfig) -> Arc<Window> {
    let attrs = WindowAttributes::default()
        .with_title(&config.title)
        .with_resizable(false)
        .with_inner_size(LogicalSize::new(config.width, config.height));

    let window = event_loop
        .create_window(attrs)
        .expect("Failed to create window");
    Arc::new(window)
}

/// Ask the platform for a new inner size. The change arrives later as a
/// `Resized` event.
pub fn set_window_size(window: &Window, width: u32, height: u32) {
    log::info!("Requesting window size {}x{}", width, height);
    if let Some(applied) = window.request_inner_size(LogicalSize::new(width, height)) {
        log::debug!("Window resized immediately to {:?}", applied);
    }
}

/// Convert a physical size into logical pixels for this window's scale.
pub fn logical_size(window: &Window, physical: PhysicalSize<u32>) -> (f64, f64) {
    let logical: LogicalSize<f64> = physical.to_logical(window.scale_factor());
    (logical.width, logical.height)
}
