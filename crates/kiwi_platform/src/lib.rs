pub mod window;

pub use window::{create_window, logical_size, set_window_size, PlatformConfig};
