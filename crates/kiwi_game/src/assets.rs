//! Asset loading seam.
//!
//! Screens ask an `ImageLoader` for images by path and only learn the image
//! size; the loader keeps the pixels (on the GPU in the real game, nowhere in
//! tests). Failures are `AssetError`s the caller recovers from locally.

use std::fs;
use std::io::ErrorKind;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("asset '{path}' not found")]
    Missing { path: String },
    #[error("asset '{path}' unreadable: {reason}")]
    Unreadable { path: String, reason: String },
    #[error("asset '{path}' failed to decode: {reason}")]
    Decode { path: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
}

pub trait ImageLoader {
    /// Load (or reuse) the image at `path`. On success the image is drawable
    /// under the texture key `path`.
    fn load_image(&mut self, path: &str) -> Result<ImageInfo, AssetError>;
}

pub fn read_asset(path: &str) -> Result<Vec<u8>, AssetError> {
    fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AssetError::Missing {
            path: path.to_string(),
        },
        _ => AssetError::Unreadable {
            path: path.to_string(),
            reason: e.to_string(),
        },
    })
}
