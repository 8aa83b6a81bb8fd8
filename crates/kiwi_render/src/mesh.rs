//! CPU-side sprite mesh built from a draw list.
//!
//! Images and filled rectangles become textured quads in list order; text is
//! left to the UI pass. Fill colors are linearized like the clear color. Consecutive quads sharing a texture are merged into a
//! single draw call to minimize bind-group switches.

use std::sync::Arc;

use kiwi_core::draw::{DrawCommand, DrawList};

use crate::gpu_context::linear_rgba;
use crate::vertex::SpriteVertex;

/// Texture key of the 1x1 white texture used for flat-colored quads.
pub const WHITE_TEXTURE: &str = "__white";

/// A contiguous run of indices that share the same texture binding.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub texture_key: Arc<str>,
    pub index_start: u32,
    pub index_count: u32,
}

#[derive(Debug, Default)]
pub struct SpriteMesh {
    pub vertices: Vec<SpriteVertex>,
    pub indices: Vec<u32>,
    pub draw_calls: Vec<DrawCall>,
}

impl SpriteMesh {
    /// Build the mesh for `list`. Images whose texture `is_loaded` rejects are
    /// skipped with a warning.
    pub fn build(list: &DrawList, is_loaded: impl Fn(&str) -> bool) -> Self {
        let mut mesh = Self {
            vertices: Vec::with_capacity(list.commands.len() * 4),
            indices: Vec::with_capacity(list.commands.len() * 6),
            draw_calls: Vec::with_capacity(8),
        };

        for command in &list.commands {
            match command {
                DrawCommand::Image {
                    texture_key,
                    dest,
                    flip_x,
                } => {
                    if !is_loaded(texture_key) {
                        log::warn!("Skipping image '{}' due to missing texture", texture_key);
                        continue;
                    }
                    mesh.push_quad(
                        texture_key,
                        SpriteVertex::quad(
                            dest.x as f32,
                            dest.y as f32,
                            dest.width as f32,
                            dest.height as f32,
                            *flip_x,
                            [1.0; 4],
                        ),
                    );
                }
                DrawCommand::FilledRect { rect, color } => {
                    mesh.push_quad(
                        WHITE_TEXTURE,
                        SpriteVertex::quad(
                            rect.x as f32,
                            rect.y as f32,
                            rect.width as f32,
                            rect.height as f32,
                            false,
                            linear_rgba(*color).map(|c| c as f32),
                        ),
                    );
                }
                DrawCommand::Text { .. } => {}
            }
        }
        mesh
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    fn push_quad(&mut self, texture_key: &str, corners: [SpriteVertex; 4]) {
        let base_index = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&corners);

        let index_start = self.indices.len() as u32;
        self.indices.extend_from_slice(&[
            base_index,
            base_index + 1,
            base_index + 2,
            base_index,
            base_index + 2,
            base_index + 3,
        ]);

        if let Some(last) = self.draw_calls.last_mut() {
            if &*last.texture_key == texture_key
                && last.index_start + last.index_count == index_start
            {
                last.index_count += 6;
                return;
            }
        }
        self.draw_calls.push(DrawCall {
            texture_key: Arc::from(texture_key),
            index_start,
            index_count: 6,
        });
    }
}

/// Number of texture rebinds the draw calls will need.
pub fn count_texture_binds(draw_calls: &[DrawCall]) -> usize {
    let mut binds = 0usize;
    let mut current: Option<&str> = None;
    for draw in draw_calls {
        let key: &str = &draw.texture_key;
        if current != Some(key) {
            current = Some(key);
            binds += 1;
        }
    }
    binds
}
