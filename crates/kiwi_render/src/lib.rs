pub mod camera;
pub mod gpu_context;
pub mod mesh;
pub mod sprite_pipeline;
pub mod texture;
pub mod vertex;

pub use camera::{Camera2D, CameraUniform};
pub use gpu_context::{clear_color, linear_rgba, GpuContext};
pub use mesh::{count_texture_binds, DrawCall, SpriteMesh, WHITE_TEXTURE};
pub use sprite_pipeline::SpritePipeline;
pub use texture::Texture;
pub use vertex::SpriteVertex;
