use std::collections::HashMap;
use std::sync::Arc;

use kiwi_render::{SpritePipeline, Texture, WHITE_TEXTURE};

use crate::assets::{read_asset, AssetError, ImageInfo, ImageLoader};

pub struct GpuSpriteTexture {
    pub texture: Texture,
    pub bind_group: wgpu::BindGroup,
}

/// Uploaded textures keyed by asset path, plus the 1x1 white texture used
/// for flat fills. Images stay resident for the life of the window so
/// returning to a screen never reloads them.
pub struct TextureCache {
    textures: HashMap<Arc<str>, GpuSpriteTexture>,
}

impl TextureCache {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, pipeline: &SpritePipeline) -> Self {
        let texture = Texture::from_rgba8(device, queue, &[255, 255, 255, 255], 1, 1, "white");
        let bind_group = pipeline.create_texture_bind_group(device, &texture);
        let mut textures = HashMap::new();
        textures.insert(
            Arc::from(WHITE_TEXTURE),
            GpuSpriteTexture {
                texture,
                bind_group,
            },
        );
        Self { textures }
    }

    pub fn get(&self, key: &str) -> Option<&GpuSpriteTexture> {
        self.textures.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.textures.contains_key(key)
    }

    pub fn memory_bytes(&self) -> usize {
        self.textures.values().map(|t| t.texture.byte_size()).sum()
    }

    /// Borrow the cache as an `ImageLoader` that uploads through `device`.
    pub fn loader<'a>(
        &'a mut self,
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        pipeline: &'a SpritePipeline,
    ) -> GpuImageLoader<'a> {
        GpuImageLoader {
            device,
            queue,
            pipeline,
            cache: self,
        }
    }
}

pub struct GpuImageLoader<'a> {
    device: &'a wgpu::Device,
    queue: &'a wgpu::Queue,
    pipeline: &'a SpritePipeline,
    cache: &'a mut TextureCache,
}

impl ImageLoader for GpuImageLoader<'_> {
    fn load_image(&mut self, path: &str) -> Result<ImageInfo, AssetError> {
        if let Some(existing) = self.cache.get(path) {
            let (width, height) = existing.texture.size;
            return Ok(ImageInfo { width, height });
        }

        let bytes = read_asset(path)?;
        let texture = Texture::from_bytes(self.device, self.queue, &bytes, path).map_err(
            |reason| AssetError::Decode {
                path: path.to_string(),
                reason,
            },
        )?;
        let (width, height) = texture.size;
        let bind_group = self.pipeline.create_texture_bind_group(self.device, &texture);
        self.cache.textures.insert(
            Arc::from(path),
            GpuSpriteTexture {
                texture,
                bind_group,
            },
        );
        log::info!("Loaded image '{}' ({}x{})", path, width, height);
        Ok(ImageInfo { width, height })
    }
}
