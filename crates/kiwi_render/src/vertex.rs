#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteVertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
    pub color: [f32; 4],
}

impl SpriteVertex {
    /// Four corners of an axis-aligned quad in screen space (y down), in the
    /// order top-left, top-right, bottom-right, bottom-left. `flip_x` swaps
    /// the horizontal texture coordinates to mirror the image.
    pub fn quad(x: f32, y: f32, width: f32, height: f32, flip_x: bool, color: [f32; 4]) -> [Self; 4] {
        let (u_left, u_right) = if flip_x { (1.0, 0.0) } else { (0.0, 1.0) };
        let right = x + width;
        let bottom = y + height;
        [
            Self {
                position: [x, y],
                tex_coords: [u_left, 0.0],
                color,
            },
            Self {
                position: [right, y],
                tex_coords: [u_right, 0.0],
                color,
            },
            Self {
                position: [right, bottom],
                tex_coords: [u_right, 1.0],
                color,
            },
            Self {
                position: [x, bottom],
                tex_coords: [u_left, 1.0],
                color,
            },
        ]
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
            wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2, 2 => Float32x4];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_corners_follow_screen_axes() {
        let q = SpriteVertex::quad(10.0, 20.0, 30.0, 40.0, false, [1.0; 4]);
        assert_eq!(q[0].position, [10.0, 20.0]);
        assert_eq!(q[2].position, [40.0, 60.0]);
        assert_eq!(q[0].tex_coords, [0.0, 0.0]);
        assert_eq!(q[2].tex_coords, [1.0, 1.0]);
    }

    #[test]
    fn flipped_quad_mirrors_u_only() {
        let q = SpriteVertex::quad(0.0, 0.0, 8.0, 8.0, true, [1.0; 4]);
        assert_eq!(q[0].tex_coords, [1.0, 0.0]);
        assert_eq!(q[1].tex_coords, [0.0, 0.0]);
        assert_eq!(q[3].tex_coords, [1.0, 1.0]);
        assert_eq!(q[1].position, [8.0, 0.0]);
    }

    #[test]
    fn vertex_stride_is_32_bytes() {
        assert_eq!(std::mem::size_of::<SpriteVertex>(), 32);
    }
}
