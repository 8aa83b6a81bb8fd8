use glam::{Mat4, Vec2, Vec4};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Screen-space 2D camera: logical pixels, origin top-left, y down.
///
/// `position` is the world point shown at the top-left corner of the
/// viewport. `viewport` is the visible size in logical pixels, independent of
/// the surface's physical size.
pub struct Camera2D {
    pub position: Vec2,
    pub zoom: f32,
    pub viewport: (f32, f32),
}

impl Camera2D {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: 1.0,
            viewport: (viewport_width, viewport_height),
        }
    }

    pub fn projection(&self) -> Mat4 {
        let visible_w = self.viewport.0 / self.zoom;
        let visible_h = self.viewport.1 / self.zoom;

        // bottom > top flips y so screen rows grow downward.
        Mat4::orthographic_rh(
            self.position.x,
            self.position.x + visible_w,
            self.position.y + visible_h,
            self.position.y,
            -1.0,
            1.0,
        )
    }

    pub fn build_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.projection().to_cols_array_2d(),
        }
    }

    /// Clip-space position of a screen point; used by tests and picking.
    pub fn to_clip(&self, point: Vec2) -> Vec2 {
        let clip = self.projection() * Vec4::new(point.x, point.y, 0.0, 1.0);
        Vec2::new(clip.x / clip.w, clip.y / clip.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn top_left_maps_to_upper_left_clip_corner() {
        let cam = Camera2D::new(800.0, 600.0);
        assert!(approx(cam.to_clip(Vec2::ZERO), Vec2::new(-1.0, 1.0)));
        assert!(approx(cam.to_clip(Vec2::new(800.0, 600.0)), Vec2::new(1.0, -1.0)));
        assert!(approx(cam.to_clip(Vec2::new(400.0, 300.0)), Vec2::ZERO));
    }

    #[test]
    fn zoom_shrinks_visible_area() {
        let mut cam = Camera2D::new(800.0, 600.0);
        cam.zoom = 2.0;
        assert!(approx(cam.to_clip(Vec2::new(400.0, 300.0)), Vec2::new(1.0, -1.0)));
    }

    #[test]
    fn position_offsets_view() {
        let mut cam = Camera2D::new(800.0, 600.0);
        cam.position = Vec2::new(100.0, 50.0);
        assert!(approx(cam.to_clip(Vec2::new(100.0, 50.0)), Vec2::new(-1.0, 1.0)));
    }
}
