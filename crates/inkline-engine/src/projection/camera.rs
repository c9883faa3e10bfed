use crate::coords::{Vec2, Vec3, Viewport};

use super::ProjectPointer;

/// Perspective camera looking down +Z with +Y up.
///
/// Screen space has +Y down, so the vertical axis is flipped during projection.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub viewport: Viewport,
}

impl PerspectiveCamera {
    #[inline]
    pub fn new(position: Vec3, fov_y: f32, viewport: Viewport) -> Self {
        Self { position, fov_y, viewport }
    }

    /// Camera at the origin with a 60° vertical field of view.
    pub fn with_viewport(viewport: Viewport) -> Self {
        Self::new(Vec3::zero(), 60f32.to_radians(), viewport)
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Screen position in normalized device coordinates (`[-1, 1]`, +Y up).
    fn to_ndc(&self, screen: Vec2) -> Vec2 {
        if !self.viewport.is_valid() {
            return Vec2::zero();
        }
        Vec2::new(
            screen.x / self.viewport.width * 2.0 - 1.0,
            1.0 - screen.y / self.viewport.height * 2.0,
        )
    }
}

impl ProjectPointer for PerspectiveCamera {
    fn project(&self, screen: Vec2, depth: f32) -> Vec3 {
        let ndc = self.to_ndc(screen);
        let half_h = (self.fov_y * 0.5).tan() * depth;
        let half_w = half_h * self.viewport.aspect();
        self.position + Vec3::new(ndc.x * half_w, ndc.y * half_h, depth)
    }
}

/// Identity projection: logical pixels are used as world units.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ScreenSpace;

impl ProjectPointer for ScreenSpace {
    #[inline]
    fn project(&self, screen: Vec2, depth: f32) -> Vec3 {
        Vec3::new(screen.x, screen.y, depth)
    }
}
