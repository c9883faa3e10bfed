//! Screen-to-world pointer projection.
//!
//! The stroke controller never talks to a camera directly; it asks a
//! [`ProjectPointer`] to place a screen position on a plane `depth` world units
//! in front of whatever camera the host is using.

mod camera;

pub use camera::{PerspectiveCamera, ScreenSpace};

use crate::coords::{Vec2, Vec3};

/// Maps a pointer position in logical pixels to a world-space point.
pub trait ProjectPointer {
    fn project(&self, screen: Vec2, depth: f32) -> Vec3;
}

impl<F> ProjectPointer for F
where
    F: Fn(Vec2, f32) -> Vec3,
{
    #[inline]
    fn project(&self, screen: Vec2, depth: f32) -> Vec3 {
        self(screen, depth)
    }
}
