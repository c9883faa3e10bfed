//! Coordinate types shared by the input layer, projection and renderers.
//!
//! Screen space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! World space is whatever the active `ProjectPointer` maps into.

mod vec2;
mod vec3;
mod viewport;

pub use vec2::Vec2;
pub use vec3::Vec3;
pub use viewport::Viewport;
