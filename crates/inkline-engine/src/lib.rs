//! Inkline engine crate.
//!
//! Freehand stroke capture: platform-agnostic pointer input, screen-to-world
//! projection and a frame-driven [`draw::StrokeInputController`] that feeds a
//! pluggable line renderer.

pub mod coords;
pub mod core;
pub mod draw;
pub mod input;
pub mod logging;
pub mod paint;
pub mod projection;
pub mod render;
pub mod scene;
pub mod time;
pub mod window;
