//! Window + runtime loop.
//!
//! Owns the `winit` event loop and window and feeds translated input to an
//! [`App`](crate::core::App) at a fixed frame interval.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
