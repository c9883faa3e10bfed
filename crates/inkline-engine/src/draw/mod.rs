//! Freehand stroke capture.
//!
//! [`StrokeInputController`] samples pointer input once per frame, decides when
//! a gesture begins or continues, derives segment width from drag speed and
//! forwards geometry to a [`LineRenderer`](crate::render::LineRenderer).

mod config;
mod controller;
mod error;
mod gesture;
mod stroke;

#[cfg(test)]
pub(crate) mod testing;

pub use config::DrawConfig;
pub use controller::StrokeInputController;
pub use error::ConfigError;
pub use gesture::{Gesture, GestureSource, MouseGestures, TouchGestures};
pub use stroke::{Stroke, StrokeId};
