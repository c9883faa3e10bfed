//! Paint model shared between the stroke controller and renderers.
//!
//! Scope:
//! - stroke color representation (straight-alpha sRGB bytes)
//! - the fixed drawing palette exposed to host UI layers

pub mod color;

pub use color::{Color32, Palette};
