//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Runtime code is responsible for translating platform events into `InputEvent`s
//! (see [`platform::winit`]).

mod frame;
mod samples;
mod state;
mod types;

pub mod platform;

pub use frame::InputFrame;
pub use samples::{MouseSample, PointerSamples, TouchSample};
pub use state::{InputState, TouchContact};
pub use types::{
    InputEvent,
    Key,
    KeyState,
    Modifiers,
    MouseButton,
    MouseButtonState,
    PointerButtonEvent,
    PointerMoveEvent,
    TouchEvent,
    TouchPhase,
};
