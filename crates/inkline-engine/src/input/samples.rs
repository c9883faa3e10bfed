use crate::coords::Vec2;

use super::frame::InputFrame;
use super::state::InputState;
use super::types::{MouseButton, TouchPhase};

/// Primary mouse button snapshot for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MouseSample {
    /// Pointer position in logical pixels.
    pub position: Vec2,
    /// Button went down during this frame.
    pub pressed: bool,
    /// Button is currently held.
    pub held: bool,
}

/// Touch contact snapshot for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TouchSample {
    pub id: u64,
    pub phase: TouchPhase,
    /// Contact position in logical pixels.
    pub position: Vec2,
}

/// Pointer input handed to the stroke controller once per frame.
///
/// Hosts without a windowing runtime can build this directly; otherwise use
/// [`PointerSamples::capture`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerSamples {
    /// `None` when the pointer is outside the surface.
    pub mouse: Option<MouseSample>,
    /// Active contacts ordered by contact start.
    pub touches: Vec<TouchSample>,
}

impl PointerSamples {
    /// Snapshots the left mouse button and all touch contacts.
    pub fn capture(state: &InputState, frame: &InputFrame) -> Self {
        let mouse = state.pointer_pos.map(|pos| MouseSample {
            position: Vec2::from(pos),
            pressed: frame.button_pressed(MouseButton::Left),
            held: state.button_down(MouseButton::Left),
        });

        let touches = state
            .touches
            .iter()
            .map(|t| TouchSample {
                id: t.id,
                phase: t.phase,
                position: Vec2::from(t.pos),
            })
            .collect();

        Self { mouse, touches }
    }

    /// Mouse at `position` with the button pressed this frame.
    pub fn mouse_down(position: Vec2) -> Self {
        Self::with_mouse(MouseSample { position, pressed: true, held: true })
    }

    /// Mouse at `position` with the button held from an earlier frame.
    pub fn mouse_drag(position: Vec2) -> Self {
        Self::with_mouse(MouseSample { position, pressed: false, held: true })
    }

    /// Single touch contact.
    pub fn touch(id: u64, phase: TouchPhase, position: Vec2) -> Self {
        Self {
            mouse: None,
            touches: vec![TouchSample { id, phase, position }],
        }
    }

    fn with_mouse(sample: MouseSample) -> Self {
        Self { mouse: Some(sample), touches: Vec::new() }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mouse.is_none() && self.touches.is_empty()
    }
}
