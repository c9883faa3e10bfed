use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{
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

/// A touch contact currently known to the window.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TouchContact {
    pub id: u64,
    pub phase: TouchPhase,
    /// Position in logical pixels.
    pub pos: (f32, f32),
}

/// Current input state for a single window.
///
/// Holds "is down" information, current pointer position and touch contacts.
/// Per-frame transitions are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Current modifier state.
    pub modifiers: Modifiers,

    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,

    /// Touch contacts ordered by contact start; index 0 is the oldest.
    pub touches: Vec<TouchContact>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Avoids stuck keys/buttons/contacts when focus changes mid-press.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                    self.touches.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key {
                key,
                state,
                modifiers,
                ..
            } => {
                self.modifiers = *modifiers;

                match state {
                    KeyState::Pressed => {
                        if self.keys_down.insert(*key) {
                            frame.keys_pressed.insert(*key);
                        }
                    }
                    KeyState::Released => {
                        if self.keys_down.remove(key) {
                            frame.keys_released.insert(*key);
                        }
                    }
                }
            }

            InputEvent::PointerButton(PointerButtonEvent {
                button,
                state,
                x,
                y,
                modifiers,
            }) => {
                self.pointer_pos = Some((*x, *y));
                self.modifiers = *modifiers;

                match state {
                    MouseButtonState::Pressed => {
                        if self.buttons_down.insert(*button) {
                            frame.buttons_pressed.insert(*button);
                        }
                    }
                    MouseButtonState::Released => {
                        if self.buttons_down.remove(button) {
                            frame.buttons_released.insert(*button);
                        }
                    }
                }
            }

            InputEvent::Touch(touch) => self.apply_touch(*touch),
        }

        frame.push_event(ev);
    }

    fn apply_touch(&mut self, TouchEvent { id, phase, x, y }: TouchEvent) {
        let pos = (x, y);
        let existing = self.touches.iter_mut().find(|t| t.id == id);

        match (existing, phase) {
            (Some(contact), TouchPhase::Began) => {
                // Platform reused an id without ending it first.
                contact.phase = TouchPhase::Began;
                contact.pos = pos;
            }
            (Some(contact), TouchPhase::Moved) => {
                // A contact that began this frame reports `Began` until the frame ends.
                if contact.phase != TouchPhase::Began {
                    contact.phase = TouchPhase::Moved;
                }
                contact.pos = pos;
            }
            (Some(contact), TouchPhase::Stationary) => {
                contact.pos = pos;
            }
            (Some(contact), TouchPhase::Ended | TouchPhase::Cancelled) => {
                contact.phase = phase;
                contact.pos = pos;
            }
            (None, TouchPhase::Began | TouchPhase::Moved | TouchPhase::Stationary) => {
                // Missed start (e.g. focus regained mid-touch): treat as a new contact.
                self.touches.push(TouchContact { id, phase: TouchPhase::Began, pos });
            }
            (None, TouchPhase::Ended | TouchPhase::Cancelled) => {}
        }
    }

    /// Settles touch phases once a frame has been consumed.
    ///
    /// Finished contacts are dropped; `Began`/`Moved` contacts become `Stationary`.
    pub fn end_frame(&mut self) {
        self.touches.retain(|t| !t.phase.is_finished());
        for t in &mut self.touches {
            t.phase = TouchPhase::Stationary;
        }
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}
