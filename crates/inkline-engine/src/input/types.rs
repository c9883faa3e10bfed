use std::fmt;

/// Keyboard key identifier.
///
/// Only the keys hosts bind to drawing actions are named. Everything else maps
/// to `Key::Unknown(u32)` with a stable platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Delete,
    Backspace,
    C,
    Q,
    /// Top-row or numpad digit, `0..=9`.
    Digit(u8),
    Unknown(u32),
}

impl Key {
    /// Palette index for digit keys.
    pub fn digit(self) -> Option<i32> {
        match self {
            Key::Digit(d) => Some(i32::from(d)),
            _ => None,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Modifier keys state.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// Pointer move event in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub x: f32,
    pub y: f32,
}

/// Pointer button event.
///
/// Coordinates are included so a press can be processed without a prior move.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: MouseButtonState,
    pub x: f32,
    pub y: f32,
    pub modifiers: Modifiers,
}

/// Lifecycle phase of a touch contact.
///
/// `Stationary` is never emitted by platforms; `InputState::end_frame` demotes
/// contacts to it once their `Began`/`Moved` frame has been consumed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TouchPhase {
    Began,
    Moved,
    Stationary,
    Ended,
    Cancelled,
}

impl TouchPhase {
    /// True for phases after which the contact disappears.
    #[inline]
    pub fn is_finished(self) -> bool {
        matches!(self, TouchPhase::Ended | TouchPhase::Cancelled)
    }
}

/// Touch contact update in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TouchEvent {
    /// Platform contact id, unique while the contact is down.
    pub id: u64,
    pub phase: TouchPhase,
    pub x: f32,
    pub y: f32,
}

/// Platform-agnostic input events emitted by the runtime.
///
/// Runtime translates window system events into these.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    ModifiersChanged(Modifiers),

    Key {
        key: Key,
        state: KeyState,
        modifiers: Modifiers,
        /// Stable platform code when available (e.g. scancode).
        code: u32,
        /// True when event is a key-repeat.
        repeat: bool,
    },

    PointerMoved(PointerMoveEvent),
    PointerButton(PointerButtonEvent),

    Touch(TouchEvent),

    /// Pointer left the window surface.
    PointerLeft,

    /// Window focus change.
    Focused(bool),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
