use crate::coords::Vec2;
use crate::input::{PointerSamples, TouchPhase};

/// What an input channel asks the controller to do this frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Gesture {
    /// Start a new stroke at this screen position.
    Begin(Vec2),
    /// Extend the active stroke towards this screen position.
    Continue(Vec2),
    Idle,
}

/// An input channel that can drive strokes.
///
/// Mouse and touch share one controller state; each source only decides
/// whether its channel begins or continues a gesture.
pub trait GestureSource {
    fn name(&self) -> &'static str;

    fn read(&mut self, samples: &PointerSamples) -> Gesture;
}

/// Left mouse button: press begins, hold continues.
#[derive(Debug, Copy, Clone, Default)]
pub struct MouseGestures;

impl GestureSource for MouseGestures {
    fn name(&self) -> &'static str {
        "mouse"
    }

    fn read(&mut self, samples: &PointerSamples) -> Gesture {
        match samples.mouse {
            Some(m) if m.pressed => Gesture::Begin(m.position),
            Some(m) if m.held => Gesture::Continue(m.position),
            _ => Gesture::Idle,
        }
    }
}

/// Single-finger touch.
///
/// Only the oldest contact is sampled, and only the contact that began the
/// gesture may continue it. Moves are ignored while more than one finger is
/// down; a finger that becomes the oldest contact after the first one lifts
/// must begin its own gesture.
#[derive(Debug, Copy, Clone, Default)]
pub struct TouchGestures {
    tracked: Option<u64>,
}

impl TouchGestures {
    /// Contact id currently allowed to continue a gesture.
    #[inline]
    pub fn tracked(&self) -> Option<u64> {
        self.tracked
    }
}

impl GestureSource for TouchGestures {
    fn name(&self) -> &'static str {
        "touch"
    }

    fn read(&mut self, samples: &PointerSamples) -> Gesture {
        let Some(first) = samples.touches.first() else {
            self.tracked = None;
            return Gesture::Idle;
        };

        if first.phase == TouchPhase::Began {
            self.tracked = Some(first.id);
            return Gesture::Begin(first.position);
        }
        if self.tracked != Some(first.id) || first.phase.is_finished() {
            self.tracked = None;
            return Gesture::Idle;
        }

        match first.phase {
            TouchPhase::Moved if samples.touches.len() == 1 => Gesture::Continue(first.position),
            _ => Gesture::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{MouseSample, TouchSample};

    fn contact(id: u64, phase: TouchPhase) -> TouchSample {
        TouchSample { id, phase, position: Vec2::new(id as f32, 0.0) }
    }

    #[test]
    fn mouse_press_wins_over_hold() {
        let p = Vec2::new(1.0, 2.0);
        assert_eq!(MouseGestures.read(&PointerSamples::mouse_down(p)), Gesture::Begin(p));
        assert_eq!(MouseGestures.read(&PointerSamples::mouse_drag(p)), Gesture::Continue(p));
    }

    #[test]
    fn mouse_up_or_absent_is_idle() {
        let up = PointerSamples {
            mouse: Some(MouseSample { position: Vec2::zero(), pressed: false, held: false }),
            touches: Vec::new(),
        };
        assert_eq!(MouseGestures.read(&up), Gesture::Idle);
        assert_eq!(MouseGestures.read(&PointerSamples::default()), Gesture::Idle);
    }

    #[test]
    fn touch_began_on_first_contact_begins() {
        let s = PointerSamples::touch(4, TouchPhase::Began, Vec2::new(4.0, 0.0));
        assert_eq!(TouchGestures::default().read(&s), Gesture::Begin(Vec2::new(4.0, 0.0)));
    }

    #[test]
    fn second_contact_is_ignored() {
        let s = PointerSamples {
            mouse: None,
            touches: vec![contact(1, TouchPhase::Stationary), contact(2, TouchPhase::Began)],
        };
        assert_eq!(TouchGestures::default().read(&s), Gesture::Idle);
    }

    #[test]
    fn multi_touch_move_is_ignored() {
        let s = PointerSamples {
            mouse: None,
            touches: vec![contact(1, TouchPhase::Moved), contact(2, TouchPhase::Moved)],
        };
        assert_eq!(TouchGestures::default().read(&s), Gesture::Idle);
    }

    #[test]
    fn ended_touch_is_idle() {
        let s = PointerSamples::touch(1, TouchPhase::Ended, Vec2::zero());
        assert_eq!(TouchGestures::default().read(&s), Gesture::Idle);
    }

    #[test]
    fn only_the_tracked_contact_continues() {
        let mut touch = TouchGestures::default();
        touch.read(&PointerSamples::touch(1, TouchPhase::Began, Vec2::zero()));
        assert_eq!(touch.tracked(), Some(1));

        let moved = PointerSamples::touch(1, TouchPhase::Moved, Vec2::new(3.0, 0.0));
        assert_eq!(touch.read(&moved), Gesture::Continue(Vec2::new(3.0, 0.0)));

        // Another finger promoted to the oldest contact.
        let other = PointerSamples::touch(2, TouchPhase::Moved, Vec2::new(90.0, 0.0));
        assert_eq!(touch.read(&other), Gesture::Idle);
        assert_eq!(touch.tracked(), None);
    }

    #[test]
    fn lifting_the_tracked_contact_ends_tracking() {
        let mut touch = TouchGestures::default();
        touch.read(&PointerSamples::touch(5, TouchPhase::Began, Vec2::zero()));
        touch.read(&PointerSamples::touch(5, TouchPhase::Ended, Vec2::zero()));
        assert_eq!(touch.tracked(), None);
    }

    #[test]
    fn move_without_begin_is_idle() {
        let mut touch = TouchGestures::default();
        let s = PointerSamples::touch(7, TouchPhase::Moved, Vec2::new(1.0, 0.0));
        assert_eq!(touch.read(&s), Gesture::Idle);
    }
}
