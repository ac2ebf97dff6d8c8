use std::collections::BTreeSet;

use crate::action::{Action, Key};
use crate::snapshot::{InputSnapshot, LookDelta};

/// Radians of look rotation per pixel of pointer motion.
pub const DEFAULT_LOOK_SENSITIVITY: f32 = 0.002;

/// Collects raw key and pointer events between ticks.
///
/// The frame loop feeds events as they arrive and calls `sample()` once per
/// tick. Held keys persist across samples; press edges and look motion are
/// consumed by the sample that reports them.
#[derive(Debug, Clone)]
pub struct InputCollector {
    held: BTreeSet<Key>,
    jump_pending: bool,
    interact_pending: bool,
    look: LookDelta,
    sensitivity: f32,
    pointer_captured: bool,
}

impl Default for InputCollector {
    fn default() -> Self {
        Self::new(DEFAULT_LOOK_SENSITIVITY)
    }
}

impl InputCollector {
    pub fn new(sensitivity: f32) -> Self {
        Self {
            held: BTreeSet::new(),
            jump_pending: false,
            interact_pending: false,
            look: LookDelta::default(),
            sensitivity,
            pointer_captured: false,
        }
    }

    /// Record a key press. Auto-repeat presses of a held key are ignored.
    pub fn key_down(&mut self, key: Key) {
        let action = Action::for_key(key);
        let was_active = self.is_active(action);
        self.held.insert(key);
        if action.is_edge() && !was_active {
            match action {
                Action::Jump => self.jump_pending = true,
                Action::Interact => self.interact_pending = true,
                _ => {}
            }
            tracing::trace!(?action, "edge queued");
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Pointer motion only turns the view while the pointer is captured.
    pub fn set_pointer_captured(&mut self, captured: bool) {
        self.pointer_captured = captured;
    }

    pub fn pointer_captured(&self) -> bool {
        self.pointer_captured
    }

    /// Accumulate pointer motion in pixels. Moving right decreases yaw (turns
    /// right); moving down decreases pitch.
    pub fn pointer_moved(&mut self, dx: f32, dy: f32) {
        if !self.pointer_captured {
            return;
        }
        self.look.yaw -= dx * self.sensitivity;
        self.look.pitch -= dy * self.sensitivity;
    }

    /// Drop every held key and pending edge, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.held.clear();
        self.jump_pending = false;
        self.interact_pending = false;
        self.look = LookDelta::default();
    }

    fn is_active(&self, action: Action) -> bool {
        self.held.iter().any(|k| Action::for_key(*k) == action)
    }

    /// Produce this tick's snapshot and clear the consumed edges and look delta.
    pub fn sample(&mut self) -> InputSnapshot {
        InputSnapshot {
            forward: self.is_active(Action::MoveForward),
            back: self.is_active(Action::MoveBack),
            left: self.is_active(Action::MoveLeft),
            right: self.is_active(Action::MoveRight),
            run: self.is_active(Action::Run),
            crouch: self.is_active(Action::Crouch),
            jump: std::mem::take(&mut self.jump_pending),
            interact: std::mem::take(&mut self.interact_pending),
            look: std::mem::take(&mut self.look),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_keys_persist_across_samples() {
        let mut c = InputCollector::default();
        c.key_down(Key::KeyW);
        c.key_down(Key::ShiftLeft);
        assert!(c.sample().forward);
        let s = c.sample();
        assert!(s.forward);
        assert!(s.run);
        c.key_up(Key::KeyW);
        assert!(!c.sample().forward);
    }

    #[test]
    fn interact_fires_once_per_press() {
        let mut c = InputCollector::default();
        c.key_down(Key::KeyE);
        assert!(c.sample().interact);
        assert!(!c.sample().interact);
        // auto-repeat while held
        c.key_down(Key::KeyE);
        assert!(!c.sample().interact);
        c.key_up(Key::KeyE);
        c.key_down(Key::KeyE);
        assert!(c.sample().interact);
    }

    #[test]
    fn jump_edge_is_consumed() {
        let mut c = InputCollector::default();
        c.key_down(Key::Space);
        assert!(c.sample().jump);
        assert!(!c.sample().jump);
    }

    #[test]
    fn alternate_binding_does_not_refire_held_action() {
        let mut c = InputCollector::default();
        c.key_down(Key::ArrowUp);
        c.key_down(Key::KeyW);
        c.key_up(Key::ArrowUp);
        assert!(c.sample().forward);
    }

    #[test]
    fn look_needs_captured_pointer() {
        let mut c = InputCollector::new(0.01);
        c.pointer_moved(10.0, 0.0);
        assert_eq!(c.sample().look, LookDelta::default());

        c.set_pointer_captured(true);
        c.pointer_moved(10.0, 5.0);
        c.pointer_moved(10.0, 5.0);
        let look = c.sample().look;
        assert!((look.yaw + 0.2).abs() < 1e-6);
        assert!((look.pitch + 0.1).abs() < 1e-6);
        assert_eq!(c.sample().look, LookDelta::default());
    }

    #[test]
    fn release_all_clears_everything() {
        let mut c = InputCollector::default();
        c.key_down(Key::KeyD);
        c.key_down(Key::Space);
        c.release_all();
        let s = c.sample();
        assert!(!s.right);
        assert!(!s.jump);
    }
}
