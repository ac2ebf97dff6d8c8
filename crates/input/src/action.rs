use serde::{Deserialize, Serialize};

/// Physical keys the collector understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ShiftLeft,
    ShiftRight,
    KeyC,
    Space,
    KeyE,
}

/// A high-level action a key can be bound to.
///
/// The simulation reads actions through `InputSnapshot`, so keyboard and
/// touch collectors share the same avatar logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveForward,
    MoveBack,
    MoveLeft,
    MoveRight,
    /// Held modifier: run while moving.
    Run,
    /// Held modifier: crouch.
    Crouch,
    /// Edge: jump once per press.
    Jump,
    /// Edge: collect nearby pickups once per press.
    Interact,
}

impl Action {
    /// Default desktop binding.
    pub fn for_key(key: Key) -> Action {
        match key {
            Key::KeyW | Key::ArrowUp => Action::MoveForward,
            Key::KeyS | Key::ArrowDown => Action::MoveBack,
            Key::KeyA | Key::ArrowLeft => Action::MoveLeft,
            Key::KeyD | Key::ArrowRight => Action::MoveRight,
            Key::ShiftLeft | Key::ShiftRight => Action::Run,
            Key::KeyC => Action::Crouch,
            Key::Space => Action::Jump,
            Key::KeyE => Action::Interact,
        }
    }

    /// Edge actions fire on the press, not while held.
    pub fn is_edge(self) -> bool {
        matches!(self, Action::Jump | Action::Interact)
    }
}
