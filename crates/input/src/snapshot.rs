use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Look rotation accumulated since the previous sample, in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LookDelta {
    pub yaw: f32,
    pub pitch: f32,
}

/// Input for one simulation tick.
///
/// Held fields mirror key state. `jump` and `interact` are press edges and are
/// true for exactly one sample per press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub run: bool,
    pub crouch: bool,
    pub jump: bool,
    pub interact: bool,
    pub look: LookDelta,
}

impl InputSnapshot {
    /// Avatar-local movement axes: x is right, y is backward (local +z).
    ///
    /// Opposite keys cancel. The result is not normalized.
    pub fn move_axes(&self) -> Vec2 {
        let mut axes = Vec2::ZERO;
        if self.forward {
            axes.y -= 1.0;
        }
        if self.back {
            axes.y += 1.0;
        }
        if self.left {
            axes.x -= 1.0;
        }
        if self.right {
            axes.x += 1.0;
        }
        axes
    }

    /// True if any movement key is held, even when opposite keys cancel.
    pub fn any_movement_held(&self) -> bool {
        self.forward || self.back || self.left || self.right
    }
}
