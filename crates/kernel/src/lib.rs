//! Simulation kernel: avatar kinematics, resource meters, pickups and
//! progression, stepped once per tick from injected input and delta time.
//!
//! # Invariants
//! - `0 <= current <= max` for health and energy after every operation.
//! - A collectible is rewarded at most once.
//! - At most one level-up per interact request.
//! - Time is injected; identical frames produce identical state.

pub mod avatar;
pub mod effect;
pub mod error;
pub mod interaction;
pub mod meters;
pub mod progression;
pub mod scatter;
pub mod simulation;
pub mod tuning;

pub use avatar::AvatarState;
pub use effect::Effect;
pub use error::SimError;
pub use interaction::{Collectible, InteractReport, interact};
pub use meters::{Meters, ResourcePool};
pub use progression::{LevelUp, Progression};
pub use scatter::{SplitMix, scatter_collectibles};
pub use simulation::{Frame, SimEvent, Simulation, TickReport};
pub use tuning::{Reward, Rewards, Tuning};

pub fn crate_info() -> &'static str {
    "explorer-kernel v0.1.0"
}
