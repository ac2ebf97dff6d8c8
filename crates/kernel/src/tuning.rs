//! Tunable constants for movement, meters, pickups and progression.

use explorer_common::CollectibleKind;
use explorer_input::DEFAULT_LOOK_SENSITIVITY;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// What a collectible grants when picked up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reward {
    pub experience: u32,
    pub health: f32,
    pub energy: f32,
}

/// Reward table keyed by collectible kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rewards {
    pub chest: Reward,
    pub orb: Reward,
}

impl Default for Rewards {
    fn default() -> Self {
        Self {
            chest: Reward {
                experience: 20,
                health: 10.0,
                energy: 0.0,
            },
            orb: Reward {
                experience: 10,
                health: 0.0,
                energy: 15.0,
            },
        }
    }
}

impl Rewards {
    /// Look up the reward for a kind. Unknown kinds fail closed.
    pub fn get(&self, kind: &CollectibleKind) -> Result<Reward, SimError> {
        match kind {
            CollectibleKind::Chest => Ok(self.chest),
            CollectibleKind::Orb => Ok(self.orb),
            CollectibleKind::Other(name) => Err(SimError::UnknownKind(name.clone())),
        }
    }
}

/// Simulation tuning. Units are world units and seconds.
///
/// Deserializes with every field optional, so a config file only needs the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Where the avatar starts.
    pub spawn_position: Vec3,
    /// Horizontal speed while walking.
    pub walk_speed: f32,
    /// Speed multiplier while running.
    pub run_multiplier: f32,
    /// Energy drained per second while running.
    pub run_drain: f32,
    /// Energy regained per second while not running.
    pub energy_regen: f32,
    /// Upward velocity set by a jump.
    pub jump_impulse: f32,
    /// Energy debited per jump.
    pub jump_cost: f32,
    /// Energy must be strictly above this to jump.
    pub jump_min_energy: f32,
    /// Vertical acceleration, negative is down.
    pub gravity: f32,
    /// Horizontal velocity factor applied per tick with no movement input.
    pub friction: f32,
    pub ground_height: f32,
    pub crouch_ground_height: f32,
    /// Horizontal position is clamped to `[-half_extent, half_extent]`.
    pub world_half_extent: f32,
    /// Pickups strictly closer than this are collected.
    pub interact_radius: f32,
    pub initial_health: f32,
    pub initial_energy: f32,
    pub initial_threshold: u32,
    /// Added to the experience threshold on each level-up.
    pub threshold_step: u32,
    /// Added to both pool maxima on each level-up.
    pub max_step: f32,
    pub rewards: Rewards,
    /// Radians per pixel of pointer motion.
    pub look_sensitivity: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_position: Vec3::new(0.0, 5.0, 10.0),
            walk_speed: 5.0,
            run_multiplier: 2.0,
            run_drain: 30.0,
            energy_regen: 20.0,
            jump_impulse: 15.0,
            jump_cost: 10.0,
            jump_min_energy: 10.0,
            gravity: -30.0,
            friction: 0.9,
            ground_height: 5.0,
            crouch_ground_height: 2.0,
            world_half_extent: 90.0,
            interact_radius: 5.0,
            initial_health: 100.0,
            initial_energy: 100.0,
            initial_threshold: 100,
            threshold_step: 50,
            max_step: 20.0,
            rewards: Rewards::default(),
            look_sensitivity: DEFAULT_LOOK_SENSITIVITY,
        }
    }
}

impl Tuning {
    /// Reject values the movement and meter code cannot work with.
    pub fn validate(&self) -> Result<(), SimError> {
        let positive = [
            ("walk_speed", self.walk_speed),
            ("run_multiplier", self.run_multiplier),
            ("world_half_extent", self.world_half_extent),
            ("interact_radius", self.interact_radius),
            ("initial_health", self.initial_health),
            ("initial_energy", self.initial_energy),
            ("look_sensitivity", self.look_sensitivity),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::invalid_tuning(field, format!("must be > 0, got {value}")));
            }
        }

        let non_negative = [
            ("run_drain", self.run_drain),
            ("energy_regen", self.energy_regen),
            ("jump_impulse", self.jump_impulse),
            ("jump_cost", self.jump_cost),
            ("jump_min_energy", self.jump_min_energy),
            ("max_step", self.max_step),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SimError::invalid_tuning(field, format!("must be >= 0, got {value}")));
            }
        }

        for (field, value) in [
            ("ground_height", self.ground_height),
            ("crouch_ground_height", self.crouch_ground_height),
        ] {
            if !value.is_finite() {
                return Err(SimError::invalid_tuning(field, format!("must be finite, got {value}")));
            }
        }

        if !(0.0..=1.0).contains(&self.friction) {
            return Err(SimError::invalid_tuning(
                "friction",
                format!("must be within [0, 1], got {}", self.friction),
            ));
        }
        if !self.gravity.is_finite() || self.gravity > 0.0 {
            return Err(SimError::invalid_tuning(
                "gravity",
                format!("must point down, got {}", self.gravity),
            ));
        }
        if self.crouch_ground_height > self.ground_height {
            return Err(SimError::invalid_tuning(
                "crouch_ground_height",
                format!(
                    "{} is above ground_height {}",
                    self.crouch_ground_height, self.ground_height
                ),
            ));
        }
        if self.initial_threshold == 0 {
            return Err(SimError::invalid_tuning("initial_threshold", "must be > 0"));
        }
        if !self.spawn_position.is_finite() {
            return Err(SimError::invalid_tuning("spawn_position", "must be finite"));
        }
        Ok(())
    }
}
