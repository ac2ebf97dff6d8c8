//! Experience and leveling.
//!
//! Experience accumulates freely; `check` performs at most one level-up per
//! call. A level-up consumes the old threshold from experience, raises the
//! threshold and both pool maxima, and refills both pools.

use explorer_common::Pool;
use serde::{Deserialize, Serialize};

use crate::meters::Meters;
use crate::tuning::Tuning;

/// Outcome of a level-up, for display and logging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelUp {
    pub level: u32,
    pub threshold: u32,
    pub max_health: f32,
    pub max_energy: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    experience: u32,
    threshold: u32,
    level: u32,
}

impl Progression {
    pub fn new(threshold: u32) -> Self {
        Self {
            experience: 0,
            threshold,
            level: 1,
        }
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// `experience / threshold`, capped at 1.
    pub fn fraction(&self) -> f32 {
        if self.threshold == 0 {
            return 0.0;
        }
        (self.experience as f32 / self.threshold as f32).min(1.0)
    }

    pub fn gain(&mut self, amount: u32) {
        self.experience = self.experience.saturating_add(amount);
    }

    /// Level up once if experience has reached the threshold.
    pub fn check(&mut self, meters: &mut Meters, tuning: &Tuning) -> Option<LevelUp> {
        if self.experience < self.threshold {
            return None;
        }
        self.experience -= self.threshold;
        self.threshold = self.threshold.saturating_add(tuning.threshold_step);
        self.level += 1;

        for pool in [Pool::Health, Pool::Energy] {
            let new_max = meters.pool(pool).max() + tuning.max_step;
            meters.set_max(pool, new_max, true);
        }

        let level_up = LevelUp {
            level: self.level,
            threshold: self.threshold,
            max_health: meters.health.max(),
            max_energy: meters.energy.max(),
        };
        tracing::info!(
            level = level_up.level,
            threshold = level_up.threshold,
            carried = self.experience,
            "level up"
        );
        Some(level_up)
    }
}
