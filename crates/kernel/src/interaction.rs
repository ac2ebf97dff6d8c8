//! Proximity pickups.

use explorer_common::{CollectibleKind, EntityId, Pool};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::effect::Effect;
use crate::error::SimError;
use crate::meters::Meters;
use crate::progression::Progression;
use crate::tuning::Tuning;

/// A world pickup with a one-time reward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: EntityId,
    pub kind: CollectibleKind,
    pub position: Vec3,
    collected: bool,
}

impl Collectible {
    pub fn new(kind: impl Into<CollectibleKind>, position: Vec3) -> Self {
        Self::with_id(EntityId::new(), kind, position)
    }

    pub fn with_id(id: EntityId, kind: impl Into<CollectibleKind>, position: Vec3) -> Self {
        Self {
            id,
            kind: kind.into(),
            position,
            collected: false,
        }
    }

    /// Once true, stays true.
    pub fn is_collected(&self) -> bool {
        self.collected
    }
}

/// Result of one interact request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractReport {
    pub effects: Vec<Effect>,
    /// Pickups in range that could not be rewarded. They stay uncollected.
    pub faults: Vec<SimError>,
}

impl InteractReport {
    pub fn collected_count(&self) -> usize {
        self.effects
            .iter()
            .filter(|e| matches!(e, Effect::Collected { .. }))
            .count()
    }
}

/// Collect every uncollected pickup strictly within the interact radius of
/// `position`, then run a single level-up check if experience was gained.
pub fn interact<'a>(
    position: Vec3,
    collectibles: impl IntoIterator<Item = &'a mut Collectible>,
    meters: &mut Meters,
    progression: &mut Progression,
    tuning: &Tuning,
) -> InteractReport {
    let _span = tracing::info_span!("interact").entered();
    let mut report = InteractReport::default();
    let mut gained = false;

    for item in collectibles {
        if item.collected || position.distance(item.position) >= tuning.interact_radius {
            continue;
        }
        let reward = match tuning.rewards.get(&item.kind) {
            Ok(reward) => reward,
            Err(err) => {
                tracing::warn!(id = %item.id.short(), %err, "pickup skipped");
                report.faults.push(err);
                continue;
            }
        };

        item.collected = true;
        progression.gain(reward.experience);
        meters.add(Pool::Health, reward.health);
        meters.add(Pool::Energy, reward.energy);
        gained |= reward.experience > 0;

        tracing::debug!(
            id = %item.id.short(),
            kind = %item.kind,
            xp = reward.experience,
            "collected"
        );
        report.effects.push(Effect::Collected {
            id: item.id,
            kind: item.kind.clone(),
            reward,
        });
    }

    if gained {
        if let Some(level_up) = progression.check(meters, tuning) {
            report.effects.push(Effect::LeveledUp(level_up));
        }
    }
    report
}
