use explorer_common::{CollectibleKind, EntityId};
use serde::{Deserialize, Serialize};

use crate::progression::LevelUp;
use crate::tuning::Reward;

/// Something that happened during a tick that presentation may react to
/// with a message, sound or animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// A jump impulse was applied.
    Jumped,
    /// The avatar touched ground after a jump.
    Landed,
    /// A collectible was picked up. `reward` is the nominal table entry;
    /// pool gains may have been clamped.
    Collected {
        id: EntityId,
        kind: CollectibleKind,
        reward: Reward,
    },
    LeveledUp(LevelUp),
}
