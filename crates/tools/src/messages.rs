use explorer_common::CollectibleKind;
use explorer_kernel::Effect;

/// Player-facing text for an effect, or `None` for effects that only drive
/// sound or animation.
pub fn message(effect: &Effect) -> Option<String> {
    match effect {
        Effect::Collected { kind, reward, .. } => Some(match kind {
            CollectibleKind::Chest => format!(
                "Found treasure chest! +{} XP, +{} Health",
                reward.experience, reward.health
            ),
            CollectibleKind::Orb => format!(
                "Collected energy orb! +{} XP, +{} Energy",
                reward.experience, reward.energy
            ),
            CollectibleKind::Other(name) => format!("Found {name}! +{} XP", reward.experience),
        }),
        Effect::LeveledUp(_) => Some("LEVEL UP! Health and Energy increased!".to_string()),
        Effect::Jumped | Effect::Landed => None,
    }
}
