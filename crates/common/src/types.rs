use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an entity in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Build an id from raw bits. Used for reproducible layouts.
    pub fn from_u128(bits: u128) -> Self {
        Self(Uuid::from_u128(bits))
    }

    /// First eight hex digits, for log lines.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

/// What a collectible is. The kind selects its reward.
///
/// Content is authored with string tags; tags the simulation has no reward
/// for are kept as `Other` so the lookup can refuse them without losing the
/// tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CollectibleKind {
    Chest,
    Orb,
    Other(String),
}

impl CollectibleKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Chest => "chest",
            Self::Orb => "orb",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for CollectibleKind {
    fn from(tag: &str) -> Self {
        match tag {
            "chest" => Self::Chest,
            "orb" => Self::Orb,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for CollectibleKind {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl From<CollectibleKind> for String {
    fn from(kind: CollectibleKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for CollectibleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selects one of the two resource pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pool {
    Health,
    Energy,
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Health => f.write_str("health"),
            Self::Energy => f.write_str("energy"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_uniqueness() {
        let a = EntityId::new();
        let b = EntityId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn entity_id_from_bits_is_stable() {
        assert_eq!(EntityId::from_u128(7), EntityId::from_u128(7));
        assert_eq!(EntityId::from_u128(0xabcd_ef01 << 96).short(), "abcdef01");
    }

    #[test]
    fn kind_tags_round_trip() {
        assert_eq!(CollectibleKind::from("chest"), CollectibleKind::Chest);
        assert_eq!(CollectibleKind::from("orb"), CollectibleKind::Orb);
        let odd = CollectibleKind::from("mushroom");
        assert_eq!(odd, CollectibleKind::Other("mushroom".into()));
        assert_eq!(odd.to_string(), "mushroom");
    }

    #[test]
    fn pool_display() {
        assert_eq!(Pool::Health.to_string(), "health");
        assert_eq!(Pool::Energy.to_string(), "energy");
    }
}
