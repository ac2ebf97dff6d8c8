//! Reproducible pickup layout.

use explorer_common::{CollectibleKind, EntityId};
use glam::Vec3;

use crate::interaction::Collectible;

const CHEST_COUNT: usize = 10;
const CHEST_SPREAD: f32 = 150.0;
const CHEST_HEIGHT: f32 = 3.0;
const ORB_COUNT: usize = 15;
const ORB_SPREAD: f32 = 180.0;
const ORB_MIN_HEIGHT: f32 = 5.0;
const ORB_HEIGHT_RANGE: f32 = 10.0;

/// Deterministic random stream over splitmix64.
#[derive(Debug, Clone)]
pub struct SplitMix {
    state: u64,
}

impl SplitMix {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)` from the top 24 bits.
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform in `[-spread / 2, spread / 2)`.
    fn centered(&mut self, spread: f32) -> f32 {
        (self.next_f32() - 0.5) * spread
    }

    fn entity_id(&mut self) -> EntityId {
        let hi = self.next_u64() as u128;
        let lo = self.next_u64() as u128;
        EntityId::from_u128((hi << 64) | lo)
    }
}

/// Place the standard set of chests and orbs. Same seed, same layout and ids.
pub fn scatter_collectibles(seed: u64) -> Vec<Collectible> {
    let mut rng = SplitMix::new(seed);
    let mut out = Vec::with_capacity(CHEST_COUNT + ORB_COUNT);

    for _ in 0..CHEST_COUNT {
        let x = rng.centered(CHEST_SPREAD);
        let z = rng.centered(CHEST_SPREAD);
        let id = rng.entity_id();
        out.push(Collectible::with_id(
            id,
            CollectibleKind::Chest,
            Vec3::new(x, CHEST_HEIGHT, z),
        ));
    }
    for _ in 0..ORB_COUNT {
        let x = rng.centered(ORB_SPREAD);
        let y = rng.next_f32() * ORB_HEIGHT_RANGE + ORB_MIN_HEIGHT;
        let z = rng.centered(ORB_SPREAD);
        let id = rng.entity_id();
        out.push(Collectible::with_id(id, CollectibleKind::Orb, Vec3::new(x, y, z)));
    }

    tracing::debug!(seed, count = out.len(), "scattered collectibles");
    out
}
