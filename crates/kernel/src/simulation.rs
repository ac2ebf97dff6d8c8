use explorer_common::EntityId;
use explorer_input::InputSnapshot;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::avatar::AvatarState;
use crate::effect::Effect;
use crate::error::SimError;
use crate::interaction::{self, Collectible, InteractReport};
use crate::meters::Meters;
use crate::progression::Progression;
use crate::tuning::Tuning;

/// A record appended for every state change worth replaying or auditing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// Kinematics ran for a tick.
    Advanced { tick: u64, position: Vec3, energy: f32 },
    Collected { tick: u64, id: EntityId },
    LeveledUp { tick: u64, level: u32 },
}

/// One recorded tick of input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub input: InputSnapshot,
    pub dt: f32,
}

/// What a tick produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub effects: Vec<Effect>,
    pub faults: Vec<SimError>,
}

/// The owned simulation context: avatar, meters, progression and pickups.
///
/// Every mutation flows through `step` or `interact`. Pickups are kept in a
/// BTreeMap so scans and hashes visit them in the same order on every run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Simulation {
    tuning: Tuning,
    avatar: AvatarState,
    meters: Meters,
    progression: Progression,
    collectibles: BTreeMap<EntityId, Collectible>,
    tick: u64,
    objects_found: u32,
    #[serde(skip)]
    event_log: Vec<SimEvent>,
}

impl Simulation {
    /// Fresh session: avatar at the spawn point, full pools, no pickups.
    pub fn new(tuning: Tuning) -> Result<Self, SimError> {
        tuning.validate()?;
        Ok(Self {
            avatar: AvatarState::new(tuning.spawn_position),
            meters: Meters::new(tuning.initial_health, tuning.initial_energy),
            progression: Progression::new(tuning.initial_threshold),
            collectibles: BTreeMap::new(),
            tick: 0,
            objects_found: 0,
            event_log: Vec::new(),
            tuning,
        })
    }

    pub fn with_collectibles(
        tuning: Tuning,
        collectibles: impl IntoIterator<Item = Collectible>,
    ) -> Result<Self, SimError> {
        let mut sim = Self::new(tuning)?;
        for c in collectibles {
            sim.add_collectible(c);
        }
        Ok(sim)
    }

    /// Register a pickup. Replaces any existing pickup with the same id.
    pub fn add_collectible(&mut self, collectible: Collectible) {
        self.collectibles.insert(collectible.id, collectible);
    }

    /// Tuning this session was created with.
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Current avatar state.
    pub fn avatar(&self) -> &AvatarState {
        &self.avatar
    }

    /// Direct access for placing the avatar (teleports, test setups).
    pub fn avatar_mut(&mut self) -> &mut AvatarState {
        &mut self.avatar
    }

    /// Health and energy pools.
    pub fn meters(&self) -> &Meters {
        &self.meters
    }

    /// Mutable pools, for scripted setups.
    pub fn meters_mut(&mut self) -> &mut Meters {
        &mut self.meters
    }

    /// Experience, threshold and level.
    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    /// Mutable progression, for scripted setups.
    pub fn progression_mut(&mut self) -> &mut Progression {
        &mut self.progression
    }

    /// All pickups, collected or not, in id order.
    pub fn collectibles(&self) -> &BTreeMap<EntityId, Collectible> {
        &self.collectibles
    }

    /// Look up one pickup.
    pub fn collectible(&self, id: EntityId) -> Option<&Collectible> {
        self.collectibles.get(&id)
    }

    /// Number of ticks stepped so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Pickups collected over the session.
    pub fn objects_found(&self) -> u32 {
        self.objects_found
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[SimEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Run one tick: kinematics, then the interact edge if it is set.
    ///
    /// A rejected `dt` leaves the state untouched and does not count a tick.
    /// Each tick appends to the event log; long-running callers must call
    /// `drain_events` to keep it bounded.
    pub fn step(&mut self, input: &InputSnapshot, dt: f32) -> Result<TickReport, SimError> {
        let mut effects = self
            .avatar
            .advance(input, &mut self.meters, &self.tuning, dt)?;
        self.tick += 1;
        self.event_log.push(SimEvent::Advanced {
            tick: self.tick,
            position: self.avatar.position,
            energy: self.meters.energy.current(),
        });

        let mut faults = Vec::new();
        if input.interact {
            let report = self.interact();
            effects.extend(report.effects);
            faults.extend(report.faults);
        }
        Ok(TickReport { effects, faults })
    }

    /// Resolve pickups around the avatar's current position.
    pub fn interact(&mut self) -> InteractReport {
        let report = interaction::interact(
            self.avatar.position,
            self.collectibles.values_mut(),
            &mut self.meters,
            &mut self.progression,
            &self.tuning,
        );
        for effect in &report.effects {
            match effect {
                Effect::Collected { id, .. } => {
                    self.objects_found += 1;
                    self.event_log.push(SimEvent::Collected {
                        tick: self.tick,
                        id: *id,
                    });
                }
                Effect::LeveledUp(up) => {
                    self.event_log.push(SimEvent::LeveledUp {
                        tick: self.tick,
                        level: up.level,
                    });
                }
                Effect::Jumped | Effect::Landed => {}
            }
        }
        report
    }

    /// Step through recorded frames, stopping at the first rejected one.
    pub fn run(&mut self, frames: &[Frame]) -> Result<Vec<TickReport>, SimError> {
        frames
            .iter()
            .map(|frame| self.step(&frame.input, frame.dt))
            .collect()
    }

    /// Deterministic hash of the simulation state for replay comparison.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        let a = &self.avatar;
        mix(&mut h, &self.tick.to_le_bytes());
        for v in [a.position, a.velocity] {
            mix(&mut h, &v.x.to_le_bytes());
            mix(&mut h, &v.y.to_le_bytes());
            mix(&mut h, &v.z.to_le_bytes());
        }
        mix(&mut h, &a.yaw.to_le_bytes());
        mix(&mut h, &a.pitch.to_le_bytes());
        mix(&mut h, &[a.running as u8, a.crouching as u8, a.jumping as u8]);
        for pool in [self.meters.health, self.meters.energy] {
            mix(&mut h, &pool.current().to_le_bytes());
            mix(&mut h, &pool.max().to_le_bytes());
        }
        mix(&mut h, &self.progression.experience().to_le_bytes());
        mix(&mut h, &self.progression.threshold().to_le_bytes());
        mix(&mut h, &self.progression.level().to_le_bytes());
        mix(&mut h, &self.objects_found.to_le_bytes());
        for (id, c) in &self.collectibles {
            mix(&mut h, id.0.as_bytes());
            mix(&mut h, &[c.is_collected() as u8]);
        }
        h
    }
}
