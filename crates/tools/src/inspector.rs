use explorer_common::EntityId;
use explorer_kernel::Simulation;
use serde::Serialize;

/// Read-only queries against the simulation for HUDs and debugging.
pub struct Inspector;

impl Inspector {
    /// Values a HUD shows each frame.
    pub fn readout(sim: &Simulation) -> Readout {
        let m = sim.meters();
        let p = sim.progression();
        let pos = sim.avatar().position;
        Readout {
            tick: sim.tick(),
            health: m.health.current().floor() as u32,
            max_health: m.health.max().floor() as u32,
            health_percent: m.health.fraction() * 100.0,
            energy: m.energy.current().floor() as u32,
            max_energy: m.energy.max().floor() as u32,
            energy_percent: m.energy.fraction() * 100.0,
            experience: p.experience(),
            threshold: p.threshold(),
            xp_percent: p.fraction() * 100.0,
            level: p.level(),
            position: [
                pos.x.floor() as i32,
                pos.y.floor() as i32,
                pos.z.floor() as i32,
            ],
            objects_found: sim.objects_found(),
            remaining: sim
                .collectibles()
                .values()
                .filter(|c| !c.is_collected())
                .count(),
            walking: sim.avatar().is_walking(),
        }
    }

    /// Ids of pickups not yet collected, in deterministic order.
    pub fn remaining(sim: &Simulation) -> Vec<EntityId> {
        sim.collectibles()
            .values()
            .filter(|c| !c.is_collected())
            .map(|c| c.id)
            .collect()
    }

    /// Distance from the avatar to the closest uncollected pickup.
    pub fn nearest(sim: &Simulation) -> Option<(EntityId, f32)> {
        let at = sim.avatar().position;
        sim.collectibles()
            .values()
            .filter(|c| !c.is_collected())
            .map(|c| (c.id, at.distance(c.position)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

/// HUD values. Health, energy and position are floored for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Readout {
    pub tick: u64,
    pub health: u32,
    pub max_health: u32,
    pub health_percent: f32,
    pub energy: u32,
    pub max_energy: u32,
    pub energy_percent: f32,
    pub experience: u32,
    pub threshold: u32,
    pub xp_percent: f32,
    pub level: u32,
    pub position: [i32; 3],
    pub objects_found: u32,
    pub remaining: usize,
    /// Footstep cue for audio.
    pub walking: bool,
}

impl std::fmt::Display for Readout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "tick={} health={}/{} energy={}/{} xp={}/{} level={} pos=({}, {}, {}) found={} remaining={}",
            self.tick,
            self.health,
            self.max_health,
            self.energy,
            self.max_energy,
            self.experience,
            self.threshold,
            self.level,
            self.position[0],
            self.position[1],
            self.position[2],
            self.objects_found,
            self.remaining,
        )
    }
}
