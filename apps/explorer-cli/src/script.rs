//! Scripted input for headless sessions.

use std::f32::consts::PI;

use clap::ValueEnum;
use explorer_input::{InputCollector, InputSnapshot, Key};
use explorer_kernel::Simulation;
use glam::Vec3;

/// How high above the avatar a pickup may sit and still be worth walking to.
const REACH: f32 = 4.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Script {
    /// Walk forward with no other input.
    Walk,
    /// Run forward, jumping every second.
    Sprint,
    /// Walk to each reachable pickup in turn and collect it.
    Collect,
}

/// Drives an `InputCollector` the way a player's keyboard and mouse would.
pub struct Pilot {
    script: Script,
    collector: InputCollector,
    tick: u64,
}

impl Pilot {
    pub fn new(script: Script, sensitivity: f32) -> Self {
        let mut collector = InputCollector::new(sensitivity);
        collector.set_pointer_captured(true);
        Self {
            script,
            collector,
            tick: 0,
        }
    }

    /// Produce the next tick's input given the current simulation state.
    pub fn drive(&mut self, sim: &Simulation) -> InputSnapshot {
        self.tick += 1;
        match self.script {
            Script::Walk => {
                self.collector.key_down(Key::KeyW);
            }
            Script::Sprint => {
                self.collector.key_down(Key::KeyW);
                self.collector.key_down(Key::ShiftLeft);
                if self.tick % 60 == 0 {
                    self.collector.key_down(Key::Space);
                } else {
                    self.collector.key_up(Key::Space);
                }
            }
            Script::Collect => self.steer(sim),
        }
        self.collector.sample()
    }

    fn steer(&mut self, sim: &Simulation) {
        self.collector.key_up(Key::KeyE);
        let avatar = sim.avatar();
        let at = avatar.position;
        let radius = sim.tuning().interact_radius;

        let target = sim
            .collectibles()
            .values()
            .filter(|c| !c.is_collected() && (c.position.y - at.y).abs() < REACH)
            .map(|c| c.position)
            .min_by(|a, b| flat_distance(at, *a).total_cmp(&flat_distance(at, *b)));

        let Some(target) = target else {
            self.collector.key_up(Key::KeyW);
            return;
        };

        if at.distance(target) < radius {
            self.collector.key_up(Key::KeyW);
            self.collector.key_down(Key::KeyE);
            return;
        }

        // forward is -Z rotated by yaw
        let to = target - at;
        let desired = (-to.x).atan2(-to.z);
        let turn = wrap(desired - avatar.yaw);
        let sensitivity = sim.tuning().look_sensitivity;
        self.collector.pointer_moved(-turn / sensitivity, 0.0);
        self.collector.key_down(Key::KeyW);
    }
}

fn flat_distance(a: Vec3, b: Vec3) -> f32 {
    Vec3::new(a.x - b.x, 0.0, a.z - b.z).length()
}

fn wrap(angle: f32) -> f32 {
    (angle + PI).rem_euclid(2.0 * PI) - PI
}
