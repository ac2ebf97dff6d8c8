//! Avatar kinematics: look, run/crouch/jump, gravity, ground and bounds.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use explorer_common::Pool;
use explorer_input::InputSnapshot;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::effect::Effect;
use crate::error::SimError;
use crate::meters::Meters;
use crate::tuning::Tuning;

/// Position, orientation and motion of the player avatar.
///
/// `position.y` is eye height above the world's zero plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AvatarState {
    pub position: Vec3,
    /// Radians around +Y, wrapped into `(-PI, PI]`.
    pub yaw: f32,
    /// Radians, clamped to `[-PI/2, PI/2]`.
    pub pitch: f32,
    pub velocity: Vec3,
    pub running: bool,
    pub crouching: bool,
    pub jumping: bool,
    walking: bool,
}

impl AvatarState {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            velocity: Vec3::ZERO,
            running: false,
            crouching: false,
            jumping: false,
            walking: false,
        }
    }

    /// True while there is movement input and the avatar is not airborne.
    pub fn is_walking(&self) -> bool {
        self.walking
    }

    /// Height the avatar rests at given the current stance.
    pub fn ground_height(&self, tuning: &Tuning) -> f32 {
        if self.crouching {
            tuning.crouch_ground_height
        } else {
            tuning.ground_height
        }
    }

    /// World-space orientation for camera placement (yaw then pitch).
    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    /// Advance one tick of `dt` seconds.
    ///
    /// Energy is drained or regenerated as a side effect. With `dt == 0` no
    /// time is integrated, but look, stance, run state and a jump impulse are
    /// still applied.
    pub fn advance(
        &mut self,
        input: &InputSnapshot,
        meters: &mut Meters,
        tuning: &Tuning,
        dt: f32,
    ) -> Result<Vec<Effect>, SimError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(SimError::InvalidInput {
                reason: format!("dt must be finite and >= 0, got {dt}"),
            });
        }
        let _span = tracing::info_span!("advance").entered();
        let mut effects = Vec::new();

        self.apply_look(input);

        self.running = input.run && input.any_movement_held() && !meters.energy.is_empty();
        if self.running {
            meters.drain(Pool::Energy, tuning.run_drain * dt);
        } else {
            meters.add(Pool::Energy, tuning.energy_regen * dt);
        }

        self.crouching = input.crouch;

        let axes = input.move_axes();
        let moving = axes != glam::Vec2::ZERO;
        if moving {
            let speed = if self.running {
                tuning.walk_speed * tuning.run_multiplier
            } else {
                tuning.walk_speed
            };
            let local = Vec3::new(axes.x, 0.0, axes.y).normalize();
            let world = Quat::from_rotation_y(self.yaw) * local;
            self.velocity.x = world.x * speed;
            self.velocity.z = world.z * speed;
        } else if dt > 0.0 {
            self.velocity.x *= tuning.friction;
            self.velocity.z *= tuning.friction;
        }

        if input.jump && !self.jumping && meters.energy.current() > tuning.jump_min_energy {
            self.velocity.y = tuning.jump_impulse;
            self.jumping = true;
            meters.drain(Pool::Energy, tuning.jump_cost);
            tracing::debug!(energy = meters.energy.current(), "jump");
            effects.push(Effect::Jumped);
        }

        if dt > 0.0 {
            self.velocity.y += tuning.gravity * dt;
            self.position += self.velocity * dt;
        }

        // A zero-length tick must not cancel an impulse applied in it.
        let ground = self.ground_height(tuning);
        let rising_in_place = dt == 0.0 && self.velocity.y > 0.0;
        if self.position.y <= ground && !rising_in_place {
            self.position.y = ground;
            self.velocity.y = 0.0;
            if self.jumping {
                self.jumping = false;
                effects.push(Effect::Landed);
            }
        }

        let bound = tuning.world_half_extent;
        self.position.x = self.position.x.clamp(-bound, bound);
        self.position.z = self.position.z.clamp(-bound, bound);

        self.walking = moving && !self.jumping;

        tracing::trace!(
            x = self.position.x,
            y = self.position.y,
            z = self.position.z,
            energy = meters.energy.current(),
            running = self.running,
            "advanced"
        );
        Ok(effects)
    }

    fn apply_look(&mut self, input: &InputSnapshot) {
        let look = input.look;
        if look.yaw.is_finite() {
            self.yaw = wrap_angle(self.yaw + look.yaw);
        }
        if look.pitch.is_finite() {
            self.pitch = (self.pitch + look.pitch).clamp(-FRAC_PI_2, FRAC_PI_2);
        }
    }
}

/// Wrap into `(-PI, PI]`.
fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped == -PI { PI } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use explorer_input::LookDelta;

    const DT: f32 = 1.0 / 60.0;

    fn grounded() -> (AvatarState, Meters, Tuning) {
        let tuning = Tuning::default();
        let avatar = AvatarState::new(Vec3::new(0.0, tuning.ground_height, 0.0));
        (avatar, Meters::new(100.0, 100.0), tuning)
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn negative_dt_is_rejected() {
        let (mut a, mut m, t) = grounded();
        let err = a.advance(&InputSnapshot::default(), &mut m, &t, -0.1);
        assert!(matches!(err, Err(SimError::InvalidInput { .. })));
        let err = a.advance(&InputSnapshot::default(), &mut m, &t, f32::NAN);
        assert!(matches!(err, Err(SimError::InvalidInput { .. })));
    }

    #[test]
    fn forward_walks_along_negative_z() {
        let (mut a, mut m, t) = grounded();
        let input = InputSnapshot {
            forward: true,
            ..Default::default()
        };
        a.advance(&input, &mut m, &t, DT).unwrap();
        assert!(close(a.velocity.z, -5.0));
        assert!(close(a.velocity.x, 0.0));
        assert!(a.position.z < 0.0);
        assert!(a.is_walking());
    }

    #[test]
    fn yaw_rotates_movement() {
        let (mut a, mut m, t) = grounded();
        a.yaw = FRAC_PI_2;
        let input = InputSnapshot {
            forward: true,
            ..Default::default()
        };
        a.advance(&input, &mut m, &t, DT).unwrap();
        // facing +90 degrees about Y, forward points down -X
        assert!(close(a.velocity.x, -5.0));
        assert!(close(a.velocity.z, 0.0));
    }

    #[test]
    fn diagonal_speed_is_normalized() {
        let (mut a, mut m, t) = grounded();
        let input = InputSnapshot {
            forward: true,
            left: true,
            ..Default::default()
        };
        a.advance(&input, &mut m, &t, DT).unwrap();
        let horizontal = Vec3::new(a.velocity.x, 0.0, a.velocity.z).length();
        assert!(close(horizontal, 5.0));
    }

    #[test]
    fn running_doubles_speed_and_drains_energy() {
        let (mut a, mut m, t) = grounded();
        let input = InputSnapshot {
            forward: true,
            run: true,
            ..Default::default()
        };
        a.advance(&input, &mut m, &t, 0.5).unwrap();
        assert!(a.running);
        assert!(close(a.velocity.z, -10.0));
        assert!(close(m.energy.current(), 85.0));
    }

    #[test]
    fn run_without_movement_regenerates() {
        let (mut a, mut m, t) = grounded();
        m.drain(Pool::Energy, 50.0);
        let input = InputSnapshot {
            run: true,
            ..Default::default()
        };
        a.advance(&input, &mut m, &t, 0.5).unwrap();
        assert!(!a.running);
        assert!(close(m.energy.current(), 60.0));
    }

    #[test]
    fn run_with_no_energy_walks() {
        let (mut a, mut m, t) = grounded();
        m.drain(Pool::Energy, 100.0);
        let input = InputSnapshot {
            forward: true,
            run: true,
            ..Default::default()
        };
        a.advance(&input, &mut m, &t, DT).unwrap();
        assert!(!a.running);
        assert!(close(a.velocity.z, -5.0));
        assert!(m.energy.current() > 0.0);
    }

    #[test]
    fn release_slides_with_friction() {
        let (mut a, mut m, t) = grounded();
        let forward = InputSnapshot {
            forward: true,
            ..Default::default()
        };
        a.advance(&forward, &mut m, &t, DT).unwrap();
        a.advance(&InputSnapshot::default(), &mut m, &t, DT).unwrap();
        assert!(close(a.velocity.z, -4.5));
        a.advance(&InputSnapshot::default(), &mut m, &t, DT).unwrap();
        assert!(close(a.velocity.z, -4.05));
        assert!(!a.is_walking());
    }

    #[test]
    fn jump_applies_impulse_and_cost() {
        let (mut a, mut m, t) = grounded();
        let input = InputSnapshot {
            jump: true,
            ..Default::default()
        };
        let effects = a.advance(&input, &mut m, &t, DT).unwrap();
        assert_eq!(effects, vec![Effect::Jumped]);
        assert!(a.jumping);
        assert!(close(a.velocity.y, 15.0 - 30.0 * DT));
        assert!(a.position.y > t.ground_height);
        // cost applied after the tick's regeneration (already full)
        assert!(close(m.energy.current(), 90.0));
    }

    #[test]
    fn no_double_jump_while_airborne() {
        let (mut a, mut m, t) = grounded();
        let input = InputSnapshot {
            jump: true,
            ..Default::default()
        };
        a.advance(&input, &mut m, &t, DT).unwrap();
        let vy = a.velocity.y;
        let effects = a.advance(&input, &mut m, &t, DT).unwrap();
        assert!(effects.is_empty());
        assert!(close(a.velocity.y, vy - 30.0 * DT));
    }

    #[test]
    fn jump_gated_by_energy() {
        let (mut a, mut m, t) = grounded();
        m.drain(Pool::Energy, 90.0);
        let input = InputSnapshot {
            jump: true,
            ..Default::default()
        };
        let effects = a.advance(&input, &mut m, &t, 0.0).unwrap();
        assert!(effects.is_empty());
        assert!(!a.jumping);
        assert_eq!(a.velocity.y, 0.0);
    }

    #[test]
    fn zero_dt_still_applies_jump_and_crouch() {
        let (mut a, mut m, t) = grounded();
        let input = InputSnapshot {
            jump: true,
            crouch: true,
            ..Default::default()
        };
        let before = a.position;
        let effects = a.advance(&input, &mut m, &t, 0.0).unwrap();
        assert_eq!(effects, vec![Effect::Jumped]);
        assert!(a.jumping);
        assert!(a.crouching);
        assert_eq!(a.velocity.y, 15.0);
        assert_eq!(a.position, before);
    }

    #[test]
    fn lands_on_ground() {
        let (mut a, mut m, t) = grounded();
        a.position.y = 20.0;
        a.velocity.y = -5.0;
        a.jumping = true;
        let mut landed = false;
        for _ in 0..600 {
            let effects = a.advance(&InputSnapshot::default(), &mut m, &t, DT).unwrap();
            landed |= effects.contains(&Effect::Landed);
        }
        assert!(landed);
        assert_eq!(a.position.y, t.ground_height);
        assert_eq!(a.velocity.y, 0.0);
        assert!(!a.jumping);
    }

    #[test]
    fn crouch_lowers_ground_and_standing_restores_it() {
        let (mut a, mut m, t) = grounded();
        let crouch = InputSnapshot {
            crouch: true,
            ..Default::default()
        };
        for _ in 0..120 {
            a.advance(&crouch, &mut m, &t, DT).unwrap();
        }
        assert_eq!(a.position.y, t.crouch_ground_height);
        a.advance(&InputSnapshot::default(), &mut m, &t, DT).unwrap();
        assert_eq!(a.position.y, t.ground_height);
    }

    #[test]
    fn bounds_clamp_horizontal_position() {
        let (mut a, mut m, t) = grounded();
        a.position.x = 500.0;
        a.position.z = -500.0;
        a.advance(&InputSnapshot::default(), &mut m, &t, DT).unwrap();
        assert_eq!(a.position.x, 90.0);
        assert_eq!(a.position.z, -90.0);
    }

    #[test]
    fn pitch_is_clamped_and_yaw_wraps() {
        let (mut a, mut m, t) = grounded();
        let input = InputSnapshot {
            look: LookDelta {
                yaw: 3.0 * PI,
                pitch: 10.0,
            },
            ..Default::default()
        };
        a.advance(&input, &mut m, &t, DT).unwrap();
        assert_eq!(a.pitch, FRAC_PI_2);
        assert!(close(a.yaw.abs(), PI));
    }

    #[test]
    fn wrap_angle_range() {
        assert_eq!(wrap_angle(0.0), 0.0);
        assert!(close(wrap_angle(TAU + 1.0), 1.0));
        assert!(close(wrap_angle(-TAU - 1.0), -1.0));
        assert_eq!(wrap_angle(-PI), PI);
    }
}
