use explorer_common::Pool;
use serde::{Deserialize, Serialize};

/// A bounded resource. Invariant: `0 <= current <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourcePool {
    current: f32,
    max: f32,
}

impl ResourcePool {
    /// A full pool with the given maximum. Negative maxima become 0.
    pub fn full(max: f32) -> Self {
        let max = max.max(0.0);
        Self { current: max, max }
    }

    /// Current amount.
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Capacity.
    pub fn max(&self) -> f32 {
        self.max
    }

    /// True at 0.
    pub fn is_empty(&self) -> bool {
        self.current <= 0.0
    }

    /// True at capacity.
    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// `current / max`, or 0 for a zero-capacity pool.
    pub fn fraction(&self) -> f32 {
        if self.max > 0.0 {
            self.current / self.max
        } else {
            0.0
        }
    }

    /// Add `amount` (may be negative), clamped to `[0, max]`. Returns the
    /// change actually applied. Non-finite amounts are ignored.
    pub fn add(&mut self, amount: f32) -> f32 {
        if !amount.is_finite() {
            return 0.0;
        }
        let before = self.current;
        self.current = (self.current + amount).clamp(0.0, self.max);
        self.current - before
    }

    /// Remove `amount`, stopping at 0. Returns how much was removed.
    pub fn drain(&mut self, amount: f32) -> f32 {
        if !amount.is_finite() || amount <= 0.0 {
            return 0.0;
        }
        -self.add(-amount)
    }

    /// Change the maximum. With `refill` the pool is topped up to the new
    /// maximum, otherwise `current` is only clamped down if it no longer fits.
    pub fn set_max(&mut self, new_max: f32, refill: bool) {
        if !new_max.is_finite() {
            return;
        }
        self.max = new_max.max(0.0);
        self.current = if refill {
            self.max
        } else {
            self.current.min(self.max)
        };
    }
}

/// Health and energy, the two pools the avatar carries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Meters {
    pub health: ResourcePool,
    pub energy: ResourcePool,
}

impl Meters {
    /// Both pools full.
    pub fn new(max_health: f32, max_energy: f32) -> Self {
        Self {
            health: ResourcePool::full(max_health),
            energy: ResourcePool::full(max_energy),
        }
    }

    /// Read one pool.
    pub fn pool(&self, pool: Pool) -> &ResourcePool {
        match pool {
            Pool::Health => &self.health,
            Pool::Energy => &self.energy,
        }
    }

    /// Mutate one pool.
    pub fn pool_mut(&mut self, pool: Pool) -> &mut ResourcePool {
        match pool {
            Pool::Health => &mut self.health,
            Pool::Energy => &mut self.energy,
        }
    }

    /// Clamped add on one pool. Returns the change applied.
    pub fn add(&mut self, pool: Pool, amount: f32) -> f32 {
        self.pool_mut(pool).add(amount)
    }

    /// Drain one pool, stopping at 0. Returns the amount removed.
    pub fn drain(&mut self, pool: Pool, amount: f32) -> f32 {
        self.pool_mut(pool).drain(amount)
    }

    /// Change one pool's capacity, optionally refilling it.
    pub fn set_max(&mut self, pool: Pool, new_max: f32, refill: bool) {
        self.pool_mut(pool).set_max(new_max, refill);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_clamps_to_max() {
        let mut p = ResourcePool::full(100.0);
        p.drain(30.0);
        assert_eq!(p.add(50.0), 30.0);
        assert_eq!(p.current(), 100.0);
    }

    #[test]
    fn drain_stops_at_zero() {
        let mut p = ResourcePool::full(20.0);
        assert_eq!(p.drain(35.0), 20.0);
        assert_eq!(p.current(), 0.0);
        assert!(p.is_empty());
    }

    #[test]
    fn negative_add_is_a_clamped_drain() {
        let mut p = ResourcePool::full(10.0);
        assert_eq!(p.add(-25.0), -10.0);
        assert_eq!(p.current(), 0.0);
    }

    #[test]
    fn negative_or_nan_drain_is_ignored() {
        let mut p = ResourcePool::full(10.0);
        p.drain(5.0);
        assert_eq!(p.drain(-5.0), 0.0);
        assert_eq!(p.drain(f32::NAN), 0.0);
        assert_eq!(p.add(f32::INFINITY), 0.0);
        assert_eq!(p.current(), 5.0);
    }

    #[test]
    fn set_max_with_refill() {
        let mut p = ResourcePool::full(100.0);
        p.drain(60.0);
        p.set_max(120.0, true);
        assert_eq!(p.max(), 120.0);
        assert_eq!(p.current(), 120.0);
    }

    #[test]
    fn set_max_without_refill_keeps_current_in_range() {
        let mut p = ResourcePool::full(100.0);
        p.drain(10.0);
        p.set_max(120.0, false);
        assert_eq!(p.current(), 90.0);
        p.set_max(50.0, false);
        assert_eq!(p.current(), 50.0);
    }

    #[test]
    fn fraction_of_empty_capacity_is_zero() {
        let p = ResourcePool::full(0.0);
        assert_eq!(p.fraction(), 0.0);
        assert!(p.is_full());
    }

    #[test]
    fn meters_address_pools_by_selector() {
        let mut m = Meters::new(100.0, 80.0);
        m.drain(Pool::Energy, 30.0);
        m.add(Pool::Health, 5.0);
        assert_eq!(m.pool(Pool::Energy).current(), 50.0);
        assert_eq!(m.pool(Pool::Health).current(), 100.0);
        m.set_max(Pool::Energy, 100.0, true);
        assert_eq!(m.energy.current(), 100.0);
    }
}
