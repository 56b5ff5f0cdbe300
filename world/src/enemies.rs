//! Enemy construction formulas and waypoint navigation.

use road_defence_core::{EnemyCategory, EnemyId, WorldPoint};

use crate::map::{PathGraph, Waypoint};

/// Distance at which an enemy counts as having reached its waypoint.
pub(crate) const ARRIVAL_RADIUS: f32 = 5.0;
/// Maximum turn rate in degrees per second.
const TURN_RATE_DEG_PER_SEC: f32 = 180.0;

/// Stats an enemy is constructed with for a given wave.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct EnemyStats {
    pub(crate) health: u32,
    pub(crate) damage: u32,
    pub(crate) reward: u32,
    pub(crate) speed: f32,
}

/// Computes category-specific stats from the wave's health multiplier.
pub(crate) fn stats_for(category: EnemyCategory, hp_multiplier: f32) -> EnemyStats {
    let reward = (4.0 * ((hp_multiplier - 1.0) / 4.0 + 1.0)).round() as u32;
    match category {
        EnemyCategory::Ground => EnemyStats {
            health: (25.0 * hp_multiplier).round() as u32,
            damage: 1,
            reward,
            speed: 50.0 * ((hp_multiplier - 1.0) / 2.0 + 1.0),
        },
        EnemyCategory::Air => EnemyStats {
            health: (15.0 * hp_multiplier).round() as u32,
            damage: 1,
            reward,
            // The air curve adds its scaling term instead of multiplying.
            speed: 75.0 + ((hp_multiplier - 1.0) / 2.0 + 1.0),
        },
    }
}

/// Outcome of one navigation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StepOutcome {
    /// Still traveling toward a waypoint.
    Traveling,
    /// The terminal waypoint was reached; the enemy must despawn.
    ReachedGoal,
}

/// A single spawned hostile unit.
#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) category: EnemyCategory,
    pub(crate) position: WorldPoint,
    pub(crate) facing_degrees: f32,
    pub(crate) health: u32,
    pub(crate) max_health: u32,
    pub(crate) damage: u32,
    pub(crate) reward: u32,
    pub(crate) speed: f32,
    pub(crate) target: Waypoint,
}

impl Enemy {
    pub(crate) fn spawn(
        id: EnemyId,
        category: EnemyCategory,
        stats: EnemyStats,
        position: WorldPoint,
        target: Waypoint,
    ) -> Self {
        Self {
            id,
            category,
            position,
            facing_degrees: 0.0,
            health: stats.health,
            max_health: stats.health,
            damage: stats.damage,
            reward: stats.reward,
            speed: stats.speed,
            target,
        }
    }

    /// Advances one tick: rotate toward the target, then either arrive at the
    /// waypoint (advancing or reaching the goal) or translate along the path.
    pub(crate) fn advance(&mut self, dt: f32, path: &PathGraph) -> StepOutcome {
        let dx = self.target.position().x() - self.position.x();
        let dy = self.target.position().y() - self.position.y();

        let desired = crate::facing_toward(dx, dy);
        self.facing_degrees =
            smooth_rotate(self.facing_degrees, desired, dt, TURN_RATE_DEG_PER_SEC);

        let distance = (dx * dx + dy * dy).sqrt();
        if distance < ARRIVAL_RADIUS {
            if self.target.id() == path.end().id() {
                return StepOutcome::ReachedGoal;
            }
            if let Ok(next) = path.next_waypoint(self.target.id()) {
                self.target = next;
            }
            return StepOutcome::Traveling;
        }

        let (nx, ny) = crate::normalized(dx, dy);
        self.position = WorldPoint::new(
            self.position.x() + nx * self.speed * dt,
            self.position.y() + ny * self.speed * dt,
        );
        StepOutcome::Traveling
    }

    /// Subtracts health, reporting whether the enemy was destroyed.
    pub(crate) fn take_damage(&mut self, amount: u32) -> bool {
        self.health = self.health.saturating_sub(amount);
        self.health == 0
    }
}

/// Rotates toward a target angle with a capped turn speed, taking the
/// shortest signed path.
pub(crate) fn smooth_rotate(current: f32, target: f32, dt: f32, max_deg_per_sec: f32) -> f32 {
    let current = current.rem_euclid(360.0);
    let target = target.rem_euclid(360.0);

    let mut diff = target - current;
    if diff > 180.0 {
        diff -= 360.0;
    }
    if diff < -180.0 {
        diff += 360.0;
    }

    let max_step = max_deg_per_sec * dt;
    if diff.abs() <= max_step {
        return target;
    }
    current + diff.signum() * max_step
}

#[cfg(test)]
mod tests {
    use super::{smooth_rotate, stats_for, EnemyCategory};

    #[test]
    fn ground_stats_scale_with_the_health_multiplier() {
        let wave_one = stats_for(EnemyCategory::Ground, 1.12);
        assert_eq!(wave_one.health, 28);
        assert_eq!(wave_one.damage, 1);
        assert_eq!(wave_one.reward, 4);
        assert!((wave_one.speed - 53.0).abs() < 1e-4);

        let wave_five = stats_for(EnemyCategory::Ground, 1.6);
        assert_eq!(wave_five.health, 40);
        assert_eq!(wave_five.reward, 5);
        assert!((wave_five.speed - 65.0).abs() < 1e-4);
    }

    #[test]
    fn air_stats_use_the_additive_speed_curve() {
        let wave_one = stats_for(EnemyCategory::Air, 1.12);
        assert_eq!(wave_one.health, 17);
        assert!((wave_one.speed - 76.06).abs() < 1e-4);

        let wave_five = stats_for(EnemyCategory::Air, 1.6);
        assert_eq!(wave_five.health, 24);
        assert!((wave_five.speed - 76.3).abs() < 1e-4);
    }

    #[test]
    fn rotation_snaps_when_within_the_frame_budget() {
        let rotated = smooth_rotate(10.0, 20.0, 0.1, 180.0);
        assert_eq!(rotated, 20.0);
    }

    #[test]
    fn rotation_is_capped_by_the_turn_rate() {
        let rotated = smooth_rotate(0.0, 90.0, 0.1, 180.0);
        assert!((rotated - 18.0).abs() < 1e-4);
    }

    #[test]
    fn rotation_takes_the_shortest_path_across_zero() {
        let rotated = smooth_rotate(350.0, 10.0, 0.05, 180.0);
        assert!((rotated - 359.0).abs() < 1e-4);

        let counter = smooth_rotate(10.0, 350.0, 0.05, 180.0);
        assert!((counter - 1.0).abs() < 1e-4);
    }
}
