//! Projectile motion models and expiry rules.

use road_defence_core::{EnemyId, ProjectileId, ProjectileMotion, ProjectileSpec, TowerId, WorldPoint};

/// Distance at which a homing projectile self-expires as a miss.
const MISS_RADIUS: f32 = 5.0;

/// Per-model motion state of a projectile in flight.
#[derive(Clone, Debug)]
pub(crate) enum Motion {
    /// Keeps the heading captured at fire time.
    Straight {
        /// Spawn point the travel distance is measured from.
        origin: WorldPoint,
        /// Raw direction vector, re-normalized every tick.
        direction: (f32, f32),
    },
    /// Re-aims at the target while it lives, keeping the last heading after.
    Homing {
        /// Enemy the projectile is locked onto.
        target: EnemyId,
        /// Most recent unit heading toward the target.
        last_direction: (f32, f32),
        /// Actual path length covered so far.
        distance_traveled: f32,
    },
}

/// Outcome of one flight step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FlightOutcome {
    /// Still in flight.
    Flying,
    /// Reached its distance budget or missed; must be removed.
    Expired,
}

/// A fired shot traveling through the world.
#[derive(Clone, Debug)]
pub(crate) struct Projectile {
    pub(crate) id: ProjectileId,
    pub(crate) tower: TowerId,
    pub(crate) position: WorldPoint,
    pub(crate) speed: f32,
    pub(crate) max_distance: f32,
    pub(crate) radius: f32,
    pub(crate) damage: u32,
    pub(crate) motion: Motion,
}

impl Projectile {
    pub(crate) fn fire(
        id: ProjectileId,
        tower: TowerId,
        spec: ProjectileSpec,
        position: WorldPoint,
        motion: Motion,
    ) -> Self {
        Self {
            id,
            tower,
            position,
            speed: spec.speed,
            max_distance: spec.max_distance,
            radius: spec.radius,
            damage: spec.damage,
            motion,
        }
    }

    /// Tag describing the motion model, exposed to queries.
    pub(crate) fn motion_tag(&self) -> ProjectileMotion {
        match self.motion {
            Motion::Straight { .. } => ProjectileMotion::Straight,
            Motion::Homing { .. } => ProjectileMotion::Homing,
        }
    }

    /// Advances one tick. `target_position` resolves the homing target's
    /// current position when the target is still alive.
    pub(crate) fn advance(
        &mut self,
        dt: f32,
        target_position: impl Fn(EnemyId) -> Option<WorldPoint>,
    ) -> FlightOutcome {
        match &mut self.motion {
            Motion::Straight { origin, direction } => {
                let (nx, ny) = crate::normalized(direction.0, direction.1);
                self.position = WorldPoint::new(
                    self.position.x() + nx * self.speed * dt,
                    self.position.y() + ny * self.speed * dt,
                );
                if self.position.distance_to(*origin) >= self.max_distance {
                    return FlightOutcome::Expired;
                }
                FlightOutcome::Flying
            }
            Motion::Homing {
                target,
                last_direction,
                distance_traveled,
            } => {
                let live_target = target_position(*target);
                if let Some(aim) = live_target {
                    *last_direction = crate::normalized(
                        aim.x() - self.position.x(),
                        aim.y() - self.position.y(),
                    );
                }

                let step_x = last_direction.0 * self.speed * dt;
                let step_y = last_direction.1 * self.speed * dt;
                *distance_traveled += (step_x * step_x + step_y * step_y).sqrt();
                self.position =
                    WorldPoint::new(self.position.x() + step_x, self.position.y() + step_y);

                if *distance_traveled >= self.max_distance {
                    return FlightOutcome::Expired;
                }
                if let Some(aim) = live_target {
                    if aim.distance_to(self.position) <= MISS_RADIUS {
                        return FlightOutcome::Expired;
                    }
                }
                FlightOutcome::Flying
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FlightOutcome, Motion, Projectile};
    use road_defence_core::{EnemyId, ProjectileId, TowerId, TowerKind, WorldPoint};

    fn straight_shot(direction: (f32, f32)) -> Projectile {
        Projectile::fire(
            ProjectileId::new(0),
            TowerId::new(0),
            TowerKind::Fast.projectile(),
            WorldPoint::new(0.0, 0.0),
            Motion::Straight {
                origin: WorldPoint::new(0.0, 0.0),
                direction,
            },
        )
    }

    #[test]
    fn straight_shot_travels_its_normalized_heading() {
        let mut shot = straight_shot((10.0, 0.0));
        assert_eq!(shot.advance(0.1, |_| None), FlightOutcome::Flying);
        assert!((shot.position.x() - 60.0).abs() < 1e-3);
        assert_eq!(shot.position.y(), 0.0);
    }

    #[test]
    fn straight_shot_expires_at_its_distance_budget() {
        let mut shot = straight_shot((1.0, 0.0));
        // 600 units/s against a 350 unit budget.
        assert_eq!(shot.advance(0.5, |_| None), FlightOutcome::Flying);
        assert_eq!(shot.advance(0.1, |_| None), FlightOutcome::Expired);
    }

    #[test]
    fn homing_shot_reaims_at_a_live_target() {
        let mut shot = Projectile::fire(
            ProjectileId::new(1),
            TowerId::new(0),
            TowerKind::Sniper.projectile(),
            WorldPoint::new(0.0, 0.0),
            Motion::Homing {
                target: EnemyId::new(3),
                last_direction: (1.0, 0.0),
                distance_traveled: 0.0,
            },
        );

        let outcome = shot.advance(0.1, |_| Some(WorldPoint::new(0.0, 500.0)));
        assert_eq!(outcome, FlightOutcome::Flying);
        assert_eq!(shot.position.x(), 0.0);
        assert!((shot.position.y() - 25.0).abs() < 1e-3);
    }

    #[test]
    fn homing_shot_keeps_its_last_heading_after_the_target_dies() {
        let mut shot = Projectile::fire(
            ProjectileId::new(1),
            TowerId::new(0),
            TowerKind::Sniper.projectile(),
            WorldPoint::new(0.0, 0.0),
            Motion::Homing {
                target: EnemyId::new(3),
                last_direction: (0.0, 1.0),
                distance_traveled: 0.0,
            },
        );

        assert_eq!(shot.advance(0.2, |_| None), FlightOutcome::Flying);
        assert!((shot.position.y() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn homing_shot_expires_as_a_miss_beside_its_target() {
        let mut shot = Projectile::fire(
            ProjectileId::new(1),
            TowerId::new(0),
            TowerKind::Sniper.projectile(),
            WorldPoint::new(0.0, 0.0),
            Motion::Homing {
                target: EnemyId::new(3),
                last_direction: (1.0, 0.0),
                distance_traveled: 0.0,
            },
        );

        // One 25-unit step lands within the 5-unit miss radius of the target.
        let outcome = shot.advance(0.1, |_| Some(WorldPoint::new(27.0, 0.0)));
        assert_eq!(outcome, FlightOutcome::Expired);
    }

    #[test]
    fn homing_shot_expires_when_its_path_budget_is_spent() {
        let mut shot = Projectile::fire(
            ProjectileId::new(1),
            TowerId::new(0),
            TowerKind::Sniper.projectile(),
            WorldPoint::new(0.0, 0.0),
            Motion::Homing {
                target: EnemyId::new(3),
                last_direction: (1.0, 0.0),
                distance_traveled: 0.0,
            },
        );

        // 250 units/s against a 2500 unit budget; the target stays ahead.
        let mut outcome = FlightOutcome::Flying;
        for _ in 0..10 {
            outcome = shot.advance(1.0, |_| Some(WorldPoint::new(1_000_000.0, 0.0)));
        }
        assert_eq!(outcome, FlightOutcome::Expired);
    }
}
