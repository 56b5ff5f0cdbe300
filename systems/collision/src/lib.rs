#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Narrow-phase resolver pairing projectiles with the enemies they strike.
//!
//! Broad-phase spatial indexing stays with the adapter; this system owns the
//! overlap contract over plain snapshot views and reports each pairing as a
//! `ResolveImpact` command for the world to apply.

use road_defence_core::{Command, EnemyView, ProjectileView, ENEMY_HIT_RADIUS};

/// Collision system detecting projectile/enemy overlap.
#[derive(Debug, Default)]
pub struct CollisionResolver;

impl CollisionResolver {
    /// Creates a new collision resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Emits at most one `ResolveImpact` per projectile, pairing it with the
    /// first overlapping enemy in ascending id order.
    pub fn handle(
        &mut self,
        projectiles: &ProjectileView,
        enemies: &EnemyView,
        out: &mut Vec<Command>,
    ) {
        for projectile in projectiles.iter() {
            for enemy in enemies.iter() {
                let reach = projectile.radius + ENEMY_HIT_RADIUS;
                if projectile.position.distance_to(enemy.position) <= reach {
                    out.push(Command::ResolveImpact {
                        projectile: projectile.id,
                        enemy: enemy.id,
                    });
                    break;
                }
            }
        }
    }
}
