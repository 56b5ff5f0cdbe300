#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that emits projectile firing commands for ready towers.
//!
//! Fires on the target each tower stored on the previous tick. Validity is
//! re-checked here every tick: the enemy must still be alive and within
//! range, otherwise the tower holds fire even if other enemies are close by.

use road_defence_core::{Command, EnemyView, TowerView};

/// Tower combat system gating shots on cooldown and target validity.
#[derive(Debug, Default)]
pub struct TowerCombat;

impl TowerCombat {
    /// Creates a new tower combat system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Emits `FireProjectile` for every tower whose stored target is valid
    /// and whose cooldown has elapsed.
    pub fn handle(&mut self, towers: &TowerView, enemies: &EnemyView, out: &mut Vec<Command>) {
        for tower in towers.iter() {
            let Some(target) = tower.target else {
                continue;
            };
            let Some(enemy) = enemies.get(target) else {
                continue;
            };
            if tower.position.distance_to(enemy.position) > tower.kind.range() {
                continue;
            }
            if !tower.ready_to_fire {
                continue;
            }
            out.push(Command::FireProjectile {
                tower: tower.id,
                target,
            });
        }
    }
}
