#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that computes deterministic tower targets from world snapshots.
//!
//! Runs after combat each tick: the target it stores is the one the tower
//! fires on *next* tick, mirroring the original evaluate-then-refresh order.

use road_defence_core::{Command, EnemyView, TowerView};

/// Tower targeting system performing the nearest-enemy acquisition scan.
#[derive(Debug, Default)]
pub struct TowerTargeting;

impl TowerTargeting {
    /// Creates a new tower targeting system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Emits an `AcquireTarget` command for every tower with a live enemy
    /// strictly inside its range.
    ///
    /// Enemies are scanned in ascending id order with a strictly-less-than
    /// distance comparison, so the first enemy found at the minimum distance
    /// wins ties. Towers with no candidate keep whatever they had stored; a
    /// stale handle is harmless because firing re-validates it.
    pub fn handle(&mut self, towers: &TowerView, enemies: &EnemyView, out: &mut Vec<Command>) {
        for tower in towers.iter() {
            let mut best_distance = tower.kind.range();
            let mut best = None;

            for enemy in enemies.iter() {
                let distance = tower.position.distance_to(enemy.position);
                if distance < best_distance {
                    best_distance = distance;
                    best = Some(enemy.id);
                }
            }

            if let Some(enemy) = best {
                out.push(Command::AcquireTarget {
                    tower: tower.id,
                    enemy,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TowerTargeting;
    use road_defence_core::{
        CellCoord, Command, EnemyCategory, EnemyId, EnemySnapshot, EnemyView, TowerId,
        TowerKind, TowerSnapshot, TowerView, WorldPoint,
    };

    fn tower(id: u32, kind: TowerKind, position: WorldPoint) -> TowerSnapshot {
        TowerSnapshot {
            id: TowerId::new(id),
            kind,
            cell: CellCoord::new(0, 0),
            position,
            facing_degrees: 0.0,
            target: None,
            ready_to_fire: true,
            shots_fired: 0,
            enemies_killed: 0,
        }
    }

    fn enemy(id: u32, position: WorldPoint) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            category: EnemyCategory::Ground,
            position,
            facing_degrees: 0.0,
            health: 25,
            max_health: 25,
            speed: 50.0,
            target_waypoint: 1,
        }
    }

    fn acquisitions(towers: Vec<TowerSnapshot>, enemies: Vec<EnemySnapshot>) -> Vec<Command> {
        let mut system = TowerTargeting::new();
        let mut out = Vec::new();
        system.handle(
            &TowerView::from_snapshots(towers),
            &EnemyView::from_snapshots(enemies),
            &mut out,
        );
        out
    }

    #[test]
    fn selects_the_nearest_enemy_in_range() {
        let out = acquisitions(
            vec![tower(1, TowerKind::Fast, WorldPoint::new(0.0, 0.0))],
            vec![
                enemy(10, WorldPoint::new(300.0, 0.0)),
                enemy(11, WorldPoint::new(120.0, 0.0)),
            ],
        );
        assert_eq!(
            out,
            vec![Command::AcquireTarget {
                tower: TowerId::new(1),
                enemy: EnemyId::new(11),
            }]
        );
    }

    #[test]
    fn an_enemy_at_exactly_range_is_not_acquired() {
        let out = acquisitions(
            vec![tower(1, TowerKind::Fast, WorldPoint::new(0.0, 0.0))],
            vec![enemy(10, WorldPoint::new(400.0, 0.0))],
        );
        assert!(out.is_empty());
    }

    #[test]
    fn distance_ties_go_to_the_first_enemy_scanned() {
        let out = acquisitions(
            vec![tower(1, TowerKind::Fast, WorldPoint::new(0.0, 0.0))],
            vec![
                enemy(12, WorldPoint::new(0.0, 150.0)),
                enemy(7, WorldPoint::new(150.0, 0.0)),
            ],
        );
        // The scan walks ascending ids, so enemy 7 is found first and the
        // equally distant enemy 12 cannot displace it.
        assert_eq!(
            out,
            vec![Command::AcquireTarget {
                tower: TowerId::new(1),
                enemy: EnemyId::new(7),
            }]
        );
    }

    #[test]
    fn out_of_range_enemies_produce_no_acquisition() {
        let out = acquisitions(
            vec![tower(1, TowerKind::Fast, WorldPoint::new(0.0, 0.0))],
            vec![enemy(10, WorldPoint::new(2_000.0, 0.0))],
        );
        assert!(out.is_empty());
    }

    #[test]
    fn each_tower_scans_independently() {
        let out = acquisitions(
            vec![
                tower(1, TowerKind::Fast, WorldPoint::new(0.0, 0.0)),
                tower(2, TowerKind::Sniper, WorldPoint::new(1_500.0, 0.0)),
            ],
            vec![enemy(10, WorldPoint::new(700.0, 0.0))],
        );
        // Only the sniper's 1800-unit range covers the enemy.
        assert_eq!(
            out,
            vec![Command::AcquireTarget {
                tower: TowerId::new(2),
                enemy: EnemyId::new(10),
            }]
        );
    }
}
