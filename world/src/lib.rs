#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Road Defence.
//!
//! All simulation mutation funnels through [`apply`] on a single thread;
//! systems observe the world exclusively through the read-only [`query`]
//! module and react with new command batches. Timer-like behavior (wave
//! cadence, spawn deadlines) lives in the scheduling system, not here: the
//! world only integrates the clock it is handed each tick.

mod economy;
mod enemies;
pub mod map;
mod projectiles;
mod towers;

use std::time::Duration;

use road_defence_core::{
    Command, EnemyCategory, EnemyId, Event, PlacementError, ProjectileId, ProjectileMotion,
    SaleError, TowerId, WELCOME_BANNER,
};

use economy::Economy;
use enemies::{Enemy, StepOutcome};
use map::MapLayout;
use projectiles::{FlightOutcome, Motion, Projectile};
use towers::Tower;

/// Represents the authoritative Road Defence world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    map: MapLayout,
    economy: Economy,
    enemies: Vec<Enemy>,
    towers: Vec<Tower>,
    projectiles: Vec<Projectile>,
    clock: Duration,
    wave: u32,
    started: bool,
    next_enemy_id: u32,
    next_tower_id: u32,
    next_projectile_id: u32,
}

impl World {
    /// Creates a new world around a parsed map layout.
    #[must_use]
    pub fn from_layout(map: MapLayout) -> Self {
        Self {
            banner: WELCOME_BANNER,
            map,
            economy: Economy::new(),
            enemies: Vec::new(),
            towers: Vec::new(),
            projectiles: Vec::new(),
            clock: Duration::ZERO,
            wave: 0,
            started: false,
            next_enemy_id: 0,
            next_tower_id: 0,
            next_projectile_id: 0,
        }
    }

    fn tick_enemies(&mut self, dt: f32, out_events: &mut Vec<Event>) {
        let path = self.map.path();
        let mut breaches: Vec<(EnemyId, u32)> = Vec::new();
        for enemy in &mut self.enemies {
            if enemy.advance(dt, path) == StepOutcome::ReachedGoal {
                breaches.push((enemy.id, enemy.damage));
            }
        }

        for (enemy_id, damage) in breaches {
            self.enemies.retain(|enemy| enemy.id != enemy_id);
            let outcome = self.economy.damage_base(damage);
            out_events.push(Event::EnemyReachedGoal {
                enemy: enemy_id,
                damage,
                health_remaining: outcome.health_remaining,
            });
            if outcome.game_over_now {
                out_events.push(Event::GameOver {
                    waves_survived: self.wave,
                });
            }
        }
    }

    fn tick_towers(&mut self) {
        let enemies = &self.enemies;
        for tower in &mut self.towers {
            let Some(target) = tower.target else {
                continue;
            };
            let Some(enemy) = enemies.iter().find(|enemy| enemy.id == target) else {
                continue;
            };
            if tower.position.distance_to(enemy.position) > tower.kind.range() {
                continue;
            }
            tower.facing_degrees = facing_toward(
                enemy.position.x() - tower.position.x(),
                enemy.position.y() - tower.position.y(),
            );
        }
    }

    fn tick_projectiles(&mut self, dt: f32, out_events: &mut Vec<Event>) {
        let enemies = &self.enemies;
        let mut expired: Vec<ProjectileId> = Vec::new();
        for projectile in &mut self.projectiles {
            let outcome = projectile.advance(dt, |enemy_id| {
                enemies
                    .iter()
                    .find(|enemy| enemy.id == enemy_id)
                    .map(|enemy| enemy.position)
            });
            if outcome == FlightOutcome::Expired {
                expired.push(projectile.id);
            }
        }

        for projectile_id in expired {
            self.projectiles
                .retain(|projectile| projectile.id != projectile_id);
            out_events.push(Event::ProjectileExpired {
                projectile: projectile_id,
            });
        }
    }

    fn spawn_enemy(
        &mut self,
        category: EnemyCategory,
        hp_multiplier: f32,
        out_events: &mut Vec<Event>,
    ) {
        let path = self.map.path();
        let target = match category {
            EnemyCategory::Ground => match path.next_waypoint(0) {
                Ok(waypoint) => waypoint,
                Err(_) => return,
            },
            EnemyCategory::Air => path.end(),
        };

        let id = EnemyId::new(self.next_enemy_id);
        self.next_enemy_id += 1;
        let stats = enemies::stats_for(category, hp_multiplier);
        self.enemies.push(Enemy::spawn(
            id,
            category,
            stats,
            path.start().position(),
            target,
        ));
        out_events.push(Event::EnemySpawned {
            enemy: id,
            category,
        });
    }

    fn fire_projectile(&mut self, tower_id: TowerId, target_id: EnemyId, out_events: &mut Vec<Event>) {
        let Some(tower_index) = self.towers.iter().position(|tower| tower.id == tower_id) else {
            return;
        };
        // A target that despawned between combat and application is tolerated
        // by skipping the shot entirely.
        let Some(enemy) = self.enemies.iter().find(|enemy| enemy.id == target_id) else {
            return;
        };

        let origin = self.towers[tower_index].position;
        let spec = self.towers[tower_index].kind.projectile();
        let motion = match spec.motion {
            ProjectileMotion::Straight => Motion::Straight {
                origin,
                direction: (
                    enemy.position.x() - origin.x(),
                    enemy.position.y() - origin.y(),
                ),
            },
            ProjectileMotion::Homing => Motion::Homing {
                target: target_id,
                last_direction: normalized(
                    enemy.position.x() - origin.x(),
                    enemy.position.y() - origin.y(),
                ),
                distance_traveled: 0.0,
            },
        };

        let id = ProjectileId::new(self.next_projectile_id);
        self.next_projectile_id += 1;
        self.projectiles
            .push(Projectile::fire(id, tower_id, spec, origin, motion));

        let tower = &mut self.towers[tower_index];
        tower.shots_fired += 1;
        tower.last_shot = self.clock;
        out_events.push(Event::ProjectileFired {
            projectile: id,
            tower: tower_id,
            target: target_id,
        });
    }

    fn resolve_impact(
        &mut self,
        projectile_id: ProjectileId,
        enemy_id: EnemyId,
        out_events: &mut Vec<Event>,
    ) {
        let Some(projectile_index) = self
            .projectiles
            .iter()
            .position(|projectile| projectile.id == projectile_id)
        else {
            return;
        };
        // The projectile is consumed no matter how the lookups below fare.
        let projectile = self.projectiles.remove(projectile_index);

        let Some(enemy_index) = self.enemies.iter().position(|enemy| enemy.id == enemy_id) else {
            out_events.push(Event::ProjectileExpired {
                projectile: projectile_id,
            });
            return;
        };

        out_events.push(Event::ProjectileHit {
            projectile: projectile_id,
            enemy: enemy_id,
            damage: projectile.damage,
        });

        if self.enemies[enemy_index].take_damage(projectile.damage) {
            let reward = self.enemies[enemy_index].reward;
            let _ = self.enemies.remove(enemy_index);
            self.economy.earn(reward);
            out_events.push(Event::EnemyKilled {
                enemy: enemy_id,
                reward,
            });
        }

        if let Some(tower) = self
            .towers
            .iter_mut()
            .find(|tower| tower.id == projectile.tower)
        {
            tower.enemies_killed += 1;
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    // The game-over transition is terminal: only the clock keeps running so
    // presentation can wind down; every other mutation is refused.
    if world.economy.game_over() && !matches!(command, Command::Tick { .. }) {
        return;
    }

    match command {
        Command::Tick { dt } => {
            world.clock = world.clock.saturating_add(dt);
            out_events.push(Event::TimeAdvanced { dt });
            let dt_secs = dt.as_secs_f32();
            world.tick_enemies(dt_secs, out_events);
            world.tick_towers();
            world.tick_projectiles(dt_secs, out_events);
        }
        Command::StartInvasion => {
            if !world.started {
                world.started = true;
                out_events.push(Event::InvasionStarted);
            }
        }
        Command::BeginWave {
            wave,
            enemy_count,
            air_count,
            hp_multiplier,
            spawn_interval,
        } => {
            world.wave = wave;
            out_events.push(Event::WaveStarted {
                wave,
                enemy_count,
                air_count,
                hp_multiplier,
                spawn_interval,
            });
        }
        Command::SpawnEnemy {
            category,
            hp_multiplier,
        } => {
            world.spawn_enemy(category, hp_multiplier, out_events);
        }
        Command::PlaceTower { kind, cell } => {
            if !world.map.is_buildable(cell) {
                out_events.push(Event::TowerPlacementRejected {
                    kind,
                    cell,
                    reason: PlacementError::InvalidTile,
                });
                return;
            }
            if world.towers.iter().any(|tower| tower.cell == cell) {
                out_events.push(Event::TowerPlacementRejected {
                    kind,
                    cell,
                    reason: PlacementError::Occupied,
                });
                return;
            }
            if !world.economy.spend(kind.price()) {
                out_events.push(Event::TowerPlacementRejected {
                    kind,
                    cell,
                    reason: PlacementError::InsufficientFunds,
                });
                return;
            }

            let id = TowerId::new(world.next_tower_id);
            world.next_tower_id += 1;
            world.towers.push(Tower::place(id, kind, cell, world.clock));
            out_events.push(Event::TowerPlaced {
                tower: id,
                kind,
                cell,
            });
        }
        Command::SellTower { tower } => {
            let Some(index) = world
                .towers
                .iter()
                .position(|candidate| candidate.id == tower)
            else {
                out_events.push(Event::TowerSaleRejected {
                    tower,
                    reason: SaleError::MissingTower,
                });
                return;
            };
            let sold = world.towers.remove(index);
            world.economy.earn(sold.kind.refund());
            out_events.push(Event::TowerSold {
                tower,
                refund: sold.kind.refund(),
            });
        }
        Command::AcquireTarget { tower, enemy } => {
            if let Some(tower) = world
                .towers
                .iter_mut()
                .find(|candidate| candidate.id == tower)
            {
                tower.target = Some(enemy);
            }
        }
        Command::FireProjectile { tower, target } => {
            world.fire_projectile(tower, target, out_events);
        }
        Command::ResolveImpact { projectile, enemy } => {
            world.resolve_impact(projectile, enemy, out_events);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use road_defence_core::{
        CellCoord, EconomySnapshot, EnemySnapshot, EnemyView, ProjectileSnapshot, ProjectileView,
        TowerId, TowerSnapshot, TowerView,
    };

    use super::{
        map::{MapLayout, PathGraph},
        World,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the parsed map layout.
    #[must_use]
    pub fn layout(world: &World) -> &MapLayout {
        &world.map
    }

    /// Captures the player-facing match state.
    #[must_use]
    pub fn economy(world: &World) -> EconomySnapshot {
        EconomySnapshot {
            money: world.economy.money(),
            health: world.economy.health(),
            wave: world.wave,
            game_over: world.economy.game_over(),
        }
    }

    /// Provides read-only access to the authored enemy path.
    #[must_use]
    pub fn path(world: &World) -> &PathGraph {
        world.map.path()
    }

    /// Buildable ground cells in row-major order.
    #[must_use]
    pub fn ground_cells(world: &World) -> &[CellCoord] {
        world.map.ground_cells()
    }

    /// Looks up the tower occupying the provided cell, if any.
    #[must_use]
    pub fn tower_at(world: &World, cell: CellCoord) -> Option<TowerId> {
        world
            .towers
            .iter()
            .find(|tower| tower.cell == cell)
            .map(|tower| tower.id)
    }

    /// Captures a read-only view of all live enemies.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(
            world
                .enemies
                .iter()
                .map(|enemy| EnemySnapshot {
                    id: enemy.id,
                    category: enemy.category,
                    position: enemy.position,
                    facing_degrees: enemy.facing_degrees,
                    health: enemy.health,
                    max_health: enemy.max_health,
                    speed: enemy.speed,
                    target_waypoint: enemy.target.id(),
                })
                .collect(),
        )
    }

    /// Captures a read-only view of all placed towers.
    #[must_use]
    pub fn tower_view(world: &World) -> TowerView {
        TowerView::from_snapshots(
            world
                .towers
                .iter()
                .map(|tower| TowerSnapshot {
                    id: tower.id,
                    kind: tower.kind,
                    cell: tower.cell,
                    position: tower.position,
                    facing_degrees: tower.facing_degrees,
                    target: tower.target,
                    ready_to_fire: tower.ready_to_fire(world.clock),
                    shots_fired: tower.shots_fired,
                    enemies_killed: tower.enemies_killed,
                })
                .collect(),
        )
    }

    /// Captures a read-only view of all projectiles in flight.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        ProjectileView::from_snapshots(
            world
                .projectiles
                .iter()
                .map(|projectile| ProjectileSnapshot {
                    id: projectile.id,
                    tower: projectile.tower,
                    motion: projectile.motion_tag(),
                    position: projectile.position,
                    radius: projectile.radius,
                    damage: projectile.damage,
                })
                .collect(),
        )
    }
}

pub(crate) fn normalized(dx: f32, dy: f32) -> (f32, f32) {
    let length = (dx * dx + dy * dy).sqrt();
    if length <= f32::EPSILON {
        return (0.0, 0.0);
    }
    (dx / length, dy / length)
}

/// Facing angle in degrees for a direction vector, including the 90 degree
/// sprite offset shared by enemies and towers.
pub(crate) fn facing_toward(dx: f32, dy: f32) -> f32 {
    dy.atan2(dx).to_degrees() + 90.0
}
