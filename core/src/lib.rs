#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Road Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshot views, and respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Road Defence.";

/// Side length of a single square map tile expressed in world units.
pub const TILE_LENGTH: f32 = 128.0;

/// Collision radius of an enemy body, shared by both categories.
pub const ENEMY_HIT_RADIUS: f32 = 20.0;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that the invasion begin. Repeated requests are no-ops.
    StartInvasion,
    /// Announces the difficulty parameters of a freshly started wave.
    BeginWave {
        /// One-based index of the wave that is starting.
        wave: u32,
        /// Total number of enemies the wave will spawn.
        enemy_count: u32,
        /// How many of those enemies travel by air.
        air_count: u32,
        /// Health multiplier applied to every enemy in the wave.
        hp_multiplier: f32,
        /// Delay between consecutive spawns within the wave.
        spawn_interval: Duration,
    },
    /// Requests that a single enemy be spawned at the path start.
    SpawnEnemy {
        /// Category of the enemy to construct.
        category: EnemyCategory,
        /// Health multiplier of the wave the enemy belongs to.
        hp_multiplier: f32,
    },
    /// Requests placement of a tower on the provided ground cell.
    PlaceTower {
        /// Archetype of tower to construct.
        kind: TowerKind,
        /// Ground cell that should host the tower.
        cell: CellCoord,
    },
    /// Requests removal of an existing tower with a partial refund.
    SellTower {
        /// Identifier of the tower targeted for sale.
        tower: TowerId,
    },
    /// Stores the enemy a tower should consider its target next tick.
    AcquireTarget {
        /// Tower whose stored target is updated.
        tower: TowerId,
        /// Enemy selected by the targeting scan.
        enemy: EnemyId,
    },
    /// Requests that a tower fire a projectile at its stored target.
    FireProjectile {
        /// Tower performing the shot.
        tower: TowerId,
        /// Enemy the shot is aimed at.
        target: EnemyId,
    },
    /// Reports a projectile overlapping an enemy for impact resolution.
    ResolveImpact {
        /// Projectile involved in the overlap.
        projectile: ProjectileId,
        /// Enemy involved in the overlap.
        enemy: EnemyId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the invasion started. Emitted at most once per match.
    InvasionStarted,
    /// Announces a wave together with its difficulty parameters.
    WaveStarted {
        /// One-based index of the wave.
        wave: u32,
        /// Total number of enemies the wave will spawn.
        enemy_count: u32,
        /// How many of those enemies travel by air.
        air_count: u32,
        /// Health multiplier applied to every enemy in the wave.
        hp_multiplier: f32,
        /// Delay between consecutive spawns within the wave.
        spawn_interval: Duration,
    },
    /// Confirms that an enemy was created at the path start.
    EnemySpawned {
        /// Identifier assigned to the newly spawned enemy.
        enemy: EnemyId,
        /// Category the enemy was constructed with.
        category: EnemyCategory,
    },
    /// Reports that an enemy reached the goal and damaged the base.
    EnemyReachedGoal {
        /// Identifier of the enemy that broke through.
        enemy: EnemyId,
        /// Damage dealt to the base.
        damage: u32,
        /// Base health remaining after the hit.
        health_remaining: u32,
    },
    /// Reports that an enemy was destroyed and the reward credited.
    EnemyKilled {
        /// Identifier of the destroyed enemy.
        enemy: EnemyId,
        /// Currency credited to the player.
        reward: u32,
    },
    /// Confirms that a tower was placed and paid for.
    TowerPlaced {
        /// Identifier assigned to the tower by the world.
        tower: TowerId,
        /// Archetype of the placed tower.
        kind: TowerKind,
        /// Ground cell hosting the tower.
        cell: CellCoord,
    },
    /// Reports that a tower placement request was rejected.
    TowerPlacementRejected {
        /// Archetype requested for placement.
        kind: TowerKind,
        /// Cell provided in the placement request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a tower was sold and the refund credited.
    TowerSold {
        /// Identifier of the tower that was removed.
        tower: TowerId,
        /// Currency refunded to the player.
        refund: u32,
    },
    /// Reports that a tower sale request was rejected.
    TowerSaleRejected {
        /// Identifier provided in the sale request.
        tower: TowerId,
        /// Specific reason the sale failed.
        reason: SaleError,
    },
    /// Confirms that a tower fired a projectile.
    ProjectileFired {
        /// Identifier assigned to the projectile by the world.
        projectile: ProjectileId,
        /// Tower that fired the shot.
        tower: TowerId,
        /// Enemy the shot was aimed at.
        target: EnemyId,
    },
    /// Reports that a projectile struck an enemy.
    ProjectileHit {
        /// Projectile that was consumed by the impact.
        projectile: ProjectileId,
        /// Enemy that absorbed the damage.
        enemy: EnemyId,
        /// Damage applied to the enemy.
        damage: u32,
    },
    /// Reports that a projectile expired without striking anything.
    ProjectileExpired {
        /// Projectile that was removed.
        projectile: ProjectileId,
    },
    /// Announces the terminal game-over transition. Emitted exactly once.
    GameOver {
        /// Number of waves that had started when the base fell.
        waves_survived: u32,
    },
}

/// Unique identifier assigned to an enemy.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a tower.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single map tile expressed as column and row indices.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// World-space position of the tile center.
    #[must_use]
    pub fn center(&self) -> WorldPoint {
        WorldPoint::new(
            self.column as f32 * TILE_LENGTH + TILE_LENGTH / 2.0,
            self.row as f32 * TILE_LENGTH + TILE_LENGTH / 2.0,
        )
    }
}

/// Continuous position expressed in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    x: f32,
    y: f32,
}

impl WorldPoint {
    /// Creates a new world-space position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate in world units.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate in world units.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Euclidean distance to another position.
    #[must_use]
    pub fn distance_to(self, other: WorldPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Category of a hostile agent, determining stats and navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyCategory {
    /// Follows the road through every waypoint in order.
    Ground,
    /// Flies straight toward the goal, skipping the road.
    Air,
}

/// Archetypes of towers that can be constructed on ground tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerKind {
    /// Rapid-fire tower with moderate range and straight projectiles.
    Fast,
    /// Slow long-range tower that fires homing projectiles.
    Sniper,
}

impl TowerKind {
    /// Minimum delay a tower of this kind must wait between shots.
    #[must_use]
    pub const fn cooldown(self) -> Duration {
        match self {
            Self::Fast => Duration::from_millis(200),
            Self::Sniper => Duration::from_millis(1000),
        }
    }

    /// Attack radius in world units.
    #[must_use]
    pub const fn range(self) -> f32 {
        match self {
            Self::Fast => 400.0,
            Self::Sniper => 1800.0,
        }
    }

    /// Purchase price in currency units.
    #[must_use]
    pub const fn price(self) -> u32 {
        match self {
            Self::Fast => 50,
            Self::Sniper => 150,
        }
    }

    /// Currency returned when a tower of this kind is sold.
    #[must_use]
    pub const fn refund(self) -> u32 {
        self.price() / 2
    }

    /// Parameters of the projectile fired by this archetype.
    #[must_use]
    pub const fn projectile(self) -> ProjectileSpec {
        match self {
            Self::Fast => ProjectileSpec {
                motion: ProjectileMotion::Straight,
                speed: 600.0,
                max_distance: 350.0,
                radius: 7.0,
                damage: 3,
            },
            Self::Sniper => ProjectileSpec {
                motion: ProjectileMotion::Homing,
                speed: 250.0,
                max_distance: 2500.0,
                radius: 10.0,
                damage: 15,
            },
        }
    }
}

/// Motion model followed by a projectile in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileMotion {
    /// Keeps the heading captured at fire time.
    Straight,
    /// Re-aims at the target every tick while the target lives.
    Homing,
}

/// Parameters shared by every projectile a tower archetype fires.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSpec {
    /// Motion model the projectile follows.
    pub motion: ProjectileMotion,
    /// Travel speed in world units per second.
    pub speed: f32,
    /// Maximum distance the projectile may cover before expiring.
    pub max_distance: f32,
    /// Collision radius in world units.
    pub radius: f32,
    /// Damage applied to the enemy struck on impact.
    pub damage: u32,
}

/// Reasons a tower placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The requested cell is not a buildable ground tile.
    InvalidTile,
    /// The requested cell already hosts a tower.
    Occupied,
    /// The player cannot afford the requested archetype.
    InsufficientFunds,
}

/// Reasons a tower sale request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SaleError {
    /// No tower with the provided identifier exists.
    MissingTower,
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Category the enemy was constructed with.
    pub category: EnemyCategory,
    /// Current world-space position.
    pub position: WorldPoint,
    /// Current facing angle in degrees.
    pub facing_degrees: f32,
    /// Remaining health.
    pub health: u32,
    /// Health the enemy spawned with.
    pub max_health: u32,
    /// Travel speed in world units per second.
    pub speed: f32,
    /// Identifier of the waypoint currently navigated toward.
    pub target_waypoint: u32,
}

/// Read-only snapshot describing all live enemies.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic id order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Looks up the snapshot of a specific enemy, if it is still live.
    #[must_use]
    pub fn get(&self, enemy: EnemyId) -> Option<&EnemySnapshot> {
        self.snapshots
            .binary_search_by_key(&enemy, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single tower's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerSnapshot {
    /// Identifier allocated to the tower by the world.
    pub id: TowerId,
    /// Archetype of the tower.
    pub kind: TowerKind,
    /// Ground cell hosting the tower.
    pub cell: CellCoord,
    /// World-space position of the tower center.
    pub position: WorldPoint,
    /// Current facing angle in degrees.
    pub facing_degrees: f32,
    /// Enemy stored by the most recent targeting scan, if any.
    pub target: Option<EnemyId>,
    /// Whether the cooldown since the last shot has elapsed.
    pub ready_to_fire: bool,
    /// Number of projectiles the tower has fired.
    pub shots_fired: u32,
    /// Number of impacts credited to the tower.
    pub enemies_killed: u32,
}

/// Read-only snapshot describing all placed towers.
#[derive(Clone, Debug, Default)]
pub struct TowerView {
    snapshots: Vec<TowerSnapshot>,
}

impl TowerView {
    /// Creates a new tower view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TowerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic id order.
    pub fn iter(&self) -> impl Iterator<Item = &TowerSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TowerSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single projectile's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Identifier allocated to the projectile by the world.
    pub id: ProjectileId,
    /// Tower that fired the projectile.
    pub tower: TowerId,
    /// Motion model the projectile follows.
    pub motion: ProjectileMotion,
    /// Current world-space position.
    pub position: WorldPoint,
    /// Collision radius in world units.
    pub radius: f32,
    /// Damage applied on impact.
    pub damage: u32,
}

/// Read-only snapshot describing all projectiles in flight.
#[derive(Clone, Debug, Default)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new projectile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ProjectileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic id order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ProjectileSnapshot> {
        self.snapshots
    }
}

/// Read-only snapshot of the player-facing match state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EconomySnapshot {
    /// Current money balance.
    pub money: u32,
    /// Current base health.
    pub health: u32,
    /// Index of the most recently started wave.
    pub wave: u32,
    /// Whether the terminal game-over transition has fired.
    pub game_over: bool,
}

#[cfg(test)]
mod tests {
    use super::{
        CellCoord, EnemyCategory, EnemyId, EnemySnapshot, EnemyView, PlacementError,
        ProjectileMotion, SaleError, TowerId, TowerKind, WorldPoint, TILE_LENGTH,
    };
    use serde::{de::DeserializeOwned, Serialize};
    use std::time::Duration;

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn identifiers_round_trip_through_bincode() {
        assert_round_trip(&EnemyId::new(7));
        assert_round_trip(&TowerId::new(42));
        assert_round_trip(&super::ProjectileId::new(1_000));
    }

    #[test]
    fn enums_round_trip_through_bincode() {
        assert_round_trip(&EnemyCategory::Air);
        assert_round_trip(&TowerKind::Sniper);
        assert_round_trip(&ProjectileMotion::Homing);
        assert_round_trip(&PlacementError::InsufficientFunds);
        assert_round_trip(&SaleError::MissingTower);
    }

    #[test]
    fn cell_center_lands_on_tile_midpoint() {
        let cell = CellCoord::new(2, 1);
        let center = cell.center();
        assert_eq!(center.x(), 2.0 * TILE_LENGTH + TILE_LENGTH / 2.0);
        assert_eq!(center.y(), TILE_LENGTH + TILE_LENGTH / 2.0);
    }

    #[test]
    fn distance_matches_expectation() {
        let origin = WorldPoint::new(0.0, 0.0);
        let destination = WorldPoint::new(3.0, 4.0);
        assert_eq!(origin.distance_to(destination), 5.0);
        assert_eq!(destination.distance_to(origin), 5.0);
    }

    #[test]
    fn fast_tower_parameters_match_archetype_table() {
        assert_eq!(TowerKind::Fast.cooldown(), Duration::from_millis(200));
        assert_eq!(TowerKind::Fast.range(), 400.0);
        assert_eq!(TowerKind::Fast.price(), 50);
        assert_eq!(TowerKind::Fast.refund(), 25);
        let spec = TowerKind::Fast.projectile();
        assert_eq!(spec.motion, ProjectileMotion::Straight);
        assert_eq!(spec.speed, 600.0);
        assert_eq!(spec.max_distance, 350.0);
        assert_eq!(spec.radius, 7.0);
        assert_eq!(spec.damage, 3);
    }

    #[test]
    fn sniper_tower_parameters_match_archetype_table() {
        assert_eq!(TowerKind::Sniper.cooldown(), Duration::from_millis(1000));
        assert_eq!(TowerKind::Sniper.range(), 1800.0);
        assert_eq!(TowerKind::Sniper.price(), 150);
        assert_eq!(TowerKind::Sniper.refund(), 75);
        let spec = TowerKind::Sniper.projectile();
        assert_eq!(spec.motion, ProjectileMotion::Homing);
        assert_eq!(spec.speed, 250.0);
        assert_eq!(spec.max_distance, 2500.0);
        assert_eq!(spec.radius, 10.0);
        assert_eq!(spec.damage, 15);
    }

    fn enemy_snapshot(id: u32) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            category: EnemyCategory::Ground,
            position: WorldPoint::new(0.0, 0.0),
            facing_degrees: 0.0,
            health: 25,
            max_health: 25,
            speed: 50.0,
            target_waypoint: 1,
        }
    }

    #[test]
    fn enemy_view_sorts_and_finds_by_id() {
        let view = EnemyView::from_snapshots(vec![
            enemy_snapshot(9),
            enemy_snapshot(2),
            enemy_snapshot(5),
        ]);

        let ids: Vec<u32> = view.iter().map(|snapshot| snapshot.id.get()).collect();
        assert_eq!(ids, vec![2, 5, 9]);
        assert!(view.get(EnemyId::new(5)).is_some());
        assert!(view.get(EnemyId::new(7)).is_none());
    }
}
