#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Road Defence adapters.
//!
//! The simulation core never draws anything: adapters assemble a [`Scene`]
//! from world snapshots each tick and hand it to a [`ScenePresenter`]. The
//! types here carry only plain data (positions, facing angles, tags), so
//! presenters own every sprite and shape decision.

use anyhow::Result as AnyResult;
use glam::Vec2;
use road_defence_core::{
    EnemyCategory, EnemyId, ProjectileId, ProjectileMotion, TowerId, TowerKind, WorldPoint,
    ENEMY_HIT_RADIUS, TILE_LENGTH,
};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Fill color of buildable ground tiles.
pub const GROUND_COLOR: Color = Color::from_rgb_u8(0, 0, 0);
/// Fill color of road tiles.
pub const ROAD_COLOR: Color = Color::from_rgb_u8(32, 33, 37);
/// Fill color of projectiles regardless of motion model.
pub const PROJECTILE_COLOR: Color = Color::from_rgb_u8(255, 193, 7);

/// Color used when presenting an enemy of the provided category.
#[must_use]
pub const fn enemy_color(category: EnemyCategory) -> Color {
    match category {
        EnemyCategory::Ground => Color::from_rgb_u8(0xc8, 0x2a, 0x36),
        EnemyCategory::Air => Color::from_rgb_u8(0x58, 0x47, 0xff),
    }
}

/// Color used when presenting a tower of the provided archetype.
#[must_use]
pub const fn tower_color(kind: TowerKind) -> Color {
    match kind {
        TowerKind::Fast => Color::from_rgb_u8(0x2f, 0x95, 0x32),
        TowerKind::Sniper => Color::from_rgb_u8(0x3b, 0x82, 0xf6),
    }
}

/// Converts a world-space point into adapter vector math.
#[must_use]
pub fn to_vec2(point: WorldPoint) -> Vec2 {
    Vec2::new(point.x(), point.y())
}

/// Immutable snapshot describing an enemy to present.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneEnemy {
    /// Identifier of the enemy.
    pub id: EnemyId,
    /// Category tag selecting the sprite.
    pub category: EnemyCategory,
    /// World-space position of the body center.
    pub position: Vec2,
    /// Facing angle in degrees.
    pub facing_degrees: f32,
    /// Body radius in world units.
    pub radius: f32,
    /// Remaining health, for health-bar overlays.
    pub health: u32,
    /// Health the enemy spawned with.
    pub max_health: u32,
}

impl SceneEnemy {
    /// Creates a new scene enemy with the shared body radius.
    #[must_use]
    pub fn new(
        id: EnemyId,
        category: EnemyCategory,
        position: Vec2,
        facing_degrees: f32,
        health: u32,
        max_health: u32,
    ) -> Self {
        Self {
            id,
            category,
            position,
            facing_degrees,
            radius: ENEMY_HIT_RADIUS,
            health,
            max_health,
        }
    }
}

/// Immutable snapshot describing a tower to present.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneTower {
    /// Identifier of the tower.
    pub id: TowerId,
    /// Archetype tag selecting the sprite.
    pub kind: TowerKind,
    /// World-space position of the tower center.
    pub position: Vec2,
    /// Facing angle in degrees.
    pub facing_degrees: f32,
    /// Attack radius, for range overlays.
    pub range: f32,
}

impl SceneTower {
    /// Creates a new scene tower, deriving the range from the archetype.
    #[must_use]
    pub fn new(id: TowerId, kind: TowerKind, position: Vec2, facing_degrees: f32) -> Self {
        Self {
            id,
            kind,
            position,
            facing_degrees,
            range: kind.range(),
        }
    }
}

/// Immutable snapshot describing a projectile to present.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneProjectile {
    /// Identifier of the projectile.
    pub id: ProjectileId,
    /// Motion tag, should a presenter want distinct trails.
    pub motion: ProjectileMotion,
    /// World-space position of the projectile center.
    pub position: Vec2,
    /// Radius of the projectile body.
    pub radius: f32,
}

/// Per-tower statistics surfaced on the HUD.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TowerReadout {
    /// Identifier of the tower.
    pub id: TowerId,
    /// Archetype of the tower.
    pub kind: TowerKind,
    /// Number of projectiles the tower has fired.
    pub shots_fired: u32,
    /// Number of impacts credited to the tower.
    pub enemies_killed: u32,
}

/// Player-facing counters surfaced on the HUD.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hud {
    /// Current money balance.
    pub money: u32,
    /// Current base health.
    pub health: u32,
    /// Index of the most recently started wave.
    pub wave: u32,
    /// Whether the match has ended.
    pub game_over: bool,
    /// Statistics for every placed tower in id order.
    pub towers: Vec<TowerReadout>,
}

/// Static map geometry presenters draw beneath the agents.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneMap {
    /// Number of tile columns.
    pub columns: u32,
    /// Number of tile rows.
    pub rows: u32,
    /// Side length of a square tile in world units.
    pub tile_length: f32,
    /// Centers of buildable ground tiles.
    pub ground_tiles: Vec<Vec2>,
}

impl SceneMap {
    /// Creates a new scene map with the engine tile length.
    #[must_use]
    pub fn new(columns: u32, rows: u32, ground_tiles: Vec<Vec2>) -> Self {
        Self {
            columns,
            rows,
            tile_length: TILE_LENGTH,
            ground_tiles,
        }
    }

    /// Total width of the grid in world units.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.tile_length
    }

    /// Total height of the grid in world units.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_length
    }
}

/// Complete description of one presented frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Static map geometry.
    pub map: SceneMap,
    /// Enemies in deterministic id order.
    pub enemies: Vec<SceneEnemy>,
    /// Towers in deterministic id order.
    pub towers: Vec<SceneTower>,
    /// Projectiles in deterministic id order.
    pub projectiles: Vec<SceneProjectile>,
    /// Player-facing counters.
    pub hud: Hud,
}

/// Sink that turns a [`Scene`] into pixels, text, or anything else.
pub trait ScenePresenter {
    /// Presents a single frame.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;
}
