//! Scene assembly and the text presenter used by the headless adapter.

use anyhow::Result as AnyResult;
use road_defence_rendering::{
    to_vec2, Hud, Scene, SceneEnemy, SceneMap, SceneProjectile, ScenePresenter, SceneTower,
    TowerReadout,
};
use road_defence_world::{query, World};
use tracing::info;

/// Captures a complete presentation snapshot of the world.
pub(crate) fn capture(world: &World) -> Scene {
    let layout = query::layout(world);
    let economy = query::economy(world);

    let towers: Vec<_> = query::tower_view(world).into_vec();
    let hud = Hud {
        money: economy.money,
        health: economy.health,
        wave: economy.wave,
        game_over: economy.game_over,
        towers: towers
            .iter()
            .map(|tower| TowerReadout {
                id: tower.id,
                kind: tower.kind,
                shots_fired: tower.shots_fired,
                enemies_killed: tower.enemies_killed,
            })
            .collect(),
    };

    Scene {
        map: SceneMap::new(
            layout.columns(),
            layout.rows(),
            query::ground_cells(world)
                .iter()
                .map(|cell| to_vec2(cell.center()))
                .collect(),
        ),
        enemies: query::enemy_view(world)
            .into_vec()
            .into_iter()
            .map(|enemy| {
                SceneEnemy::new(
                    enemy.id,
                    enemy.category,
                    to_vec2(enemy.position),
                    enemy.facing_degrees,
                    enemy.health,
                    enemy.max_health,
                )
            })
            .collect(),
        towers: towers
            .into_iter()
            .map(|tower| {
                SceneTower::new(
                    tower.id,
                    tower.kind,
                    to_vec2(tower.position),
                    tower.facing_degrees,
                )
            })
            .collect(),
        projectiles: query::projectile_view(world)
            .into_vec()
            .into_iter()
            .map(|projectile| SceneProjectile {
                id: projectile.id,
                motion: projectile.motion,
                position: to_vec2(projectile.position),
                radius: projectile.radius,
            })
            .collect(),
        hud,
    }
}

/// Presenter that reports the scene as structured log lines.
#[derive(Debug, Default)]
pub(crate) struct SummaryPresenter;

impl ScenePresenter for SummaryPresenter {
    fn present(&mut self, scene: &Scene) -> AnyResult<()> {
        info!(
            "wave {} | money {} | health {} | {} enemies, {} projectiles in flight",
            scene.hud.wave,
            scene.hud.money,
            scene.hud.health,
            scene.enemies.len(),
            scene.projectiles.len(),
        );
        for tower in &scene.hud.towers {
            info!(
                "tower {} ({:?}): {} shots, {} hits",
                tower.id.get(),
                tower.kind,
                tower.shots_fired,
                tower.enemies_killed,
            );
        }
        Ok(())
    }
}
