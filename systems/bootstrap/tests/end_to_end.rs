use std::time::Duration;

use road_defence_core::{CellCoord, Command, EnemyCategory, Event, TowerKind};
use road_defence_system_bootstrap::Session;
use road_defence_world::query;

const STEP: Duration = Duration::from_millis(50);

fn run_ticks(session: &mut Session, ticks: u32) -> Vec<Event> {
    let mut log = Vec::new();
    for _ in 0..ticks {
        log.extend(session.tick(STEP));
    }
    log
}

#[test]
fn a_fast_tower_beside_the_road_earns_its_keep() {
    let mut session = Session::new();

    let placed = session.submit(Command::PlaceTower {
        kind: TowerKind::Fast,
        cell: CellCoord::new(2, 2),
    });
    assert!(matches!(placed.as_slice(), [Event::TowerPlaced { .. }]));
    assert_eq!(query::economy(session.world()).money, 950);

    let _ = session.submit(Command::SpawnEnemy {
        category: EnemyCategory::Ground,
        hp_multiplier: 1.0,
    });

    // Twelve seconds is plenty: the enemy walks straight through the
    // tower's 400-unit range at 50 units per second.
    let log = run_ticks(&mut session, 240);

    assert!(
        log.iter()
            .any(|event| matches!(event, Event::ProjectileFired { .. })),
        "the tower must open fire while the enemy passes"
    );
    assert!(
        log.iter()
            .any(|event| matches!(event, Event::EnemyKilled { reward: 4, .. })),
        "twenty-five health falls to repeated three-damage hits"
    );

    let economy = query::economy(session.world());
    assert_eq!(economy.money, 954, "price 50 paid, reward 4 collected");
    assert_eq!(economy.health, 10, "nothing reached the goal");
    assert!(query::enemy_view(session.world()).into_vec().is_empty());

    let towers = query::tower_view(session.world()).into_vec();
    assert!(towers[0].shots_fired >= 9);
    assert!(towers[0].enemies_killed >= 1);
}

#[test]
fn a_sniper_runs_down_an_air_enemy_with_a_homing_shot() {
    let mut session = Session::new();

    let _ = session.submit(Command::PlaceTower {
        kind: TowerKind::Sniper,
        cell: CellCoord::new(2, 2),
    });
    let _ = session.submit(Command::SpawnEnemy {
        category: EnemyCategory::Air,
        hp_multiplier: 1.0,
    });

    let log = run_ticks(&mut session, 80);

    // One fifteen-damage hit destroys a fifteen-health air enemy.
    assert!(log
        .iter()
        .any(|event| matches!(event, Event::EnemyKilled { .. })));
    let economy = query::economy(session.world());
    assert_eq!(economy.money, 854);
    assert_eq!(economy.health, 10);
}

#[test]
fn an_undefended_base_falls_and_game_over_fires_once() {
    let mut session = Session::new();
    let _ = session.submit(Command::StartInvasion);

    // Eighty simulated seconds of unopposed waves.
    let log = run_ticks(&mut session, 1_600);

    let game_overs: Vec<u32> = log
        .iter()
        .filter_map(|event| match event {
            Event::GameOver { waves_survived } => Some(*waves_survived),
            _ => None,
        })
        .collect();
    assert_eq!(game_overs.len(), 1, "the terminal transition is one-shot");
    assert_eq!(game_overs[0], 6, "air enemies bleed the base dry mid-wave-6");

    let economy = query::economy(session.world());
    assert!(economy.game_over);
    assert_eq!(economy.health, 0);
}

#[test]
fn identical_scripts_replay_identically() {
    let script = |session: &mut Session| -> Vec<Event> {
        let mut log = Vec::new();
        log.extend(session.submit(Command::PlaceTower {
            kind: TowerKind::Fast,
            cell: CellCoord::new(3, 2),
        }));
        log.extend(session.submit(Command::StartInvasion));
        log.extend(run_ticks(session, 600));
        log.extend(session.submit(Command::PlaceTower {
            kind: TowerKind::Sniper,
            cell: CellCoord::new(5, 4),
        }));
        log.extend(run_ticks(session, 600));
        log
    };

    let mut first_session = Session::new();
    let mut second_session = Session::new();
    let first = script(&mut first_session);
    let second = script(&mut second_session);

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(
        query::economy(first_session.world()),
        query::economy(second_session.world())
    );
}
