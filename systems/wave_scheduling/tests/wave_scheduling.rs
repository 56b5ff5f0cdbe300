use std::time::Duration;

use road_defence_core::{Command, Event};
use road_defence_system_wave_scheduling::WaveScheduling;
use road_defence_world::{self as world, map::MapLayout, query, World};

const TEST_MAP: &str = "4:2\n0$$1\n####";

fn new_world() -> World {
    World::from_layout(MapLayout::parse(TEST_MAP).expect("test map"))
}

fn pump(world: &mut World, scheduler: &mut WaveScheduling, events: Vec<Event>) -> Vec<Event> {
    let mut log = events;
    let mut cursor = 0;
    while cursor < log.len() {
        let mut commands = Vec::new();
        scheduler.handle(&log[cursor..], &mut commands);
        cursor = log.len();
        for command in commands {
            let mut generated = Vec::new();
            world::apply(world, command, &mut generated);
            log.extend(generated);
        }
    }
    log
}

fn run(total: Duration, step: Duration) -> Vec<Event> {
    let mut world = new_world();
    let mut scheduler = WaveScheduling::new();
    let mut log = Vec::new();

    let mut start_events = Vec::new();
    world::apply(&mut world, Command::StartInvasion, &mut start_events);
    log.extend(pump(&mut world, &mut scheduler, start_events));

    let mut elapsed = Duration::ZERO;
    while elapsed < total {
        let mut tick_events = Vec::new();
        world::apply(&mut world, Command::Tick { dt: step }, &mut tick_events);
        log.extend(pump(&mut world, &mut scheduler, tick_events));
        elapsed += step;
    }
    log
}

#[test]
fn wave_one_spawns_every_enemy_within_its_window() {
    let log = run(Duration::from_secs(10), Duration::from_millis(100));

    let spawned = log
        .iter()
        .filter(|event| matches!(event, Event::EnemySpawned { .. }))
        .count();
    // Wave 1: six enemies, 1.68 s apart, last due at 8.4 s.
    assert_eq!(spawned, 6);
}

#[test]
fn the_second_wave_starts_while_the_first_may_still_be_marching() {
    let log = run(Duration::from_secs(13), Duration::from_millis(250));

    let waves: Vec<u32> = log
        .iter()
        .filter_map(|event| match event {
            Event::WaveStarted { wave, .. } => Some(*wave),
            _ => None,
        })
        .collect();
    assert_eq!(waves, vec![1, 2]);
}

#[test]
fn replays_of_the_same_script_are_identical() {
    let first = run(Duration::from_secs(15), Duration::from_millis(100));
    let second = run(Duration::from_secs(15), Duration::from_millis(100));
    assert_eq!(first, second, "scheduling must be deterministic");
}

#[test]
fn spawned_enemies_enter_the_world_at_the_path_start() {
    let mut world = new_world();
    let mut scheduler = WaveScheduling::new();

    let mut start_events = Vec::new();
    world::apply(&mut world, Command::StartInvasion, &mut start_events);
    let _ = pump(&mut world, &mut scheduler, start_events);

    let enemies = query::enemy_view(&world).into_vec();
    assert_eq!(enemies.len(), 1, "wave 1 spawns its first enemy immediately");
    assert_eq!(enemies[0].position, query::path(&world).start().position());
}
