#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless command-line adapter that drives a Road Defence match.
//!
//! Loads a map and an optional scenario file, runs the session loop at a
//! fixed tick rate, and reports wave, combat, and economy activity through
//! structured logs. Rendering proper stays behind the [`ScenePresenter`]
//! seam; this adapter presents a text summary once the match ends.

mod scene;

use std::{fs, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use road_defence_core::{CellCoord, Command, Event, TowerKind, WELCOME_BANNER};
use road_defence_rendering::ScenePresenter;
use road_defence_system_bootstrap::Session;
use road_defence_world::query;
use serde::Deserialize;
use tracing::{debug, info, warn};

use scene::SummaryPresenter;

/// Headless Road Defence simulation runner.
#[derive(Debug, Parser)]
#[command(name = "road-defence")]
struct Args {
    /// Path to a map definition; the embedded default map is used when omitted.
    #[arg(long)]
    map: Option<PathBuf>,
    /// Path to a TOML scenario describing the towers to pre-place.
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// Simulated seconds to run before stopping.
    #[arg(long, default_value_t = 60.0)]
    duration: f32,
    /// Fixed simulation rate in ticks per second.
    #[arg(long, default_value_t = 20)]
    tick_hz: u32,
}

/// Pre-placed tower layout loaded from a scenario file.
#[derive(Debug, Default, Deserialize)]
struct Scenario {
    /// Towers purchased before the invasion starts.
    #[serde(default)]
    towers: Vec<TowerPlan>,
}

/// One tower purchase in a scenario file.
#[derive(Debug, Deserialize)]
struct TowerPlan {
    /// Archetype to purchase.
    kind: TowerKind,
    /// Ground-cell column to build on.
    column: u32,
    /// Ground-cell row to build on.
    row: u32,
}

/// Entry point for the Road Defence command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    println!("{WELCOME_BANNER}");

    let mut session = match &args.map {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading map file {}", path.display()))?;
            Session::from_map_text(&text)
                .with_context(|| format!("parsing map file {}", path.display()))?
        }
        None => Session::new(),
    };

    let scenario = match &args.scenario {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading scenario file {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("parsing scenario file {}", path.display()))?
        }
        None => Scenario::default(),
    };

    for plan in &scenario.towers {
        let events = session.submit(Command::PlaceTower {
            kind: plan.kind,
            cell: CellCoord::new(plan.column, plan.row),
        });
        report(&events);
    }

    report(&session.submit(Command::StartInvasion));

    let dt = Duration::from_secs_f32(1.0 / args.tick_hz.max(1) as f32);
    let total_ticks = (args.duration * args.tick_hz as f32).ceil() as u64;
    for _ in 0..total_ticks {
        let events = session.tick(dt);
        report(&events);
        if query::economy(session.world()).game_over {
            break;
        }
    }

    let mut presenter = SummaryPresenter::default();
    presenter.present(&scene::capture(session.world()))?;
    Ok(())
}

/// Relays notable simulation events to the log.
fn report(events: &[Event]) {
    for event in events {
        match event {
            Event::WaveStarted {
                wave,
                enemy_count,
                air_count,
                hp_multiplier,
                spawn_interval,
            } => {
                info!(
                    "wave {wave} starting: {enemy_count} enemies, {air_count} air, hp x{hp_multiplier:.2}, interval {:.2}s",
                    spawn_interval.as_secs_f32(),
                );
            }
            Event::TowerPlaced { tower, kind, cell } => {
                info!(
                    "placed {kind:?} tower {} at ({}, {})",
                    tower.get(),
                    cell.column(),
                    cell.row(),
                );
            }
            Event::TowerPlacementRejected { kind, cell, reason } => {
                warn!(
                    "could not place {kind:?} tower at ({}, {}): {reason:?}",
                    cell.column(),
                    cell.row(),
                );
            }
            Event::EnemyKilled { enemy, reward } => {
                debug!("enemy {} destroyed, +{reward} money", enemy.get());
            }
            Event::EnemyReachedGoal {
                damage,
                health_remaining,
                ..
            } => {
                warn!("the base took {damage} damage, {health_remaining} health left");
            }
            Event::GameOver { waves_survived } => {
                info!("game over: the base fell during wave {waves_survived}");
            }
            _ => {}
        }
    }
}
