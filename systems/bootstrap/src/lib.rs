#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session assembly for the Road Defence experience.
//!
//! A [`Session`] owns the authoritative world together with every pure
//! system and runs them in a fixed order each tick. Adapters talk to the
//! simulation exclusively through [`Session::submit`] and [`Session::tick`];
//! all mutation stays confined to this single context, so the simulation
//! needs no synchronization anywhere.

use std::time::Duration;

use road_defence_core::{Command, Event};
use road_defence_system_collision::CollisionResolver;
use road_defence_system_tower_combat::TowerCombat;
use road_defence_system_tower_targeting::TowerTargeting;
use road_defence_system_wave_scheduling::WaveScheduling;
use road_defence_world::{self as world, map::MapError, map::MapLayout, query, World};

/// Map shipped with the engine so a session can run without assets.
pub const DEFAULT_MAP: &str = "\
12:8
############
#0$$$$$$$1##
#########$##
#3$$$$$$$2##
#$##########
#4$$$$$$$5##
#########$##
#######7$6##";

/// Simulation context bundling the world with its systems.
#[derive(Debug)]
pub struct Session {
    world: World,
    waves: WaveScheduling,
    targeting: TowerTargeting,
    combat: TowerCombat,
    collision: CollisionResolver,
}

impl Session {
    /// Creates a session on the embedded default map.
    #[must_use]
    pub fn new() -> Self {
        Self::from_map_text(DEFAULT_MAP).expect("embedded default map is valid")
    }

    /// Creates a session from a textual map definition.
    pub fn from_map_text(text: &str) -> Result<Self, MapError> {
        let layout = MapLayout::parse(text)?;
        Ok(Self {
            world: World::from_layout(layout),
            waves: WaveScheduling::new(),
            targeting: TowerTargeting::new(),
            combat: TowerCombat::new(),
            collision: CollisionResolver::new(),
        })
    }

    /// Read-only access to the authoritative world for queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Submits an adapter command (purchase, sale, invasion start) and
    /// returns every event it produced.
    pub fn submit(&mut self, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);
        // The scheduler reacts immediately so `StartInvasion` opens wave one
        // without waiting for the next tick.
        self.pump_waves(&mut events, 0);
        events
    }

    /// Advances the simulation by `dt`, running every system in its fixed
    /// order, and returns the tick's full event log.
    pub fn tick(&mut self, dt: Duration) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(&mut self.world, Command::Tick { dt }, &mut events);
        self.pump_waves(&mut events, 0);

        // Combat fires on targets stored last tick, then targeting refreshes
        // the stored targets for the next one.
        let mut commands = Vec::new();
        self.combat.handle(
            &query::tower_view(&self.world),
            &query::enemy_view(&self.world),
            &mut commands,
        );
        self.apply_all(&mut commands, &mut events);

        self.targeting.handle(
            &query::tower_view(&self.world),
            &query::enemy_view(&self.world),
            &mut commands,
        );
        self.apply_all(&mut commands, &mut events);

        self.collision.handle(
            &query::projectile_view(&self.world),
            &query::enemy_view(&self.world),
            &mut commands,
        );
        self.apply_all(&mut commands, &mut events);

        events
    }

    fn apply_all(&mut self, commands: &mut Vec<Command>, events: &mut Vec<Event>) {
        for command in commands.drain(..) {
            world::apply(&mut self.world, command, events);
        }
    }

    fn pump_waves(&mut self, events: &mut Vec<Event>, mut cursor: usize) {
        while cursor < events.len() {
            let mut commands = Vec::new();
            self.waves.handle(&events[cursor..], &mut commands);
            cursor = events.len();
            for command in commands {
                world::apply(&mut self.world, command, events);
            }
        }
    }
}
