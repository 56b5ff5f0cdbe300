#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic wave scheduling system.
//!
//! Owns the invasion clock: waves begin on a fixed cadence and each wave's
//! spawns are emitted on their own deadlines. Wave cadence is anchored to the
//! previous wave's start, never to spawn completion, so later waves overlap
//! the tail of earlier ones by design.

use std::time::Duration;

use road_defence_core::{Command, EnemyCategory, Event};

/// Fixed delay between consecutive wave starts.
const WAVE_DURATION: Duration = Duration::from_secs(12);

/// Number of enemies spawned by the provided wave.
#[must_use]
pub fn enemy_count(wave: u32) -> u32 {
    4 + 2 * wave
}

/// Fraction of the wave that travels by air, clamped to [0.1, 0.6].
#[must_use]
pub fn air_ratio(wave: u32) -> f32 {
    (0.1 * wave as f32).clamp(0.1, 0.6)
}

/// Number of air enemies in the wave; the rest travel by ground.
#[must_use]
pub fn air_count(wave: u32) -> u32 {
    (enemy_count(wave) as f32 * air_ratio(wave)) as u32
}

/// Health multiplier applied to every enemy of the wave.
#[must_use]
pub fn hp_multiplier(wave: u32) -> f32 {
    1.0 + 0.12 * wave as f32
}

/// Delay between consecutive spawns within the wave, floored at 0.3 s.
#[must_use]
pub fn spawn_interval(wave: u32) -> Duration {
    Duration::from_secs_f32((1.8 - 0.12 * wave as f32).max(0.3))
}

#[derive(Clone, Copy, Debug)]
struct PendingSpawn {
    due: Duration,
    category: EnemyCategory,
    hp_multiplier: f32,
}

/// Pure system that schedules waves and their timed enemy spawns.
#[derive(Debug, Default)]
pub struct WaveScheduling {
    running: bool,
    wave: u32,
    clock: Duration,
    next_wave_at: Duration,
    pending: Vec<PendingSpawn>,
}

impl WaveScheduling {
    /// Creates an idle scheduler; nothing happens until the invasion starts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes world events and emits wave and spawn commands now due.
    ///
    /// Starting is idempotent: only the first `InvasionStarted` arms the
    /// cadence. A single oversized time step may make several waves due; all
    /// of them begin, in order, within one call.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::InvasionStarted => {
                    if !self.running {
                        self.running = true;
                        self.next_wave_at = self.clock;
                    }
                }
                Event::TimeAdvanced { dt } => {
                    self.clock = self.clock.saturating_add(*dt);
                }
                _ => {}
            }
        }

        if !self.running {
            return;
        }

        while self.clock >= self.next_wave_at {
            self.begin_wave(out);
        }

        let mut due = 0;
        for spawn in &self.pending {
            if spawn.due > self.clock {
                break;
            }
            out.push(Command::SpawnEnemy {
                category: spawn.category,
                hp_multiplier: spawn.hp_multiplier,
            });
            due += 1;
        }
        if due > 0 {
            let _ = self.pending.drain(..due);
        }
    }

    fn begin_wave(&mut self, out: &mut Vec<Command>) {
        // Anchor to the previous deadline, not the current clock, so cadence
        // never drifts under irregular tick sizes.
        let wave_start = self.next_wave_at;
        self.wave += 1;
        let wave = self.wave;

        let count = enemy_count(wave);
        let air = air_count(wave);
        let hp = hp_multiplier(wave);
        let interval = spawn_interval(wave);

        out.push(Command::BeginWave {
            wave,
            enemy_count: count,
            air_count: air,
            hp_multiplier: hp,
            spawn_interval: interval,
        });

        for index in 0..count {
            let category = if index < air {
                EnemyCategory::Air
            } else {
                EnemyCategory::Ground
            };
            self.pending.push(PendingSpawn {
                due: wave_start + interval * index,
                category,
                hp_multiplier: hp,
            });
        }
        self.pending.sort_by_key(|spawn| spawn.due);

        self.next_wave_at = wave_start + WAVE_DURATION;
    }
}
