//! Authoritative tower state.

use std::time::Duration;

use road_defence_core::{CellCoord, EnemyId, TowerId, TowerKind, WorldPoint};

/// A placed defender occupying one ground cell.
#[derive(Clone, Debug)]
pub(crate) struct Tower {
    pub(crate) id: TowerId,
    pub(crate) kind: TowerKind,
    pub(crate) cell: CellCoord,
    pub(crate) position: WorldPoint,
    pub(crate) facing_degrees: f32,
    /// Game-clock timestamp of the last shot; initialized to placement time
    /// so a fresh tower waits one full cooldown before firing.
    pub(crate) last_shot: Duration,
    /// Enemy handle stored by the most recent targeting scan. Never cleared;
    /// the per-tick validity gate makes stale handles inert.
    pub(crate) target: Option<EnemyId>,
    pub(crate) shots_fired: u32,
    pub(crate) enemies_killed: u32,
}

impl Tower {
    pub(crate) fn place(id: TowerId, kind: TowerKind, cell: CellCoord, clock: Duration) -> Self {
        Self {
            id,
            kind,
            cell,
            position: cell.center(),
            facing_degrees: 0.0,
            last_shot: clock,
            target: None,
            shots_fired: 0,
            enemies_killed: 0,
        }
    }

    /// Whether the cooldown since the last shot has strictly elapsed.
    pub(crate) fn ready_to_fire(&self, clock: Duration) -> bool {
        clock > self.last_shot + self.kind.cooldown()
    }
}
