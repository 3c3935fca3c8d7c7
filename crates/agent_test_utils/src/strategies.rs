//! Proptest strategies for snapshots.

use proptest::prelude::*;

use agent_core::snapshot::{GameState, Role, UnitId, UnitSnapshot};

use crate::fixtures::unit;

/// Either role.
pub fn any_role() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::Worker), Just(Role::Warrior)]
}

/// Idle unit with the given identity somewhere on a `size`×`size` map.
pub fn unit_with_id(id: UnitId, size: u32) -> impl Strategy<Value = UnitSnapshot> {
    let max = size as f32 - 1.0;
    (any_role(), 0.0..max, 0.0..max, 0.0f32..360.0, 1u32..=100).prop_map(
        move |(role, x, y, facing, health)| {
            let mut snapshot = unit(id, role, x, y);
            snapshot.facing = facing;
            snapshot.health = health;
            snapshot
        },
    )
}

/// Snapshot whose units are a subset of identities `0..pool`.
pub fn game_state(pool: u32, size: u32) -> impl Strategy<Value = GameState> {
    let units: Vec<_> = (0..pool)
        .map(|id| proptest::option::of(unit_with_id(id, size)))
        .collect();
    (units, 0u32..1000).prop_map(|(units, resources)| GameState {
        tick: 0,
        resources,
        units: units.into_iter().flatten().collect(),
    })
}

/// A run of snapshots with increasing tick numbers.
pub fn game_sequence(pool: u32, size: u32, len: usize) -> impl Strategy<Value = Vec<GameState>> {
    proptest::collection::vec(game_state(pool, size), 1..=len).prop_map(|mut states| {
        for (tick, state) in states.iter_mut().enumerate() {
            state.tick = tick as u64;
        }
        states
    })
}
