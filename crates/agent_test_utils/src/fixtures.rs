//! Test fixtures and helpers.
//!
//! Builders for snapshots and environments so tests only spell out the
//! fields they care about.

use agent_core::commands::{Command, Rotation};
use agent_core::map::{Environment, ObstacleMap};
use agent_core::math::Vec2;
use agent_core::snapshot::{
    GameState, Role, Speed, UnitId, UnitSnapshot, VisibleOpponent, VisibleResource,
};

/// Worker price used by [`open_environment`].
pub const WORKER_COST: u32 = 100;

/// Warrior price used by [`open_environment`].
pub const WARRIOR_COST: u32 = 150;

/// Obstacle-free square map with the spawn point near the origin corner.
///
/// # Panics
///
/// Panics if `size` is too small to hold the spawn point at (4, 4).
#[must_use]
pub fn open_environment(size: u32) -> Environment {
    Environment::new(
        ObstacleMap::open(size, size),
        Vec2::new(4.0, 4.0),
        WORKER_COST,
        WARRIOR_COST,
    )
    .expect("fixture environment is valid")
}

/// Idle, healthy, stationary unit facing east.
#[must_use]
pub fn unit(id: UnitId, role: Role, x: f32, y: f32) -> UnitSnapshot {
    UnitSnapshot {
        id,
        role,
        health: 100,
        position: Vec2::new(x, y),
        facing: 0.0,
        speed: Speed::None,
        rotation: Rotation::None,
        weapon_ready: true,
        opponents_in_view: Vec::new(),
        resources_in_view: Vec::new(),
        projectiles_in_view: Vec::new(),
        navigation_path: Vec::new(),
    }
}

/// Worker at a position.
#[must_use]
pub fn worker(id: UnitId, x: f32, y: f32) -> UnitSnapshot {
    unit(id, Role::Worker, x, y)
}

/// Warrior at a position.
#[must_use]
pub fn warrior(id: UnitId, x: f32, y: f32) -> UnitSnapshot {
    unit(id, Role::Warrior, x, y)
}

/// Enemy warrior with a given facing.
#[must_use]
pub fn enemy_warrior(id: UnitId, x: f32, y: f32, facing: f32) -> VisibleOpponent {
    VisibleOpponent {
        id,
        role: Role::Warrior,
        health: 100,
        position: Vec2::new(x, y),
        facing,
        speed: Speed::None,
        rotation: Rotation::None,
    }
}

/// Resource at a position.
#[must_use]
pub fn resource(x: f32, y: f32) -> VisibleResource {
    VisibleResource {
        position: Vec2::new(x, y),
    }
}

/// Snapshot with the given units.
#[must_use]
pub fn state(tick: u64, resources: u32, units: Vec<UnitSnapshot>) -> GameState {
    GameState {
        tick,
        resources,
        units,
    }
}

/// Builder-style tweaks on a unit snapshot.
pub trait UnitExt: Sized {
    /// Set health.
    #[must_use]
    fn with_health(self, health: u32) -> Self;
    /// Set facing.
    #[must_use]
    fn turned(self, degrees: f32) -> Self;
    /// Add a visible opponent.
    #[must_use]
    fn seeing(self, opponent: VisibleOpponent) -> Self;
    /// Add a visible resource.
    #[must_use]
    fn seeing_resource(self, resource: VisibleResource) -> Self;
    /// Give the unit an active path.
    #[must_use]
    fn navigating_to(self, x: f32, y: f32) -> Self;
    /// Set the weapon-ready flag.
    #[must_use]
    fn weapon_ready(self, ready: bool) -> Self;
}

impl UnitExt for UnitSnapshot {
    fn with_health(mut self, health: u32) -> Self {
        self.health = health;
        self
    }

    fn turned(mut self, degrees: f32) -> Self {
        self.facing = degrees;
        self
    }

    fn seeing(mut self, opponent: VisibleOpponent) -> Self {
        self.opponents_in_view.push(opponent);
        self
    }

    fn seeing_resource(mut self, resource: VisibleResource) -> Self {
        self.resources_in_view.push(resource);
        self
    }

    fn navigating_to(mut self, x: f32, y: f32) -> Self {
        self.navigation_path.push(Vec2::new(x, y));
        self.speed = Speed::Forward;
        self
    }

    fn weapon_ready(mut self, ready: bool) -> Self {
        self.weapon_ready = ready;
        self
    }
}

/// Spawn commands among `commands`.
#[must_use]
pub fn spawns(commands: &[Command]) -> Vec<Role> {
    commands
        .iter()
        .filter_map(|c| match c {
            Command::Spawn { role } => Some(*role),
            _ => None,
        })
        .collect()
}

/// Commands addressed to one unit.
#[must_use]
pub fn commands_for(commands: &[Command], unit: UnitId) -> Vec<Command> {
    commands
        .iter()
        .filter(|c| c.unit() == Some(unit))
        .cloned()
        .collect()
}
