//! Per-tick game state as seen by this faction.
//!
//! Snapshots are pure data. A fresh [`GameState`] arrives every tick and
//! fully replaces the previous one; the policy only ever borrows it.

use serde::{Deserialize, Serialize};

use crate::commands::Rotation;
use crate::math::Vec2;

/// Unique identifier for units, stable for a unit's lifetime.
pub type UnitId = u32;

/// Unit role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Economic unit, collects resources.
    Worker,
    /// Combat unit.
    Warrior,
}

/// Movement state reported by the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speed {
    /// Standing still.
    #[default]
    None,
    /// Moving forward.
    Forward,
    /// Moving backward.
    Backward,
}

/// Partial view of an enemy unit, present only while in sensor range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibleOpponent {
    /// Opponent identity.
    pub id: UnitId,
    /// Opponent role.
    pub role: Role,
    /// Current health.
    pub health: u32,
    /// Current position.
    pub position: Vec2,
    /// Facing in degrees.
    pub facing: f32,
    /// Movement state.
    #[serde(default)]
    pub speed: Speed,
    /// Rotation state.
    #[serde(default)]
    pub rotation: Rotation,
}

/// A collectible resource in sensor range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibleResource {
    /// Resource position.
    pub position: Vec2,
}

/// A projectile in sensor range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibleProjectile {
    /// Projectile position.
    pub position: Vec2,
    /// Direction of travel in degrees.
    pub facing: f32,
    /// Travel speed in cells per second.
    pub speed: f32,
}

/// One of this faction's alive units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSnapshot {
    /// Unit identity.
    pub id: UnitId,
    /// Declared role.
    pub role: Role,
    /// Current health.
    pub health: u32,
    /// Current position.
    pub position: Vec2,
    /// Facing in degrees.
    pub facing: f32,
    /// Movement state.
    #[serde(default)]
    pub speed: Speed,
    /// Rotation state.
    #[serde(default)]
    pub rotation: Rotation,
    /// Whether the weapon can fire this tick.
    #[serde(default)]
    pub weapon_ready: bool,
    /// Opponents in sensor range, in sensor order.
    #[serde(default)]
    pub opponents_in_view: Vec<VisibleOpponent>,
    /// Resources in sensor range, in sensor order.
    #[serde(default)]
    pub resources_in_view: Vec<VisibleResource>,
    /// Projectiles in sensor range.
    #[serde(default)]
    pub projectiles_in_view: Vec<VisibleProjectile>,
    /// Remaining waypoints of the active navigation, empty when idle.
    #[serde(default)]
    pub navigation_path: Vec<Vec2>,
}

impl UnitSnapshot {
    /// Whether the unit is following a navigation path.
    #[must_use]
    pub fn is_navigating(&self) -> bool {
        !self.navigation_path.is_empty()
    }

    /// Whether the unit is standing still, path or not.
    #[must_use]
    pub fn is_stationary(&self) -> bool {
        self.speed == Speed::None
    }
}

/// Everything the game reports for one tick.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GameState {
    /// Tick counter.
    #[serde(default)]
    pub tick: u64,
    /// Resource balance available for spawning.
    pub resources: u32,
    /// This faction's alive units, in game order.
    #[serde(default)]
    pub units: Vec<UnitSnapshot>,
}

impl GameState {
    /// Number of alive units with the given role.
    #[must_use]
    pub fn count_role(&self, role: Role) -> usize {
        self.units.iter().filter(|u| u.role == role).count()
    }

    /// Look up an own unit by identity.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&UnitSnapshot> {
        self.units.iter().find(|u| u.id == id)
    }

    /// Whether a unit with this identity is alive this tick.
    #[must_use]
    pub fn contains(&self, id: UnitId) -> bool {
        self.units.iter().any(|u| u.id == id)
    }
}
