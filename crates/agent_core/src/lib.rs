//! # Agent Core
//!
//! Per-tick decision policy for a real-time strategy game client.
//!
//! Every simulation tick the game delivers a [`snapshot::GameState`] and the
//! [`policy::TickPolicy`] answers with a bounded set of commands written to an
//! [`commands::ActionSink`]:
//! - No networking and no wire format (the transport owns both)
//! - No simulation, collision or pathfinding
//! - One seeded RNG per policy instance
//!
//! ## Crate Structure
//!
//! - [`snapshot`] - Read-only per-tick view of own units and what they see
//! - [`map`] - Static environment: obstacle grid, spawn point, unit costs
//! - [`math`] - 2D vectors and heading/point angles
//! - [`commands`] - Outbound commands and the action sink
//! - [`config`] - Tunable policy constants (RON)
//! - [`economy`] - Spawn decisions
//! - [`memory`] - Previous-tick health per unit
//! - [`targeting`] - Per-tick target claims
//! - [`guard`] - Corner guard roster
//! - [`worker`] / [`warrior`] - Role handlers
//! - [`policy`] - The tick loop tying it all together

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod commands;
pub mod config;
pub mod economy;
pub mod error;
pub mod guard;
pub mod map;
pub mod math;
pub mod memory;
pub mod policy;
pub mod snapshot;
pub mod speech;
pub mod targeting;
pub mod warrior;
pub mod worker;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commands::{ActionSink, Command, CommandBuffer, Rotation};
    pub use crate::config::PolicyConfig;
    pub use crate::economy::EconomyPlanner;
    pub use crate::error::{AgentError, Result};
    pub use crate::guard::GuardRoster;
    pub use crate::map::{Environment, ObstacleMap};
    pub use crate::math::Vec2;
    pub use crate::memory::MemoryTracker;
    pub use crate::policy::{TickPolicy, TickSummary};
    pub use crate::snapshot::{
        GameState, Role, Speed, UnitId, UnitSnapshot, VisibleOpponent, VisibleProjectile,
        VisibleResource,
    };
    pub use crate::targeting::TargetClaims;
}
