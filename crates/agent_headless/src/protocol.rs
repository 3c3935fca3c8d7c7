//! JSON-lines protocol for the headless driver.
//!
//! The driver replays recorded or generated snapshots through the policy:
//!
//! **Input (stdin or file):** one environment setup, then one snapshot per tick
//! **Output (stdout):** the commands issued for each tick
//!
//! # Example Session
//!
//! ```text
//! <- {"type":"ready","version":"1.0"}
//! -> {"type":"setup","obstacles":{"width":4,"height":4,"blocked":[...]},"spawn_point":{"x":1.0,"y":1.0},"worker_cost":100,"warrior_cost":150}
//! -> {"type":"tick","tick":0,"resources":100,"units":[]}
//! <- {"type":"commands","tick":0,"commands":[{"cmd":"spawn","role":"worker"}]}
//! -> {"type":"quit"}
//! <- {"type":"summary","ticks":1,...}
//! <- {"type":"bye"}
//! ```

use std::collections::BTreeMap;

use agent_core::commands::Command;
use agent_core::error::AgentError;
use agent_core::map::Environment;
use agent_core::snapshot::GameState;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Protocol version reported in the ready line.
pub const PROTOCOL_VERSION: &str = "1.0";

/// Error type for a single protocol line.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// Line is not a valid message.
    #[error("Malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
    /// A snapshot arrived before any environment.
    #[error("Tick {0} received before setup")]
    TickBeforeSetup(u64),
    /// Environment or config rejected by the policy.
    #[error(transparent)]
    Agent(#[from] AgentError),
}

// ============================================================================
// Input Messages (game -> driver)
// ============================================================================

/// Messages the driver accepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    /// Static environment; must precede the first tick. Resending replaces it.
    Setup(Environment),
    /// Snapshot for one tick.
    Tick(GameState),
    /// Stop reading input.
    Quit,
}

impl Message {
    /// Parse from a JSON line.
    pub fn from_json(json: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Message name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Setup(_) => "setup",
            Self::Tick(_) => "tick",
            Self::Quit => "quit",
        }
    }
}

// ============================================================================
// Output Responses (driver -> game)
// ============================================================================

/// Lines the driver writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    /// Driver is ready for input.
    Ready { version: String },

    /// Commands issued for a tick.
    Commands { tick: u64, commands: Vec<Command> },

    /// A line could not be handled; the driver keeps going.
    Error { message: String },

    /// Totals over the whole run.
    Summary(RunSummary),

    /// Goodbye message before shutdown.
    Bye,
}

/// Totals over a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Ticks processed.
    pub ticks: u64,
    /// Lines rejected.
    pub errors: u64,
    /// Issued commands by kind.
    pub commands: BTreeMap<String, u64>,
    /// Workers spawned.
    pub workers_spawned: u64,
    /// Warriors spawned.
    pub warriors_spawned: u64,
    /// Worker flee orders.
    pub flee_orders: u64,
    /// Shots fired.
    pub shots: u64,
}

// ============================================================================
// Helpers
// ============================================================================

impl Response {
    /// Create a ready response.
    pub fn ready() -> Self {
        Self::Ready {
            version: PROTOCOL_VERSION.to_string(),
        }
    }

    /// Create an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Serialize to JSON line (with newline).
    pub fn to_json_line(&self) -> String {
        let mut json = serde_json::to_string(self).unwrap_or_else(|e| {
            format!(
                r#"{{"type":"error","message":"Serialization failed: {}"}}"#,
                e
            )
        });
        json.push('\n');
        json
    }
}
