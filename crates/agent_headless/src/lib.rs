//! Headless driver for the skirmish agent.
//!
//! Feeds recorded or generated game snapshots through
//! [`agent_core::policy::TickPolicy`] and reports the issued commands. Useful
//! for:
//!
//! - **Replay**: run a recorded session and inspect every decision
//! - **CI verification**: check that a seeded run issues the same commands
//!
//! # Protocol
//!
//! Communication uses JSON lines (one JSON object per line):
//!
//! - **stdin**: Setup, tick snapshots, quit
//! - **stdout**: Commands per tick, errors, final summary
//! - **stderr**: Debug logs (human-readable)
//!
//! See [`protocol`] module for the full message/response specification.
//!
//! # Example
//!
//! ```bash
//! cargo run -p agent_headless -- run --input session.jsonl --seed 42
//! ```

pub mod protocol;
pub mod runner;

pub use protocol::{Message, ProtocolError, Response, RunSummary};
pub use runner::{HeadlessConfig, HeadlessRunner};
