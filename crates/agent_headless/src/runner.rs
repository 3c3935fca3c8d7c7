//! Headless driver loop.
//!
//! Reads [`Message`] lines, feeds snapshots to a [`TickPolicy`] and writes
//! [`Response`] lines. Bad lines produce an error response and the loop
//! keeps going.

use std::io::{self, BufRead, Write};

use agent_core::commands::{Command, CommandBuffer};
use agent_core::config::PolicyConfig;
use agent_core::map::Environment;
use agent_core::policy::{TickPolicy, TickSummary};
use agent_core::snapshot::{GameState, Role};
use tracing::{debug, info, warn};

use crate::protocol::{Message, ProtocolError, Response, RunSummary};

/// Headless runner configuration.
#[derive(Debug, Clone, Default)]
pub struct HeadlessConfig {
    /// Policy constants used when the first setup arrives.
    pub policy: PolicyConfig,
}

/// Drives one policy instance over a stream of messages.
pub struct HeadlessRunner {
    config: HeadlessConfig,
    policy: Option<TickPolicy>,
    buffer: CommandBuffer,
    summary: RunSummary,
}

impl HeadlessRunner {
    /// Create a new headless runner with default config.
    pub fn new() -> Self {
        Self::with_config(HeadlessConfig::default())
    }

    /// Create a runner with custom configuration.
    pub fn with_config(config: HeadlessConfig) -> Self {
        Self {
            config,
            policy: None,
            buffer: CommandBuffer::new(),
            summary: RunSummary::default(),
        }
    }

    /// Totals so far.
    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Active policy, once an environment has been received.
    pub fn policy(&self) -> Option<&TickPolicy> {
        self.policy.as_ref()
    }

    /// Run until `quit` or end of input.
    ///
    /// Writes a ready line first and a summary plus bye line last. Only I/O
    /// failures abort the run.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<RunSummary> {
        emit(&mut output, &Response::ready())?;

        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let message = match Message::from_json(line) {
                Ok(message) => message,
                Err(e) => {
                    self.reject(&mut output, &e)?;
                    continue;
                }
            };
            debug!(message = message.name(), "Received message");

            let result = match message {
                Message::Setup(env) => self.setup(env).map(|()| None),
                Message::Tick(state) => self.tick(&state).map(Some),
                Message::Quit => break,
            };
            match result {
                Ok(Some(response)) => emit(&mut output, &response)?,
                Ok(None) => {}
                Err(e) => self.reject(&mut output, &e)?,
            }
        }

        info!(
            ticks = self.summary.ticks,
            errors = self.summary.errors,
            "Input finished"
        );
        emit(&mut output, &Response::Summary(self.summary.clone()))?;
        emit(&mut output, &Response::Bye)?;
        Ok(self.summary.clone())
    }

    /// Install or replace the environment. Silent on success.
    fn setup(&mut self, env: Environment) -> Result<(), ProtocolError> {
        match &mut self.policy {
            Some(policy) => policy.set_environment(env)?,
            None => self.policy = Some(TickPolicy::new(env, self.config.policy.clone())?),
        }
        Ok(())
    }

    fn tick(&mut self, state: &GameState) -> Result<Response, ProtocolError> {
        let policy = self
            .policy
            .as_mut()
            .ok_or(ProtocolError::TickBeforeSetup(state.tick))?;

        let outcome = policy.tick(state, &mut self.buffer);
        let commands = self.buffer.drain();
        self.record(&outcome, &commands);

        Ok(Response::Commands {
            tick: state.tick,
            commands,
        })
    }

    fn record(&mut self, outcome: &TickSummary, commands: &[Command]) {
        self.summary.ticks += 1;
        for command in commands {
            *self
                .summary
                .commands
                .entry(command.kind().to_string())
                .or_insert(0) += 1;
        }
        match outcome.spawned {
            Some(Role::Worker) => self.summary.workers_spawned += 1,
            Some(Role::Warrior) => self.summary.warriors_spawned += 1,
            None => {}
        }
        self.summary.flee_orders += u64::from(outcome.fleeing);
        self.summary.shots += u64::from(outcome.shots);
    }

    fn reject<W: Write>(&mut self, output: &mut W, error: &ProtocolError) -> io::Result<()> {
        warn!(error = %error, "Rejected input line");
        self.summary.errors += 1;
        emit(output, &Response::error(error.to_string()))
    }
}

/// Write one response line and flush so the reader sees it immediately.
fn emit<W: Write>(output: &mut W, response: &Response) -> io::Result<()> {
    output.write_all(response.to_json_line().as_bytes())?;
    output.flush()
}

impl Default for HeadlessRunner {
    fn default() -> Self {
        Self::new()
    }
}
