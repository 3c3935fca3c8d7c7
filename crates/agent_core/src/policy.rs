//! The per-tick decision loop.
//!
//! [`TickPolicy::tick`] is called exactly once per simulation step:
//! 1. Forget units missing from the snapshot (memory and guard roster)
//! 2. Decide on a spawn
//! 3. Route every alive unit to its role handler, in snapshot order
//!
//! Target claims live for one call only. Memory, guards and the random
//! source live as long as the policy.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::commands::ActionSink;
use crate::config::PolicyConfig;
use crate::economy::EconomyPlanner;
use crate::error::Result;
use crate::guard::GuardRoster;
use crate::map::Environment;
use crate::memory::MemoryTracker;
use crate::snapshot::{GameState, Role};
use crate::targeting::TargetClaims;
use crate::warrior::{handle_warrior, WarriorAction};
use crate::worker::{handle_worker, WorkerAction};

/// Random source shared by every decision of one policy instance.
pub type PolicyRng = ChaCha8Rng;

/// Read-only inputs plus the random source, handed to role handlers.
pub struct TickContext<'a> {
    /// Static environment.
    pub env: &'a Environment,
    /// Policy constants.
    pub config: &'a PolicyConfig,
    /// This tick's snapshot.
    pub state: &'a GameState,
    /// Shared random source.
    pub rng: &'a mut PolicyRng,
}

/// Counts of what happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickSummary {
    /// Tick the summary belongs to.
    pub tick: u64,
    /// Spawn issued, if any.
    pub spawned: Option<Role>,
    /// Workers running home.
    pub fleeing: u32,
    /// Workers heading for a resource.
    pub collecting: u32,
    /// Units sent to a random cell.
    pub wandering: u32,
    /// Warriors on guard duty.
    pub guarding: u32,
    /// Warriors escorting a worker.
    pub following: u32,
    /// Warriors with a target.
    pub engaging: u32,
    /// Shots fired.
    pub shots: u32,
}

impl TickSummary {
    fn record_worker(&mut self, action: WorkerAction) {
        match action {
            WorkerAction::Flee => self.fleeing += 1,
            WorkerAction::Collect => self.collecting += 1,
            WorkerAction::Wander => self.wandering += 1,
            WorkerAction::Busy => {}
        }
    }

    fn record_warrior(&mut self, action: WarriorAction) {
        if action.is_engaging() {
            self.engaging += 1;
        }
        match action {
            WarriorAction::Fire => self.shots += 1,
            WarriorAction::Guard(_) => self.guarding += 1,
            WarriorAction::Follow(_) => self.following += 1,
            WarriorAction::Wander => self.wandering += 1,
            WarriorAction::Evade
            | WarriorAction::Aim(_)
            | WarriorAction::HoldFire
            | WarriorAction::Busy => {}
        }
    }
}

/// Stateful decision function for one faction over one game.
#[derive(Debug)]
pub struct TickPolicy {
    env: Environment,
    config: PolicyConfig,
    economy: EconomyPlanner,
    memory: MemoryTracker,
    guards: GuardRoster,
    rng: PolicyRng,
}

impl TickPolicy {
    /// Create a policy, validating both inputs.
    pub fn new(env: Environment, config: PolicyConfig) -> Result<Self> {
        env.validate()?;
        config.validate()?;
        tracing::info!(
            width = env.width(),
            height = env.height(),
            seed = config.seed,
            threshold = config.worker_ratio_threshold,
            "Tick policy ready"
        );
        Ok(Self {
            economy: EconomyPlanner::for_environment(config.worker_ratio_threshold, &env),
            memory: MemoryTracker::new(),
            guards: GuardRoster::new(config.max_guards),
            rng: PolicyRng::seed_from_u64(config.seed),
            env,
            config,
        })
    }

    /// Create a policy with default constants.
    pub fn with_defaults(env: Environment) -> Result<Self> {
        Self::new(env, PolicyConfig::default())
    }

    /// Decide and issue every command for this tick.
    pub fn tick(&mut self, state: &GameState, sink: &mut dyn ActionSink) -> TickSummary {
        let _span = tracing::debug_span!("tick", tick = state.tick).entered();

        let forgotten = self.memory.purge(state);
        let released = self.guards.release_missing(state);
        if forgotten > 0 || released > 0 {
            tracing::debug!(forgotten, released, "Dropped state for dead units");
        }

        let mut summary = TickSummary {
            tick: state.tick,
            spawned: self.economy.plan(state, sink),
            ..TickSummary::default()
        };

        let mut claims = TargetClaims::new();
        let mut ctx = TickContext {
            env: &self.env,
            config: &self.config,
            state,
            rng: &mut self.rng,
        };

        for unit in &state.units {
            let health_dropped = self.memory.record_and_compare(unit);
            match unit.role {
                Role::Worker => {
                    let action = handle_worker(&mut ctx, unit, health_dropped, sink);
                    summary.record_worker(action);
                }
                Role::Warrior => {
                    let action = handle_warrior(
                        &mut ctx,
                        unit,
                        health_dropped,
                        &mut claims,
                        &mut self.guards,
                        sink,
                    );
                    summary.record_warrior(action);
                }
            }
        }

        tracing::debug!(?summary, claimed = claims.len(), "Tick complete");
        summary
    }

    /// Static environment the policy plays on.
    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Replace the environment; remembered unit state is kept.
    pub fn set_environment(&mut self, env: Environment) -> Result<()> {
        env.validate()?;
        self.economy = EconomyPlanner::for_environment(self.config.worker_ratio_threshold, &env);
        self.env = env;
        Ok(())
    }

    /// Policy constants.
    #[must_use]
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Previous-tick health memory.
    #[must_use]
    pub fn memory(&self) -> &MemoryTracker {
        &self.memory
    }

    /// Corner guard roster.
    #[must_use]
    pub fn guards(&self) -> &GuardRoster {
        &self.guards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Command, CommandBuffer};
    use crate::map::ObstacleMap;
    use crate::math::Vec2;
    use crate::snapshot::UnitSnapshot;

    fn env() -> Environment {
        Environment::new(ObstacleMap::open(50, 50), Vec2::new(4.0, 4.0), 100, 150).unwrap()
    }

    fn unit(id: u32, role: Role) -> UnitSnapshot {
        UnitSnapshot {
            id,
            role,
            health: 100,
            position: Vec2::new(20.0, 20.0),
            facing: 0.0,
            speed: Default::default(),
            rotation: Default::default(),
            weapon_ready: true,
            opponents_in_view: Vec::new(),
            resources_in_view: Vec::new(),
            projectiles_in_view: Vec::new(),
            navigation_path: vec![Vec2::new(21.0, 21.0)],
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = PolicyConfig::default().with_worker_ratio_threshold(2.0);
        assert!(TickPolicy::new(env(), config).is_err());
    }

    #[test]
    fn test_empty_snapshot_only_spawns() {
        let mut policy = TickPolicy::with_defaults(env()).unwrap();
        let mut sink = CommandBuffer::new();
        let state = GameState {
            tick: 0,
            resources: 100,
            units: Vec::new(),
        };
        let summary = policy.tick(&state, &mut sink);
        assert_eq!(summary.spawned, Some(Role::Worker));
        assert_eq!(sink.commands(), &[Command::Spawn { role: Role::Worker }]);
    }

    #[test]
    fn test_tick_updates_memory_and_roster() {
        let mut policy = TickPolicy::with_defaults(env()).unwrap();
        let mut sink = CommandBuffer::new();
        let state = GameState {
            tick: 1,
            resources: 0,
            units: vec![unit(1, Role::Worker), unit(2, Role::Warrior)],
        };
        let summary = policy.tick(&state, &mut sink);

        assert_eq!(policy.memory().len(), 2);
        assert_eq!(policy.guards().guards(), &[2]);
        assert_eq!(summary.guarding, 1);

        let next = GameState {
            tick: 2,
            resources: 0,
            units: vec![unit(1, Role::Worker)],
        };
        policy.tick(&next, &mut sink);
        assert_eq!(policy.memory().len(), 1);
        assert!(policy.guards().is_empty());
    }

    #[test]
    fn test_set_environment_keeps_memory() {
        let mut policy = TickPolicy::with_defaults(env()).unwrap();
        let mut sink = CommandBuffer::new();
        let state = GameState {
            tick: 1,
            resources: 0,
            units: vec![unit(1, Role::Worker)],
        };
        policy.tick(&state, &mut sink);

        let wider = Environment::new(ObstacleMap::open(80, 80), Vec2::new(70.0, 70.0), 50, 75);
        policy.set_environment(wider.unwrap()).unwrap();
        assert_eq!(policy.environment().width(), 80);
        assert_eq!(policy.memory().last_health(1), Some(100));

        let mut off_map = env();
        off_map.spawn_point = Vec2::new(500.0, 1.0);
        assert!(policy.set_environment(off_map).is_err());
        assert_eq!(policy.environment().width(), 80);
    }

    #[test]
    fn test_same_seed_same_commands() {
        let state = GameState {
            tick: 3,
            resources: 500,
            units: vec![
                UnitSnapshot {
                    navigation_path: Vec::new(),
                    ..unit(1, Role::Worker)
                },
                unit(2, Role::Warrior),
            ],
        };
        let run = || {
            let mut policy = TickPolicy::with_defaults(env()).unwrap();
            let mut sink = CommandBuffer::new();
            policy.tick(&state, &mut sink);
            sink.drain()
        };
        assert_eq!(run(), run());
    }
}
