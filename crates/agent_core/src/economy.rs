//! Spawn decisions.
//!
//! One decision per tick: a worker while the workforce is below the target
//! share and a worker is affordable, otherwise a warrior if affordable,
//! otherwise nothing.

use crate::commands::ActionSink;
use crate::map::Environment;
use crate::snapshot::{GameState, Role};

/// Decides which unit, if any, to spawn this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EconomyPlanner {
    worker_ratio_threshold: f32,
    worker_cost: u32,
    warrior_cost: u32,
}

impl EconomyPlanner {
    /// Create a planner with explicit prices.
    #[must_use]
    pub const fn new(worker_ratio_threshold: f32, worker_cost: u32, warrior_cost: u32) -> Self {
        Self {
            worker_ratio_threshold,
            worker_cost,
            warrior_cost,
        }
    }

    /// Create a planner using the environment's prices.
    #[must_use]
    pub const fn for_environment(worker_ratio_threshold: f32, env: &Environment) -> Self {
        Self::new(worker_ratio_threshold, env.worker_cost, env.warrior_cost)
    }

    /// Share of workers among all units. An empty faction has ratio 0.
    #[must_use]
    pub fn worker_ratio(workers: usize, total: usize) -> f32 {
        if total == 0 {
            0.0
        } else {
            workers as f32 / total as f32
        }
    }

    /// Pure decision over counts and balance.
    #[must_use]
    pub fn decide(&self, workers: usize, total: usize, balance: u32) -> Option<Role> {
        let ratio = Self::worker_ratio(workers, total);
        if ratio < self.worker_ratio_threshold && balance >= self.worker_cost {
            Some(Role::Worker)
        } else if balance >= self.warrior_cost {
            Some(Role::Warrior)
        } else {
            None
        }
    }

    /// Decide for a snapshot and issue the spawn, if any.
    pub fn plan(&self, state: &GameState, sink: &mut dyn ActionSink) -> Option<Role> {
        let workers = state.count_role(Role::Worker);
        let decision = self.decide(workers, state.units.len(), state.resources);
        if let Some(role) = decision {
            sink.spawn_unit(role);
            tracing::info!(
                tick = state.tick,
                ?role,
                workers,
                total = state.units.len(),
                balance = state.resources,
                "Spawning unit"
            );
        }
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Command, CommandBuffer};

    fn planner() -> EconomyPlanner {
        EconomyPlanner::new(0.5, 100, 150)
    }

    #[test]
    fn test_low_worker_ratio_spawns_worker() {
        assert_eq!(planner().decide(1, 4, 100), Some(Role::Worker));
    }

    #[test]
    fn test_balanced_ratio_spawns_warrior() {
        assert_eq!(planner().decide(2, 4, 150), Some(Role::Warrior));
    }

    #[test]
    fn test_cannot_afford_worker_falls_back_to_warrior_check() {
        assert_eq!(planner().decide(0, 4, 99), None);
        // Workers wanted but too dear, warrior still affordable
        let odd_prices = EconomyPlanner::new(0.5, 200, 150);
        assert_eq!(odd_prices.decide(0, 4, 160), Some(Role::Warrior));
    }

    #[test]
    fn test_empty_faction_counts_as_zero_ratio() {
        assert_eq!(EconomyPlanner::worker_ratio(0, 0), 0.0);
        assert_eq!(planner().decide(0, 0, 100), Some(Role::Worker));
    }

    #[test]
    fn test_insufficient_balance_spawns_nothing() {
        assert_eq!(planner().decide(3, 4, 10), None);
    }

    #[test]
    fn test_plan_emits_single_spawn() {
        let state = GameState {
            tick: 1,
            resources: 1000,
            units: Vec::new(),
        };
        let mut sink = CommandBuffer::new();
        let spawned = planner().plan(&state, &mut sink);

        assert_eq!(spawned, Some(Role::Worker));
        assert_eq!(sink.commands(), &[Command::Spawn { role: Role::Worker }]);
    }
}
