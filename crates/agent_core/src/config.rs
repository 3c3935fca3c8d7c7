//! Tunable policy constants.
//!
//! Configs are plain RON. Every field has a default, so a file only needs to
//! name what it changes:
//!
//! ```ron
//! (worker_ratio_threshold: 0.6, seed: 42)
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AgentError, Result};

/// Constants that shape the policy's decisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Spawn workers while `workers / units` is below this.
    pub worker_ratio_threshold: f32,
    /// Maximum concurrent corner guards.
    pub max_guards: usize,
    /// Guards farther than this from their corner walk back.
    pub guard_post_distance: f32,
    /// Maximum random inset (cells) of a guard's post from the exact corner.
    pub guard_post_jitter: u32,
    /// A guard within this many degrees of its watch corner holds still.
    pub guard_facing_tolerance: f32,
    /// A warrior within this many degrees of its target fires.
    pub aim_tolerance: f32,
    /// A worker flees from warriors facing it within this many degrees.
    pub threat_cone: f32,
    /// A warrior whose target faces it within this many degrees turns slowly.
    pub exposed_cone: f32,
    /// Own units within this many degrees of the line of fire block a shot.
    pub friendly_fire_cone: f32,
    /// Escort offset (cells) from the followed worker on each axis.
    pub follow_offset: f32,
    /// Draws before a random passable-cell search gives up.
    pub max_search_attempts: u32,
    /// Seed for the policy's random source.
    pub seed: u64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            worker_ratio_threshold: 0.5,
            max_guards: 2,
            guard_post_distance: 6.0,
            guard_post_jitter: 4,
            guard_facing_tolerance: 10.0,
            aim_tolerance: 5.0,
            threat_cone: 15.0,
            exposed_cone: 15.0,
            friendly_fire_cone: 5.0,
            follow_offset: 3.0,
            max_search_attempts: 300,
            seed: 0x5EED,
        }
    }
}

impl PolicyConfig {
    /// Load a config from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AgentError::ConfigNotFound(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Load from a RON string.
    pub fn from_ron_str(ron: &str) -> Result<Self> {
        let config: PolicyConfig = ron::from_str(ron)?;
        config.validate()?;
        Ok(config)
    }

    /// Pretty RON for the current values.
    pub fn to_ron_string(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| AgentError::InvalidConfig(e.to_string()))
    }

    /// Replace the seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the worker ratio threshold.
    #[must_use]
    pub fn with_worker_ratio_threshold(mut self, threshold: f32) -> Self {
        self.worker_ratio_threshold = threshold;
        self
    }

    /// Reject values the policy cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.worker_ratio_threshold) {
            return Err(AgentError::InvalidConfig(format!(
                "worker_ratio_threshold must be within [0, 1], got {}",
                self.worker_ratio_threshold
            )));
        }
        if self.max_search_attempts == 0 {
            return Err(AgentError::InvalidConfig(
                "max_search_attempts must be at least 1".to_string(),
            ));
        }
        let angles = [
            ("guard_facing_tolerance", self.guard_facing_tolerance),
            ("aim_tolerance", self.aim_tolerance),
            ("threat_cone", self.threat_cone),
            ("exposed_cone", self.exposed_cone),
            ("friendly_fire_cone", self.friendly_fire_cone),
        ];
        for (name, value) in angles {
            if !(0.0..=180.0).contains(&value) {
                return Err(AgentError::InvalidConfig(format!(
                    "{name} must be within [0, 180] degrees, got {value}"
                )));
            }
        }
        Ok(())
    }
}
