//! Outbound commands.
//!
//! The policy never talks to the game directly. Everything it decides goes
//! through [`ActionSink`], which the transport implements. [`CommandBuffer`]
//! is the in-memory sink used by the headless driver and the tests.

use serde::{Deserialize, Serialize};

use crate::snapshot::{Role, UnitId};

/// Rotation command, also reported back as rotation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rotation {
    /// Not rotating.
    #[default]
    None,
    /// Counter-clockwise.
    Left,
    /// Clockwise.
    Right,
    /// Counter-clockwise, fine adjustment.
    SlowLeft,
    /// Clockwise, fine adjustment.
    SlowRight,
}

/// A single command issued for the current tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Command {
    /// Spawn a new unit at the faction's spawn point.
    Spawn {
        /// Role of the new unit.
        role: Role,
    },
    /// Start navigating to a position.
    NavigateTo {
        /// Unit to move.
        unit: UnitId,
        /// Destination x.
        x: f32,
        /// Destination y.
        y: f32,
        /// Overrides whatever the unit was doing.
        #[serde(default)]
        flee: bool,
    },
    /// Abort the active navigation.
    StopNavigation {
        /// Unit to halt.
        unit: UnitId,
    },
    /// Start or stop rotating.
    SetRotation {
        /// Unit to turn.
        unit: UnitId,
        /// Direction and speed, `None` to stop.
        rotation: Rotation,
    },
    /// Fire the weapon.
    Shoot {
        /// Unit that fires.
        unit: UnitId,
    },
    /// Show a speech bubble.
    Say {
        /// Speaking unit.
        unit: UnitId,
        /// Bubble text.
        text: String,
    },
}

impl Command {
    /// Unit the command addresses, `None` for spawns.
    #[must_use]
    pub const fn unit(&self) -> Option<UnitId> {
        match self {
            Self::Spawn { .. } => None,
            Self::NavigateTo { unit, .. }
            | Self::StopNavigation { unit }
            | Self::SetRotation { unit, .. }
            | Self::Shoot { unit }
            | Self::Say { unit, .. } => Some(*unit),
        }
    }

    /// Short name of the command kind, used for logging and summaries.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Spawn { .. } => "spawn",
            Self::NavigateTo { .. } => "navigate_to",
            Self::StopNavigation { .. } => "stop_navigation",
            Self::SetRotation { .. } => "set_rotation",
            Self::Shoot { .. } => "shoot",
            Self::Say { .. } => "say",
        }
    }
}

/// Where the policy sends its decisions.
///
/// Implementations must accept every call; the policy has no way to react
/// to a rejected command within the same tick.
pub trait ActionSink {
    /// Queue a unit spawn.
    fn spawn_unit(&mut self, role: Role);

    /// Send a unit somewhere. `flee` marks the order as an override.
    fn navigate_to(&mut self, unit: UnitId, x: f32, y: f32, flee: bool);

    /// Abort a unit's navigation.
    fn stop_navigation(&mut self, unit: UnitId);

    /// Set a unit's rotation.
    fn set_rotation(&mut self, unit: UnitId, rotation: Rotation);

    /// Fire a unit's weapon.
    fn shoot(&mut self, unit: UnitId);

    /// Cosmetic speech bubble.
    fn say(&mut self, unit: UnitId, text: &str);
}

/// Records every command in issue order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandBuffer {
    commands: Vec<Command>,
}

impl CommandBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded so far.
    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Commands addressed to one unit.
    pub fn for_unit(&self, unit: UnitId) -> impl Iterator<Item = &Command> {
        self.commands.iter().filter(move |c| c.unit() == Some(unit))
    }

    /// Take the recorded commands, leaving the buffer empty.
    pub fn drain(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// Number of recorded commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl ActionSink for CommandBuffer {
    fn spawn_unit(&mut self, role: Role) {
        self.commands.push(Command::Spawn { role });
    }

    fn navigate_to(&mut self, unit: UnitId, x: f32, y: f32, flee: bool) {
        self.commands.push(Command::NavigateTo { unit, x, y, flee });
    }

    fn stop_navigation(&mut self, unit: UnitId) {
        self.commands.push(Command::StopNavigation { unit });
    }

    fn set_rotation(&mut self, unit: UnitId, rotation: Rotation) {
        self.commands.push(Command::SetRotation { unit, rotation });
    }

    fn shoot(&mut self, unit: UnitId) {
        self.commands.push(Command::Shoot { unit });
    }

    fn say(&mut self, unit: UnitId, text: &str) {
        self.commands.push(Command::Say {
            unit,
            text: text.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_records_in_order() {
        let mut buffer = CommandBuffer::new();
        buffer.spawn_unit(Role::Worker);
        buffer.stop_navigation(3);
        buffer.shoot(3);

        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.commands()[0], Command::Spawn { role: Role::Worker });
        assert_eq!(buffer.for_unit(3).count(), 2);
    }

    #[test]
    fn test_drain_empties_buffer() {
        let mut buffer = CommandBuffer::new();
        buffer.say(1, "hello");
        let drained = buffer.drain();
        assert_eq!(drained.len(), 1);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_command_unit_and_kind() {
        let cmd = Command::SetRotation {
            unit: 7,
            rotation: Rotation::SlowLeft,
        };
        assert_eq!(cmd.unit(), Some(7));
        assert_eq!(cmd.kind(), "set_rotation");
        assert_eq!(Command::Spawn { role: Role::Worker }.unit(), None);
    }
}
