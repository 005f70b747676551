//! The last known commanded values.

use crate::commands::PartialSnapshot;
use crate::config::{DRIVE_RANGE, ELEVATION_RANGE, TURN_RANGE};
use crate::utils::clamp_to;

/// The commanded actuator state.
///
/// Every field is kept within its legal range; the constructor clamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandSnapshot {
    /// Forward positive, backward negative, in \[-100,100\].
    pub drive: i8,
    /// Right positive, left negative, in \[-100,100\].
    pub turn: i8,
    /// Height or thrust, in \[0,100\].
    pub elevation: u8,
}

impl CommandSnapshot {
    pub fn new(drive: i32, turn: i32, elevation: i32) -> Self {
        Self {
            drive: clamp_to(drive, &DRIVE_RANGE) as i8,
            turn: clamp_to(turn, &TURN_RANGE) as i8,
            elevation: clamp_to(elevation, &ELEVATION_RANGE) as u8,
        }
    }

    /// Centred and stopped.
    pub const fn neutral() -> Self {
        Self {
            drive: 0,
            turn: 0,
            elevation: 0,
        }
    }

    pub fn is_neutral(&self) -> bool {
        *self == Self::neutral()
    }

    /// Returns this snapshot with every present field of `partial` applied.
    pub fn with(self, partial: &PartialSnapshot) -> Self {
        Self {
            drive: partial.drive.unwrap_or(self.drive),
            turn: partial.turn.unwrap_or(self.turn),
            elevation: partial.elevation.unwrap_or(self.elevation),
        }
    }
}

/// The single authoritative snapshot, owned by the control loop.
#[derive(Debug, Default)]
pub struct ControlState {
    current: CommandSnapshot,
}

impl ControlState {
    pub fn new() -> Self {
        Self {
            current: CommandSnapshot::neutral(),
        }
    }

    pub fn snapshot(&self) -> CommandSnapshot {
        self.current
    }

    /// Applies the present fields of `partial`, keeping the rest.
    ///
    /// Returns whether any value actually changed, along with the new snapshot.
    pub fn merge(&mut self, partial: &PartialSnapshot) -> (bool, CommandSnapshot) {
        let next = self.current.with(partial);
        let changed = next != self.current;
        self.current = next;
        (changed, next)
    }

    /// Zeroes drive and turn. Elevation is left as is so height can come down
    /// under its own control rather than dropping.
    pub fn force_safe(&mut self) -> CommandSnapshot {
        self.current.drive = 0;
        self.current.turn = 0;
        self.current
    }
}
