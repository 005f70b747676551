//! A link-loss safe actuator controller for RC vehicles.
//!
//! Commands arrive as text lines over a serial link (`F100,R-050,H075`) and are turned
//! into drive motor, steering and elevation outputs. If no command is applied for
//! [`config::COMMAND_TIMEOUT`] the vehicle is forced to stop and centre its steering,
//! while elevation is left where it was.
//!
//! Data flows leaf first:
//!
//! [`line`] splits the byte stream into lines, [`commands`] parses a line into a partial
//! update, [`state`] merges it into the current snapshot, [`mapping`] turns the snapshot
//! into actuator signals and [`watchdog`] forces the safe state when the link goes quiet.
//! [`ControlLoop`] runs all of it against the peripherals in [`rc_control`].

#![cfg_attr(not(test), no_std)]

pub mod commands;
pub mod config;
pub mod control_loop;
pub mod error;
pub mod line;
pub mod mapping;
pub mod rc_control;
pub mod state;
pub mod utils;
pub mod watchdog;

pub use commands::{parse, FieldCode, PartialSnapshot};
pub use control_loop::ControlLoop;
pub use error::Error;
pub use line::LineAssembler;
pub use mapping::{ActuatorOutputs, Direction, MotorCommand};
pub use state::{CommandSnapshot, ControlState};
pub use watchdog::{LinkState, SafetyWatchdog};
