//! Maps commanded values onto actuator signals.
//!
//! All functions are total over their input types; values outside the legal
//! command ranges are clamped before mapping.

use crate::config::{DRIVE_RANGE, ELEVATION_ANGLE_RANGE, ELEVATION_RANGE, PWM_MAX, STEERING_ANGLE_RANGE, TURN_RANGE};
use crate::state::CommandSnapshot;
use crate::utils::{clamp_to, map_range};

/// Direction the drive motor spins in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotorCommand {
    pub direction: Direction,
    /// Speed in \[0,255\].
    pub pwm: u8,
}

impl MotorCommand {
    pub const STOP: MotorCommand = MotorCommand {
        direction: Direction::Stop,
        pwm: 0,
    };
}

/// Every output derived from one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorOutputs {
    pub motor: MotorCommand,
    pub steering_angle: u8,
    pub elevation_angle: u8,
}

impl From<CommandSnapshot> for ActuatorOutputs {
    fn from(snapshot: CommandSnapshot) -> Self {
        Self {
            motor: drive_to_motor(snapshot.drive),
            steering_angle: turn_to_servo_angle(snapshot.turn),
            elevation_angle: elevation_to_servo_angle(snapshot.elevation),
        }
    }
}

/// The sign of `drive` picks the direction, its magnitude the speed.
pub fn drive_to_motor(drive: i8) -> MotorCommand {
    let drive = clamp_to(i32::from(drive), &DRIVE_RANGE);
    let direction = match drive {
        d if d > 0 => Direction::Forward,
        d if d < 0 => Direction::Reverse,
        _ => return MotorCommand::STOP,
    };

    let pwm = map_range(drive.abs(), 0..=*DRIVE_RANGE.end(), 0..=i32::from(PWM_MAX));
    MotorCommand {
        direction,
        pwm: pwm as u8,
    }
}

/// Maps turn onto the steering servo, 0 being centred at 90 degrees.
pub fn turn_to_servo_angle(turn: i8) -> u8 {
    map_range(i32::from(turn), TURN_RANGE, STEERING_ANGLE_RANGE) as u8
}

/// Maps elevation onto the elevation servo, 0 at 0 degrees.
pub fn elevation_to_servo_angle(elevation: u8) -> u8 {
    map_range(i32::from(elevation), ELEVATION_RANGE, ELEVATION_ANGLE_RANGE) as u8
}
