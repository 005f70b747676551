//! Compile time tunables for the controller.

use core::ops::RangeInclusive;

use embedded_time::duration::Milliseconds;
use embedded_time::rate::Hertz;

/// Legal range of the drive field, forward positive.
pub const DRIVE_RANGE: RangeInclusive<i32> = -100..=100;
/// Legal range of the turn field, right positive.
pub const TURN_RANGE: RangeInclusive<i32> = -100..=100;
/// Legal range of the elevation field.
pub const ELEVATION_RANGE: RangeInclusive<i32> = 0..=100;

/// Size of the receive buffer, one slot of which is reserved for the terminator.
pub const COMMAND_BUFFER_SIZE: usize = 20;
/// Maximum number of bytes kept for a single command line.
pub const LINE_CAPACITY: usize = COMMAND_BUFFER_SIZE - 1;
pub const LINE_TERMINATOR: u8 = b'\n';
pub const FIELD_SEPARATOR: u8 = b',';

/// Time without an applied command before the vehicle is forced safe.
pub const COMMAND_TIMEOUT: Milliseconds<u32> = Milliseconds(1000);

pub const BAUD_RATE: u32 = 115_200;

/// Steering servo travel in degrees. 90 is straight ahead.
pub const STEERING_ANGLE_RANGE: RangeInclusive<i32> = 45..=135;
pub const ELEVATION_ANGLE_RANGE: RangeInclusive<i32> = 0..=180;
/// Full scale of the drive motor PWM value.
pub const PWM_MAX: u8 = 255;

// Hobby servo pulse limits
pub const SERVO_MIN_PULSE_US: u32 = 1000;
pub const SERVO_MAX_PULSE_US: u32 = 2000;
pub const SERVO_FREQUENCY: Hertz<u32> = Hertz(50);

pub const BANNER: &str = "RC link controller ready";
pub const TIMEOUT_NOTICE: &str = "Control timeout - stopping";
pub const ACK_PREFIX: &str = "ACK:";
