//! The peripherals the controller drives.
//!
//! These are fire-and-forget: implementations deal with (or log) their own failures.

use crate::mapping::Direction;

/// A drive motor with direction control and PWM speed.
pub trait DriveMotor {
    /// Spins the motor in `direction` at `pwm` out of 255.
    fn set_motor(&mut self, direction: Direction, pwm: u8);

    /// Stops the motor.
    fn stop(&mut self) {
        self.set_motor(Direction::Stop, 0)
    }
}

/// A positional servo.
pub trait Servo {
    /// Moves the servo to `angle` degrees, in \[0,180\].
    fn set_angle(&mut self, angle: u8);
}

/// The character stream to the remote controller.
pub trait Link {
    /// Returns the next received byte, without waiting for one.
    fn read_byte(&mut self) -> Option<u8>;

    /// Sends `line` followed by a newline.
    fn write_line(&mut self, line: &str);
}

impl<T> DriveMotor for &mut T
where
    T: DriveMotor + ?Sized,
{
    fn set_motor(&mut self, direction: Direction, pwm: u8) {
        (**self).set_motor(direction, pwm)
    }
}

impl<T> Servo for &mut T
where
    T: Servo + ?Sized,
{
    fn set_angle(&mut self, angle: u8) {
        (**self).set_angle(angle)
    }
}

impl<T> Link for &mut T
where
    T: Link + ?Sized,
{
    fn read_byte(&mut self) -> Option<u8> {
        (**self).read_byte()
    }

    fn write_line(&mut self, line: &str) {
        (**self).write_line(line)
    }
}
