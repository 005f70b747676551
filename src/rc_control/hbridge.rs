//! Drive motor behind an H-bridge driver (L298N and friends).

use embedded_hal::digital::v2::OutputPin;
use embedded_hal::PwmPin;
use log::warn;

use crate::config::PWM_MAX;
use crate::mapping::Direction;
use crate::rc_control::traits::DriveMotor;

// Notes:
// IN1/IN2 pick the direction, EN carries the speed.
// Both inputs low with EN at 0 lets the motor coast to a stop.

/// Allows for control over a brushed motor through an H-bridge.
pub struct HBridge<'a, A, B> {
    enable: &'a mut dyn PwmPin<Duty = u16>,
    max_duty: u16,
    dir_a: A,
    dir_b: B,
}

impl<'a, A, B> HBridge<'a, A, B>
where
    A: OutputPin,
    B: OutputPin,
{
    /// Creates a new abstraction over the bridge. `enable` should be on the pin wired to the
    /// bridge's enable input, `dir_a` and `dir_b` on its two direction inputs.
    ///
    /// The motor is stopped before this returns.
    pub fn new(enable: &'a mut dyn PwmPin<Duty = u16>, dir_a: A, dir_b: B) -> Self {
        enable.enable();
        let mut bridge = HBridge {
            max_duty: enable.get_max_duty(),
            enable,
            dir_a,
            dir_b,
        };
        bridge.stop();
        bridge
    }

    fn set_direction(&mut self, a: bool, b: bool) {
        if write_pin(&mut self.dir_a, a).is_err() || write_pin(&mut self.dir_b, b).is_err() {
            warn!("failed to set motor direction");
        }
    }
}

fn write_pin<P: OutputPin>(pin: &mut P, high: bool) -> Result<(), P::Error> {
    if high {
        pin.set_high()
    } else {
        pin.set_low()
    }
}

impl<'a, A, B> DriveMotor for HBridge<'a, A, B>
where
    A: OutputPin,
    B: OutputPin,
{
    fn set_motor(&mut self, direction: Direction, pwm: u8) {
        let pwm = match direction {
            Direction::Forward => {
                self.set_direction(true, false);
                pwm
            }
            Direction::Reverse => {
                self.set_direction(false, true);
                pwm
            }
            Direction::Stop => {
                self.set_direction(false, false);
                0
            }
        };

        let duty = u32::from(pwm) * u32::from(self.max_duty) / u32::from(PWM_MAX);
        self.enable.set_duty(duty as u16)
    }
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use super::*;

    #[derive(Default)]
    struct MockPwm {
        duty: u16,
        enabled: bool,
    }

    impl PwmPin for MockPwm {
        type Duty = u16;

        fn disable(&mut self) {
            self.enabled = false;
        }

        fn enable(&mut self) {
            self.enabled = true;
        }

        fn get_duty(&self) -> u16 {
            self.duty
        }

        fn get_max_duty(&self) -> u16 {
            1000
        }

        fn set_duty(&mut self, duty: u16) {
            self.duty = duty;
        }
    }

    #[derive(Default)]
    struct MockPin {
        high: bool,
    }

    impl OutputPin for MockPin {
        type Error = Infallible;

        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }
    }

    #[test]
    fn starts_stopped() {
        let mut pwm = MockPwm { duty: 700, enabled: false };
        let bridge = HBridge::new(&mut pwm, MockPin { high: true }, MockPin { high: true });

        assert!(!bridge.dir_a.high);
        assert!(!bridge.dir_b.high);
        drop(bridge);
        assert!(pwm.enabled);
        assert_eq!(pwm.duty, 0);
    }

    #[test]
    fn forward_and_reverse() {
        let mut pwm = MockPwm::default();
        let mut bridge = HBridge::new(&mut pwm, MockPin::default(), MockPin::default());

        bridge.set_motor(Direction::Forward, 255);
        assert!(bridge.dir_a.high && !bridge.dir_b.high);
        assert_eq!(bridge.enable.get_duty(), 1000);

        bridge.set_motor(Direction::Reverse, 51);
        assert!(!bridge.dir_a.high && bridge.dir_b.high);
        assert_eq!(bridge.enable.get_duty(), 200);
    }

    #[test]
    fn stop_ignores_pwm() {
        let mut pwm = MockPwm::default();
        let mut bridge = HBridge::new(&mut pwm, MockPin::default(), MockPin::default());

        bridge.set_motor(Direction::Forward, 128);
        bridge.set_motor(Direction::Stop, 128);
        assert!(!bridge.dir_a.high && !bridge.dir_b.high);
        assert_eq!(bridge.enable.get_duty(), 0);
    }
}
