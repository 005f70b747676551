//! Hobby servos positioned by pulse width.

use embedded_hal::PwmPin;
use embedded_time::duration::Microseconds;
use embedded_time::rate::{Hertz, Rate};

use crate::config::{SERVO_MAX_PULSE_US, SERVO_MIN_PULSE_US};
use crate::error::Error;
use crate::rc_control::traits::Servo;

// Notes:
// Each cycle is 20ms at 50hz.
// 1ms pulse is 0 degrees, 2ms is 180.

/// A servo on a PWM channel, where the pulse width within each period sets the angle.
pub struct PulseServo<'a> {
    chan: &'a mut dyn PwmPin<Duty = u16>,
    max_duty: u16,
    period: Microseconds<u32>,
}

impl<'a> PulseServo<'a> {
    /// Creates a new servo abstraction. The passed PWM channel should be running at `freq`.
    pub fn new(pwm: &'a mut dyn PwmPin<Duty = u16>, freq: impl Into<Hertz>) -> Result<Self, Error> {
        let freq = freq.into();
        // Valid frequency range for analog servos
        debug_assert!((40u32..=330u32).contains(&freq.0));

        let period: Microseconds<u32> = freq.to_duration()?;
        pwm.enable();

        Ok(PulseServo {
            max_duty: pwm.get_max_duty(),
            chan: pwm,
            period,
        })
    }

    /// Duty that holds the servo at `angle` degrees.
    pub fn duty_for(&self, angle: u8) -> u16 {
        let angle = u32::from(angle.min(180));
        let pulse = SERVO_MIN_PULSE_US + (SERVO_MAX_PULSE_US - SERVO_MIN_PULSE_US) * angle / 180;

        (pulse * u32::from(self.max_duty) / self.period.0) as u16
    }
}

impl<'a> Servo for PulseServo<'a> {
    fn set_angle(&mut self, angle: u8) {
        let duty = self.duty_for(angle);
        self.chan.set_duty(duty)
    }
}
