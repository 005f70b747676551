//! rc_control holds the interfaces the controller drives its peripherals through, along with
//! `embedded-hal` implementations for the common hobby parts.
//!
//! The controller only needs the traits. The implementations borrow their PWM channels,
//! so several actuators can share one PWM slice:
//!
//! ``` no-test
//! let mut steering = PulseServo::new(&mut servo_pwm.channel_a, 50.Hz())?;
//! let mut elevation = PulseServo::new(&mut servo_pwm.channel_b, 50.Hz())?;
//! ```

pub mod hbridge;
pub mod servo;
pub mod traits;

pub use hbridge::HBridge;
pub use servo::PulseServo;
pub use traits::{DriveMotor, Link, Servo};
