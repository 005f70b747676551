//! The cooperative loop tying the link, the command state and the actuators together.

use core::fmt::Write;

use embedded_time::{Clock, Instant};
use log::{debug, info, trace, warn};

use crate::commands;
use crate::config::{ACK_PREFIX, BANNER, TIMEOUT_NOTICE};
use crate::error::Error;
use crate::line::LineAssembler;
use crate::mapping::ActuatorOutputs;
use crate::rc_control::{DriveMotor, Link, Servo};
use crate::state::{CommandSnapshot, ControlState};
use crate::watchdog::{LinkState, SafetyWatchdog};

/// Fits the longest acknowledgement, `ACK:-100,-100,100`.
pub const ACK_CAPACITY: usize = 24;

/// Polls the link, applies commands in arrival order and enforces the link-loss timeout.
///
/// Single threaded by construction: the loop owns the control state and is the only writer.
pub struct ControlLoop<M, S, E, L, C: Clock> {
    motor: M,
    steering: S,
    elevation: E,
    link: L,
    clock: C,
    assembler: LineAssembler,
    state: ControlState,
    watchdog: SafetyWatchdog<C>,
}

impl<M, S, E, L, C> ControlLoop<M, S, E, L, C>
where
    M: DriveMotor,
    S: Servo,
    E: Servo,
    L: Link,
    C: Clock<T = u32>,
{
    pub fn new(motor: M, steering: S, elevation: E, link: L, clock: C) -> Result<Self, Error> {
        let watchdog = SafetyWatchdog::new(clock.try_now()?);

        Ok(Self {
            motor,
            steering,
            elevation,
            link,
            clock,
            assembler: LineAssembler::new(),
            state: ControlState::new(),
            watchdog,
        })
    }

    /// Announces the controller and puts every actuator in its neutral position.
    pub fn start(&mut self) -> Result<(), Error> {
        info!("{}", BANNER);
        self.link.write_line(BANNER);

        self.write_outputs(self.state.snapshot());
        self.watchdog.feed(self.clock.try_now()?);
        Ok(())
    }

    /// Runs one iteration: drains the link, then checks the watchdog.
    ///
    /// The clock is read before any byte is taken off the link, so a clock error
    /// leaves received commands queued for the next iteration.
    pub fn poll(&mut self) -> Result<(), Error> {
        let now = self.clock.try_now()?;

        while let Some(byte) = self.link.read_byte() {
            if let Some(line) = self.assembler.feed(byte) {
                self.handle_line(&line, now);
            }
        }

        if let Some(safe) = self.watchdog.check(&now, &mut self.state)? {
            self.write_outputs(safe);
            self.link.write_line(TIMEOUT_NOTICE);
        }
        Ok(())
    }

    /// Polls forever. Clock errors are logged and the next iteration goes ahead.
    pub fn run(&mut self) -> ! {
        loop {
            if let Err(error) = self.poll() {
                warn!("control loop iteration failed: {:?}", error);
            }
        }
    }

    pub fn snapshot(&self) -> CommandSnapshot {
        self.state.snapshot()
    }

    pub fn link_state(&self) -> LinkState {
        self.watchdog.state()
    }

    /// Applies one line. Only a line that changes the snapshot counts as a
    /// command for the watchdog.
    fn handle_line(&mut self, line: &[u8], now: Instant<C>) {
        let partial = commands::parse(line);
        if partial.is_empty() {
            trace!("ignoring line without fields ({} bytes)", line.len());
            return;
        }

        let (changed, snapshot) = self.state.merge(&partial);
        if !changed {
            trace!("unchanged command {:?}", snapshot);
            return;
        }

        self.watchdog.feed(now);
        self.write_outputs(snapshot);
        self.link.write_line(&format_ack(&snapshot));
    }

    fn write_outputs(&mut self, snapshot: CommandSnapshot) {
        let outputs = ActuatorOutputs::from(snapshot);
        debug!("applying {:?} as {:?}", snapshot, outputs);

        self.motor.set_motor(outputs.motor.direction, outputs.motor.pwm);
        self.steering.set_angle(outputs.steering_angle);
        self.elevation.set_angle(outputs.elevation_angle);
    }
}

/// Formats the acknowledgement sent after a change, `ACK:<drive>,<turn>,<elevation>`.
pub fn format_ack(snapshot: &CommandSnapshot) -> heapless::String<ACK_CAPACITY> {
    let mut ack = heapless::String::new();
    // Cannot overflow, see ACK_CAPACITY
    let _ = write!(
        ack,
        "{}{},{},{}",
        ACK_PREFIX, snapshot.drive, snapshot.turn, snapshot.elevation
    );
    ack
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ack_format() {
        let ack = format_ack(&CommandSnapshot::new(100, -50, 75));
        assert_eq!(ack.as_str(), "ACK:100,-50,75");
    }

    #[test]
    fn longest_ack_fits() {
        let ack = format_ack(&CommandSnapshot::new(-100, -100, 100));
        assert_eq!(ack.as_str(), "ACK:-100,-100,100");
    }
}
