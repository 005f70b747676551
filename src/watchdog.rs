//! Fail-stop on link loss.

use embedded_time::duration::Milliseconds;
use embedded_time::{Clock, Instant};
use log::{debug, info};

use crate::config::COMMAND_TIMEOUT;
use crate::error::Error;
use crate::state::{CommandSnapshot, ControlState};

/// Whether commands are arriving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// A command was applied within the timeout window.
    Active,
    /// The window has passed without a command. Cleared by the next applied command.
    Timeout,
}

/// Tracks the time since the last applied command and forces the vehicle
/// safe, once per episode, when the link goes quiet.
pub struct SafetyWatchdog<C: Clock> {
    state: LinkState,
    last_update: Instant<C>,
    window: Milliseconds<u32>,
}

impl<C: Clock<T = u32>> SafetyWatchdog<C> {
    /// Creates an active watchdog with the default window, counting from `now`.
    pub fn new(now: Instant<C>) -> Self {
        Self::with_window(now, COMMAND_TIMEOUT)
    }

    pub fn with_window(now: Instant<C>, window: Milliseconds<u32>) -> Self {
        Self {
            state: LinkState::Active,
            last_update: now,
            window,
        }
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Records a command applied at `now`.
    pub fn feed(&mut self, now: Instant<C>) {
        if self.state == LinkState::Timeout {
            info!("link restored");
        }
        self.state = LinkState::Active;
        self.last_update = now;
    }

    /// Time since the last applied command. An instant before it counts as no time.
    pub fn elapsed(&self, now: &Instant<C>) -> Result<Milliseconds<u32>, Error> {
        match now.checked_duration_since(&self.last_update) {
            Some(elapsed) => Ok(Milliseconds::<u32>::try_from(elapsed)?),
            None => Ok(Milliseconds(0)),
        }
    }

    /// Moves to [`LinkState::Timeout`] once the window has passed.
    ///
    /// On that transition, a non-neutral `control` is forced safe and the forced
    /// snapshot is returned. Returns `None` on every other call, including
    /// further calls while still timed out.
    pub fn check(
        &mut self,
        now: &Instant<C>,
        control: &mut ControlState,
    ) -> Result<Option<CommandSnapshot>, Error> {
        if self.state == LinkState::Timeout {
            return Ok(None);
        }

        let elapsed = self.elapsed(now)?;
        if elapsed.0 <= self.window.0 {
            return Ok(None);
        }

        self.state = LinkState::Timeout;
        if control.snapshot().is_neutral() {
            debug!("link quiet for {} ms, already neutral", elapsed.0);
            return Ok(None);
        }

        info!("link quiet for {} ms, forcing safe state", elapsed.0);
        Ok(Some(control.force_safe()))
    }
}
