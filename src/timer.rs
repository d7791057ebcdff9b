use crate::scheduler::{Scheduler, TaskHandle};
use std::time::Duration;

pub const QUESTION_SECONDS: u32 = 30;
const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// What a fired tick meant for the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Seconds left after the decrement, for the timer text
    Tick(u32),
    /// The countdown hit zero; reported once per chain
    Timeout,
}

/// Per-question countdown driven by scheduler ticks.
///
/// At most one tick chain exists per timer. `start` on a running timer only
/// rewinds the seconds; the chain already in the scheduler keeps going.
#[derive(Debug)]
pub struct CountdownTimer {
    seconds_left: u32,
    running: bool,
    pending: Option<TaskHandle>,
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self {
            seconds_left: QUESTION_SECONDS,
            running: false,
            pending: None,
        }
    }

    pub fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Rewind to 30 seconds, opening a tick chain if none is active.
    ///
    /// A new chain ticks immediately, so 29 shows at once and the timeout
    /// lands 30 seconds after start. Returns true when a chain was opened.
    pub fn start<T>(&mut self, scheduler: &mut Scheduler<T>, tick: T) -> bool {
        self.seconds_left = QUESTION_SECONDS;
        if self.running {
            return false;
        }
        self.running = true;
        self.pending = Some(scheduler.schedule(Duration::ZERO, tick));
        log::debug!("countdown chain opened at {:?}", scheduler.now());
        true
    }

    /// Handle a fired tick task. Returns `None` for a tick that outlived `stop`.
    pub fn tick<T>(&mut self, scheduler: &mut Scheduler<T>, tick: T) -> Option<TimerEvent> {
        if !self.running {
            return None;
        }
        if self.seconds_left > 0 {
            self.seconds_left -= 1;
            self.pending = Some(scheduler.schedule(TICK_INTERVAL, tick));
            Some(TimerEvent::Tick(self.seconds_left))
        } else {
            self.running = false;
            self.pending = None;
            Some(TimerEvent::Timeout)
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
        if let Some(handle) = self.pending.take() {
            handle.cancel();
        }
    }

    /// Stop and rewind, leaving the timer as if newly built
    pub fn reset(&mut self) {
        self.stop();
        self.seconds_left = QUESTION_SECONDS;
    }

    pub fn timer_text(&self) -> String {
        format!("Time Left: {}", self.seconds_left)
    }
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}
