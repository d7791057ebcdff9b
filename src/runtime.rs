//! Terminal input and wall-clock time, folded into steps for the game loop.
//!
//! The game itself runs on a virtual clock. Every wake-up of the loop hands it
//! the time that passed since the previous wake-up, whether the loop woke for
//! a key press or because the tick interval ran out.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// One wake-up of the loop
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub event: GameEvent,
    /// Time since the previous step
    pub elapsed: Duration,
}

/// Map a raw terminal event to a game event, dropping what the game never reacts to.
///
/// Key releases are dropped: terminals reporting them would otherwise double every press.
pub fn translate(event: CtEvent) -> Option<GameEvent> {
    match event {
        CtEvent::Key(key) if key.kind != KeyEventKind::Release => Some(GameEvent::Key(key)),
        CtEvent::Resize(_, _) => Some(GameEvent::Resize),
        _ => None,
    }
}

pub trait GameEventSource: Send + 'static {
    /// Wait at most `timeout` for the next event
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError>;
}

/// Events delivered over a channel, either from the terminal reader thread or from a test
pub struct ChannelEventSource {
    rx: Receiver<GameEvent>,
}

impl ChannelEventSource {
    /// Spawn a thread that reads crossterm events until the receiver goes away
    pub fn terminal() -> Self {
        let (tx, source) = Self::pair();

        std::thread::spawn(move || loop {
            let raw = match event::read() {
                Ok(raw) => raw,
                Err(e) => {
                    log::warn!("terminal event reader stopped: {}", e);
                    break;
                }
            };
            if let Some(ev) = translate(raw) {
                if tx.send(ev).is_err() {
                    break;
                }
            }
        });

        source
    }

    /// A source fed by hand through the returned sender
    pub fn pair() -> (Sender<GameEvent>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self { rx })
    }
}

impl GameEventSource for ChannelEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Measures the time between loop wake-ups
pub trait Clock {
    /// Time since the previous lap, or since construction for the first one
    fn lap(&mut self) -> Duration;
}

#[derive(Debug)]
pub struct WallClock {
    last: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last);
        self.last = now;
        elapsed
    }
}

/// Every lap takes the same virtual time, so headless runs are reproducible
#[derive(Debug, Clone, Copy)]
pub struct SteppedClock {
    step: Duration,
}

impl SteppedClock {
    pub fn new(step: Duration) -> Self {
        Self { step }
    }
}

impl Clock for SteppedClock {
    fn lap(&mut self) -> Duration {
        self.step
    }
}

pub struct Runner<E: GameEventSource, C: Clock> {
    events: E,
    clock: C,
    tick_interval: Duration,
}

impl<E: GameEventSource, C: Clock> Runner<E, C> {
    pub fn new(events: E, clock: C, tick_interval: Duration) -> Self {
        Self {
            events,
            clock,
            tick_interval,
        }
    }

    /// Wait for the next event or, once the tick interval passes quietly, a Tick.
    ///
    /// A disconnected source also yields ticks so the game clock keeps running.
    pub fn step(&mut self) -> Step {
        let event = self
            .events
            .recv_timeout(self.tick_interval)
            .unwrap_or(GameEvent::Tick);
        Step {
            event,
            elapsed: self.clock.lap(),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }
}
