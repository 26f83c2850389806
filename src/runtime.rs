use std::ops::ControlFlow;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

/// Everything the main loop reacts to
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizEvent {
    Key(KeyEvent),
    /// New terminal size as (columns, rows)
    Resize(u16, u16),
    /// No input arrived within one tick interval
    Tick,
}

pub trait EventSource: Send + 'static {
    /// Wait up to `timeout` for the next event.
    fn recv_timeout(&self, timeout: Duration) -> Result<QuizEvent, RecvTimeoutError>;
}

/// Reads the real terminal on a background thread.
///
/// The thread exits on its own once the receiving side is dropped and the
/// next event arrives.
pub struct CrosstermEventSource {
    rx: Receiver<QuizEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || loop {
            let event = match event::read() {
                // Windows reports releases and repeats as well
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => QuizEvent::Key(key),
                Ok(Event::Resize(cols, rows)) => QuizEvent::Resize(cols, rows),
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!("terminal event reader stopped: {}", e);
                    break;
                }
            };
            if tx.send(event).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<QuizEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Channel-fed source for driving the app without a terminal
pub struct TestEventSource {
    rx: Receiver<QuizEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<QuizEvent>) -> Self {
        Self { rx }
    }

    /// A source that yields `events` in order, then only ticks
    pub fn from_events(events: impl IntoIterator<Item = QuizEvent>) -> Self {
        let (tx, rx) = mpsc::channel();
        for event in events {
            // rx is alive, send cannot fail
            let _ = tx.send(event);
        }
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<QuizEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Next event, or `Tick` once the tick interval passes without one.
    /// A closed source only ticks.
    pub fn step(&self) -> QuizEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => QuizEvent::Tick,
        }
    }

    /// Feed events to `handle` until it breaks or fails
    pub fn run<B, Err>(
        &self,
        mut handle: impl FnMut(QuizEvent) -> Result<ControlFlow<B>, Err>,
    ) -> Result<B, Err> {
        loop {
            if let ControlFlow::Break(value) = handle(self.step())? {
                return Ok(value);
            }
        }
    }
}
