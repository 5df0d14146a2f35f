use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};
use tracing::trace;

/// One tick of the session clock.
pub const SESSION_TICK: Duration = Duration::from_secs(1);

/// Unified event type consumed by the app runner
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypingEvent {
    Key(KeyEvent),
    Resize,
    /// Clock tick for the session with this generation.
    Tick { generation: u64 },
    /// Nothing arrived within the runner's interval.
    Redraw,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<TypingEvent, RecvTimeoutError>;
}

/// Production event source using crossterm.
///
/// Keystrokes and clock ticks share one channel so the loop sees them in a
/// single total order.
pub struct CrosstermEventSource {
    tx: Sender<TypingEvent>,
    rx: Receiver<TypingEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let reader_tx = tx.clone();

        thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(CtEvent::Key(key)) => TypingEvent::Key(key),
                Ok(CtEvent::Resize(_, _)) => TypingEvent::Resize,
                Ok(_) => continue,
                Err(_) => break,
            };
            if reader_tx.send(evt).is_err() {
                break;
            }
        });

        Self { tx, rx }
    }

    /// Handle for producers that feed the same queue, e.g. a [`TickTimer`].
    pub fn sender(&self) -> Sender<TypingEvent> {
        self.tx.clone()
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TypingEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
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

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<TypingEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<TypingEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TypingEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event at a time
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

    /// Blocks up to the ticker interval and returns the next event, or Redraw on timeout
    pub fn step(&self) -> TypingEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                TypingEvent::Redraw
            }
        }
    }
}

/// Owned periodic timer feeding `Tick` events into the event queue.
///
/// Ticks fire on fixed deadlines from the moment of creation. The timer stops
/// when cancelled or dropped; the worker thread is woken and joined, so no
/// tick is sent after `cancel` returns.
#[derive(Debug)]
pub struct TickTimer {
    generation: u64,
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TickTimer {
    pub fn start(tx: Sender<TypingEvent>, interval: Duration, generation: u64) -> Self {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            let started = Instant::now();
            let mut fired: u32 = 0;
            loop {
                let deadline = started + interval * (fired + 1);
                let wait = deadline.saturating_duration_since(Instant::now());
                match stop_rx.recv_timeout(wait) {
                    Err(RecvTimeoutError::Timeout) => {
                        fired += 1;
                        if tx.send(TypingEvent::Tick { generation }).is_err() {
                            break;
                        }
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });

        trace!(generation, ?interval, "tick timer acquired");

        Self {
            generation,
            stop: Some(stop_tx),
            handle: Some(handle),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cancel(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // dropping the sender wakes the worker
        self.stop.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            trace!(generation = self.generation, "tick timer released");
        }
    }
}

impl Drop for TickTimer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
