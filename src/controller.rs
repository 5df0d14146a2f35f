use std::sync::mpsc::Sender;
use std::time::Duration;

use tracing::{debug, info};

use crate::language::WordSource;
use crate::runtime::{TickTimer, TypingEvent, SESSION_TICK};
use crate::session::{Judgement, Phase, Session, SessionConfig};
use crate::view::View;

/// Drives one [`Session`] at a time and owns its clock.
///
/// The tick timer exists exactly while the session is active. Every new
/// session gets a fresh generation number; ticks tagged with an older
/// generation are dropped.
pub struct Controller<S: WordSource> {
    source: S,
    config: SessionConfig,
    session: Session,
    generation: u64,
    ticks: Sender<TypingEvent>,
    tick_interval: Duration,
    timer: Option<TickTimer>,
}

impl<S: WordSource> Controller<S> {
    pub fn new(source: S, config: SessionConfig, ticks: Sender<TypingEvent>) -> Self {
        Self::with_tick_interval(source, config, ticks, SESSION_TICK)
    }

    /// Like [`Controller::new`] with a custom wall-clock length for one tick.
    pub fn with_tick_interval(
        mut source: S,
        config: SessionConfig,
        ticks: Sender<TypingEvent>,
        tick_interval: Duration,
    ) -> Self {
        let session = Session::new(source.generate(), config);
        Self {
            source,
            config,
            session,
            generation: 0,
            ticks,
            tick_interval,
            timer: None,
        }
    }

    /// The input field now holds `text`.
    pub fn text_changed(&mut self, text: &str) -> Option<Judgement> {
        let was_idle = self.session.phase() == Phase::Idle;
        let judgement = self.session.text_changed(text);

        if was_idle && self.session.phase() == Phase::Active {
            info!(generation = self.generation, "session started");
            self.timer = Some(TickTimer::start(
                self.ticks.clone(),
                self.tick_interval,
                self.generation,
            ));
        }

        judgement
    }

    /// Apply a clock tick. Returns false when the tick was ignored.
    pub fn on_tick(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.timer.is_none() {
            debug!(generation, current = self.generation, "stale tick ignored");
            return false;
        }

        if self.session.tick() {
            self.release_timer();
            if let Some(results) = self.session.results() {
                info!(
                    generation = self.generation,
                    wpm = results.wpm,
                    accuracy = %results.accuracy_display(),
                    correct = results.correct_words,
                    incorrect = results.incorrect_words,
                    "session expired"
                );
            }
        }
        true
    }

    /// Throw the current session away and start over with a new word list.
    pub fn retry(&mut self) {
        let previous = self.session.phase();
        self.release_timer();
        self.generation += 1;
        self.session = Session::new(self.source.generate(), self.config);
        info!(generation = self.generation, %previous, "session reset");
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn view(&self) -> View<'_> {
        self.session.view()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer.is_some()
    }

    fn release_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
    }
}
