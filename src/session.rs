use tracing::debug;

use crate::metrics::Results;
use crate::view::View;

pub const DEFAULT_TIME_BUDGET_SECS: u32 = 60;
pub const DEFAULT_WORDS_PER_LINE: usize = 13;

/// A trailing separator ends the word being typed.
pub const WORD_SEPARATOR: char = ' ';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub time_budget_secs: u32,
    pub words_per_line: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            time_budget_secs: DEFAULT_TIME_BUDGET_SECS,
            words_per_line: DEFAULT_WORDS_PER_LINE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    /// Waiting for the first keystroke; the clock is not running.
    Idle,
    Active,
    /// Terminal. Input is disabled and results are available.
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

/// Judgement state of a single word in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordStatus {
    #[default]
    Unknown,
    Correct,
    Incorrect,
}

impl From<Outcome> for WordStatus {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Correct => WordStatus::Correct,
            Outcome::Incorrect => WordStatus::Incorrect,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Judgement {
    pub index: usize,
    pub outcome: Outcome,
}

/// One timed run over a word list.
///
/// Words are judged strictly in order, so the outcome of word `i` lives at
/// `outcomes[i]` and the cursor is always `outcomes.len()`. A retry builds a
/// new `Session`; nothing carries over.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    words: Vec<String>,
    outcomes: Vec<Outcome>,
    input: String,
    seconds_remaining: u32,
    correct_count: usize,
    phase: Phase,
}

impl Session {
    pub fn new(words: Vec<String>, config: SessionConfig) -> Self {
        let phase = if config.time_budget_secs == 0 {
            Phase::Expired
        } else {
            Phase::Idle
        };

        Self {
            config,
            words,
            outcomes: Vec::new(),
            input: String::new(),
            seconds_remaining: config.time_budget_secs,
            correct_count: 0,
            phase,
        }
    }

    /// Idle -> Active. Returns whether the transition happened.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Idle || self.is_exhausted() {
            return false;
        }
        self.phase = Phase::Active;
        debug!(words = self.words.len(), budget = self.config.time_budget_secs, "session started");
        true
    }

    /// Replace the input buffer with `text`, the full current contents of the
    /// input field. The first non-empty text starts the session; a trailing
    /// separator submits the word.
    pub fn text_changed(&mut self, text: &str) -> Option<Judgement> {
        if self.is_input_disabled() {
            return None;
        }

        if !text.is_empty() {
            self.start();
        }

        self.input.clear();
        self.input.push_str(text);

        if self.phase == Phase::Active && text.ends_with(WORD_SEPARATOR) {
            self.submit_word()
        } else {
            None
        }
    }

    /// Judge the buffer against the word under the cursor and advance.
    ///
    /// Comparison is exact and case-sensitive after trimming surrounding
    /// whitespace, so an empty submission counts as a miss. Nothing happens
    /// unless the session is active and words remain.
    pub fn submit_word(&mut self) -> Option<Judgement> {
        if self.phase != Phase::Active {
            return None;
        }

        let index = self.current_index();
        let expected = self.words.get(index)?;

        let outcome = if self.input.trim() == expected {
            self.correct_count += 1;
            Outcome::Correct
        } else {
            Outcome::Incorrect
        };

        debug!(index, expected = %expected, typed = %self.input.trim(), ?outcome, "word judged");

        self.outcomes.push(outcome);
        self.input.clear();

        Some(Judgement { index, outcome })
    }

    /// Advance the clock by one second. Returns true on the tick that expires
    /// the session.
    pub fn tick(&mut self) -> bool {
        if self.phase != Phase::Active || self.seconds_remaining == 0 {
            return false;
        }

        self.seconds_remaining -= 1;

        if self.seconds_remaining == 0 {
            self.phase = Phase::Expired;
            return true;
        }
        false
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn current_index(&self) -> usize {
        self.outcomes.len()
    }

    pub fn current_word(&self) -> Option<&str> {
        self.words.get(self.current_index()).map(String::as_str)
    }

    pub fn status_of(&self, index: usize) -> WordStatus {
        self.outcomes
            .get(index)
            .map(|&o| WordStatus::from(o))
            .unwrap_or_default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn total_judged(&self) -> usize {
        self.outcomes.len()
    }

    pub fn has_expired(&self) -> bool {
        self.phase == Phase::Expired
    }

    /// Every word has been judged. Judging stops here; the clock does not.
    pub fn is_exhausted(&self) -> bool {
        self.current_index() >= self.words.len()
    }

    pub fn is_input_disabled(&self) -> bool {
        self.has_expired() || self.is_exhausted()
    }

    /// Final statistics, available only once the clock has run out.
    pub fn results(&self) -> Option<Results> {
        self.has_expired().then(|| {
            Results::tally(
                self.correct_count,
                self.total_judged(),
                self.config.time_budget_secs,
            )
        })
    }

    pub fn view(&self) -> View<'_> {
        View::new(self)
    }
}
