use std::ops::Range;

use itertools::Itertools;

use crate::metrics::Results;
use crate::session::{Phase, Session, WordStatus};

/// Indices of the words on screen: the line holding `current_index` and the
/// one after it, clipped to the list.
pub fn visible_range(current_index: usize, words_per_line: usize, len: usize) -> Range<usize> {
    let per_line = words_per_line.max(1);
    let start = (current_index / per_line) * per_line;
    let end = start.saturating_add(per_line * 2).min(len);
    start.min(len)..end
}

/// Read-only snapshot of a session for rendering.
#[derive(Debug, Clone)]
pub struct View<'a> {
    session: &'a Session,
    pub start_index: usize,
    pub visible_words: &'a [String],
    pub current_index: usize,
    pub seconds_remaining: u32,
    pub input: &'a str,
    pub input_disabled: bool,
    pub phase: Phase,
    pub results: Option<Results>,
}

impl<'a> View<'a> {
    pub fn new(session: &'a Session) -> Self {
        let range = visible_range(
            session.current_index(),
            session.config().words_per_line,
            session.words().len(),
        );

        Self {
            session,
            start_index: range.start,
            visible_words: &session.words()[range],
            current_index: session.current_index(),
            seconds_remaining: session.seconds_remaining(),
            input: session.input(),
            input_disabled: session.is_input_disabled(),
            phase: session.phase(),
            results: session.results(),
        }
    }

    pub fn status_of(&self, index: usize) -> WordStatus {
        self.session.status_of(index)
    }

    /// Visible words split into display lines, each word paired with its
    /// index in the full list.
    pub fn lines(&self) -> Vec<Vec<(usize, &'a str)>> {
        let per_line = self.session.config().words_per_line.max(1);
        let visible = self.visible_words;
        let start = self.start_index;

        let chunks = visible
            .iter()
            .enumerate()
            .map(|(offset, word)| (start + offset, word.as_str()))
            .chunks(per_line);

        chunks.into_iter().map(|line| line.collect()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionConfig;

    fn words(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("w{i}")).collect()
    }

    fn session_with(n: usize, words_per_line: usize) -> Session {
        Session::new(
            words(n),
            SessionConfig {
                time_budget_secs: 60,
                words_per_line,
            },
        )
    }

    fn submit(session: &mut Session, count: usize) {
        for _ in 0..count {
            session.text_changed("x ");
        }
    }

    #[test]
    fn test_visible_range_anchors_to_line() {
        assert_eq!(visible_range(0, 13, 100), 0..26);
        assert_eq!(visible_range(12, 13, 100), 0..26);
        assert_eq!(visible_range(13, 13, 100), 13..39);
        assert_eq!(visible_range(30, 13, 100), 26..52);
    }

    #[test]
    fn test_visible_range_clipped_to_list() {
        assert_eq!(visible_range(0, 13, 5), 0..5);
        assert_eq!(visible_range(90, 13, 100), 78..100);
        assert_eq!(visible_range(100, 10, 100), 100..100);
    }

    #[test]
    fn test_visible_range_zero_words_per_line() {
        assert_eq!(visible_range(3, 0, 10), 3..5);
    }

    #[test]
    fn test_visible_range_past_the_end() {
        assert_eq!(visible_range(27, 13, 20), 20..20);
    }

    #[test]
    fn test_view_of_fresh_session() {
        let s = session_with(30, 13);
        let view = s.view();

        assert_eq!(view.start_index, 0);
        assert_eq!(view.visible_words.len(), 26);
        assert_eq!(view.current_index, 0);
        assert_eq!(view.seconds_remaining, 60);
        assert_eq!(view.input, "");
        assert!(!view.input_disabled);
        assert_eq!(view.phase, Phase::Idle);
        assert!(view.results.is_none());
    }

    #[test]
    fn test_view_scrolls_by_line() {
        let mut s = session_with(30, 13);
        submit(&mut s, 13);
        let view = s.view();

        assert_eq!(view.start_index, 13);
        assert_eq!(view.visible_words, &s.words()[13..30]);
        assert_eq!(view.status_of(12), WordStatus::Incorrect);
        assert_eq!(view.status_of(13), WordStatus::Unknown);
    }

    #[test]
    fn test_lines_carry_global_indices() {
        let mut s = session_with(10, 3);
        submit(&mut s, 4);
        let lines = s.view().lines();

        assert_eq!(
            lines,
            vec![
                vec![(3, "w3"), (4, "w4"), (5, "w5")],
                vec![(6, "w6"), (7, "w7"), (8, "w8")],
            ]
        );
    }

    #[test]
    fn test_lines_partial_last_line() {
        let mut s = session_with(8, 3);
        submit(&mut s, 6);
        let lines = s.view().lines();

        assert_eq!(lines, vec![vec![(6, "w6"), (7, "w7")]]);
    }

    #[test]
    fn test_view_input_disabled_when_expired() {
        let mut s = session_with(5, 3);
        s.text_changed("w");
        for _ in 0..60 {
            s.tick();
        }
        let view = s.view();

        assert!(view.input_disabled);
        assert_eq!(view.phase, Phase::Expired);
        assert!(view.results.is_some());
    }
}
