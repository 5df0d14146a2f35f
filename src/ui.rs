use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use ticktype::{language::WordSource, session::WordStatus};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const RESULTS_LINES: u16 = 5;
const CURSOR: &str = "_";

impl<S: WordSource> Widget for &App<S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let view = self.controller.view();

        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
        let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
        let dim_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::DIM);
        let underlined_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::UNDERLINED);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let results_lines = if view.results.is_some() {
            RESULTS_LINES
        } else {
            0
        };
        let word_lines = view.lines();
        // each window line gets as many rows as it needs once wrapped
        let word_width = area.width.saturating_sub(2 * HORIZONTAL_MARGIN);
        let mut line_rows = [1u16; 2];
        for (rows, line) in line_rows.iter_mut().zip(&word_lines) {
            *rows = wrapped_rows(line.iter().map(|(_, word)| *word), word_width);
        }

        // timer, gap, word lines, gap, input, gap, results
        let content_height = 5 + line_rows[0] + line_rows[1] + results_lines;
        let padding = area.height.saturating_sub(content_height + 1) / 2;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Length(padding),
                Constraint::Length(1), // timer
                Constraint::Length(1),
                Constraint::Length(line_rows[0]), // words
                Constraint::Length(line_rows[1]),
                Constraint::Length(1),
                Constraint::Length(1), // input
                Constraint::Length(1),
                Constraint::Length(results_lines),
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(area);

        let timer = Paragraph::new(Span::styled(
            format!("Time Left: {}", view.seconds_remaining),
            dim_bold_style,
        ))
        .alignment(Alignment::Center);
        timer.render(chunks[1], buf);

        let lines = word_lines.into_iter().map(|line| {
            let spans: Vec<Span> = line
                .into_iter()
                .flat_map(|(idx, word)| {
                    let style = match view.status_of(idx) {
                        WordStatus::Correct => green_bold_style,
                        WordStatus::Incorrect => red_bold_style,
                        WordStatus::Unknown if idx == view.current_index => underlined_bold_style,
                        WordStatus::Unknown => dim_bold_style,
                    };
                    [Span::styled(word, style), Span::raw(" ")]
                })
                .collect();
            Line::from(spans)
        });

        for (line, chunk) in lines.zip([chunks[3], chunks[4]]) {
            Paragraph::new(line)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(chunk, buf);
        }

        let input_line = if view.input_disabled {
            Line::from(vec![
                Span::styled("> ", dim_bold_style),
                Span::styled(view.input.to_string(), dim_bold_style),
            ])
        } else {
            let room = (chunks[6].width as usize).saturating_sub(2 + CURSOR.width());
            Line::from(vec![
                Span::styled("> ", dim_bold_style),
                Span::styled(fit_tail(view.input, room).to_string(), bold_style),
                Span::styled(CURSOR, dim_bold_style),
            ])
        };
        Paragraph::new(input_line)
            .alignment(Alignment::Center)
            .render(chunks[6], buf);

        if let Some(results) = view.results {
            let results_widget = Paragraph::new(vec![
                Line::from(Span::styled("Results:", bold_style)),
                Line::from(format!("WPM: {}", results.wpm_display())),
                Line::from(format!("Accuracy: {}%", results.accuracy_display())),
                Line::from(Span::styled(
                    format!("Correct Words: {}", results.correct_words),
                    Style::default().fg(Color::Green),
                )),
                Line::from(Span::styled(
                    format!("Incorrect Words: {}", results.incorrect_words),
                    Style::default().fg(Color::Red),
                )),
            ])
            .alignment(Alignment::Center);
            results_widget.render(chunks[8], buf);
        }

        let legend = Paragraph::new(Span::styled("(tab) try again / (esc)ape", italic_style));
        legend.render(chunks[10], buf);
    }
}

/// Rows a space-separated run of words takes when word-wrapped to `width`.
fn wrapped_rows<'a>(words: impl IntoIterator<Item = &'a str>, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let mut rows = 1usize;
    let mut used = 0usize;
    for word in words {
        let w = word.width();
        if used > 0 && used + 1 + w <= width {
            used += 1 + w;
            continue;
        }
        if used > 0 {
            rows += 1;
        }
        // a word wider than the row is broken across extra rows
        rows += w.saturating_sub(1) / width;
        used = match w % width {
            0 if w > 0 => width,
            rest => rest,
        };
    }
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// The longest suffix of `text` that fits in `max_width` columns.
fn fit_tail(text: &str, max_width: usize) -> &str {
    let mut width = text.width();
    let mut start = 0;
    for (idx, c) in text.char_indices() {
        if width <= max_width {
            break;
        }
        width -= c.width().unwrap_or(0);
        start = idx + c.len_utf8();
    }
    &text[start..]
}
