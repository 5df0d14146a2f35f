use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ticktype::controller::Controller;
use ticktype::language::FixedSource;
use ticktype::runtime::{FixedTicker, Runner, TestEventSource, TypingEvent};
use ticktype::session::{Phase, SessionConfig, WordStatus};

// Headless integration using the internal runtime + Controller without a TTY.
// Keystrokes and clock ticks travel through one channel, the same way the
// binary wires them up.

fn key(c: char) -> TypingEvent {
    TypingEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

/// Minimal event loop mirroring the binary's key handling.
fn drive(
    controller: &mut Controller<FixedSource>,
    runner: &Runner<TestEventSource, FixedTicker>,
    max_steps: u32,
) {
    for _ in 0..max_steps {
        match runner.step() {
            TypingEvent::Tick { generation } => {
                controller.on_tick(generation);
            }
            TypingEvent::Key(key) => {
                if let KeyCode::Char(c) = key.code {
                    let mut text = controller.session().input().to_string();
                    text.push(c);
                    controller.text_changed(&text);
                }
            }
            TypingEvent::Resize | TypingEvent::Redraw => {}
        }
        if controller.session().has_expired() {
            break;
        }
    }
}

#[test]
fn headless_typing_flow_expires_with_results() {
    let (tx, rx) = mpsc::channel();
    let mut controller = Controller::with_tick_interval(
        FixedSource::new(["the", "quick", "brown"]),
        SessionConfig {
            time_budget_secs: 2,
            words_per_line: 13,
        },
        tx.clone(),
        Duration::from_millis(20),
    );

    for c in "the slow ".chars() {
        tx.send(key(c)).unwrap();
    }

    let es = TestEventSource::new(rx);
    let ticker = FixedTicker::new(Duration::from_millis(5));
    let runner = Runner::new(es, ticker);

    drive(&mut controller, &runner, 1000);

    let session = controller.session();
    assert_eq!(session.phase(), Phase::Expired);
    assert_eq!(session.seconds_remaining(), 0);
    assert_eq!(session.status_of(0), WordStatus::Correct);
    assert_eq!(session.status_of(1), WordStatus::Incorrect);
    assert!(!controller.is_timer_running());

    let results = session.results().unwrap();
    assert_eq!(results.wpm, 30.0);
    assert_eq!(results.accuracy_display(), "50.00");
    assert_eq!(results.correct_words, 1);
    assert_eq!(results.incorrect_words, 1);
}

#[test]
fn headless_clock_waits_for_first_keystroke() {
    let (tx, rx) = mpsc::channel();
    let mut controller = Controller::with_tick_interval(
        FixedSource::new(["the"]),
        SessionConfig {
            time_budget_secs: 1,
            words_per_line: 13,
        },
        tx,
        Duration::from_millis(5),
    );

    let es = TestEventSource::new(rx);
    let runner = Runner::new(es, FixedTicker::new(Duration::from_millis(5)));

    // nothing typed: only redraws, the clock never moves
    drive(&mut controller, &runner, 10);

    assert_eq!(controller.session().phase(), Phase::Idle);
    assert_eq!(controller.session().seconds_remaining(), 1);
    assert!(!controller.is_timer_running());
}

#[test]
fn headless_retry_discards_pending_ticks() {
    let (tx, rx) = mpsc::channel();
    let mut controller = Controller::with_tick_interval(
        FixedSource::new(["the", "quick"]),
        SessionConfig::default(),
        tx.clone(),
        Duration::from_secs(3600),
    );
    controller.text_changed("t");

    // a tick from the first run is still queued when the user retries
    tx.send(TypingEvent::Tick { generation: 0 }).unwrap();
    controller.retry();

    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );
    drive(&mut controller, &runner, 3);

    assert_eq!(controller.session().seconds_remaining(), 60);
    assert_eq!(controller.session().phase(), Phase::Idle);
}
