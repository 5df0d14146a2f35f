mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    cursor::Show,
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin, Write},
    path::Path,
    sync::mpsc::Sender,
    time::Duration,
};
use ticktype::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    controller::Controller,
    language::{Language, ShuffledSource, WordSource},
    logging::init_file_logging,
    runtime::{CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker, TypingEvent},
    session::SessionConfig,
};

const REDRAW_INTERVAL_MS: u64 = 250;

/// one-minute typing test: type the shuffled words, get wpm and accuracy when time runs out
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// length of the test in seconds
    #[clap(short = 's', long)]
    seconds: Option<u32>,

    /// words shown per line
    #[clap(short = 'w', long)]
    words_per_line: Option<usize>,

    /// word list to draw from (see --list-languages)
    #[clap(short = 'l', long)]
    language: Option<String>,

    /// seed the shuffle for a reproducible word order
    #[clap(long)]
    seed: Option<u64>,

    /// store the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,

    /// print the bundled word lists and exit
    #[clap(long)]
    list_languages: bool,
}

impl Cli {
    /// Command line flags win over the stored config.
    fn resolve(&self, base: Config) -> Config {
        Config {
            time_budget_secs: self.seconds.unwrap_or(base.time_budget_secs),
            words_per_line: self.words_per_line.unwrap_or(base.words_per_line),
            language: self.language.clone().unwrap_or(base.language),
        }
    }
}

pub struct App<S: WordSource> {
    pub controller: Controller<S>,
}

impl<S: WordSource> App<S> {
    pub fn new(source: S, config: &Config, ticks: Sender<TypingEvent>) -> Self {
        Self {
            controller: Controller::new(source, SessionConfig::from(config), ticks),
        }
    }

    /// Handle one key press. Returns false when the user asked to quit.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return true;
        }

        match key.code {
            KeyCode::Esc => return false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return false,
            KeyCode::Tab | KeyCode::Left => self.controller.retry(),
            KeyCode::Backspace => {
                let mut text = self.controller.session().input().to_string();
                if text.pop().is_some() {
                    self.controller.text_changed(&text);
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut text = self.controller.session().input().to_string();
                text.push(c);
                self.controller.text_changed(&text);
            }
            _ => {}
        }
        true
    }

    pub fn on_tick(&mut self, generation: u64) {
        self.controller.on_tick(generation);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.list_languages {
        for name in Language::available() {
            println!("{name}");
        }
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let config = cli.resolve(store.load());
    config.validate()?;
    if cli.save_config {
        store.save(&config)?;
    }

    if let Some(warning) = start_logging(AppDirs::log_path().as_deref()) {
        eprintln!("{warning}");
    }

    let language = Language::load(&config.language)?;
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let guard = TerminalGuard::enter()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let events = CrosstermEventSource::new();
    let mut app = App::new(
        ShuffledSource::from_language(&language, rng),
        &config,
        events.sender(),
    );
    let runner = Runner::new(
        events,
        FixedTicker::new(Duration::from_millis(REDRAW_INTERVAL_MS)),
    );

    let result = start_tui(&mut terminal, &mut app, &runner);

    // releases the session timer
    drop(app);
    drop(guard);

    result
}

/// Installs the file logger. A failure is not fatal: the test still runs
/// without a log, and the returned line says why.
fn start_logging(path: Option<&Path>) -> Option<String> {
    let path = path?;
    init_file_logging(path)
        .err()
        .map(|e| format!("ticktype: logging disabled ({}): {e}", path.display()))
}

/// Raw mode plus the alternate screen; both are undone on drop.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = TerminalGuard;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore_terminal(&mut io::stdout());
    }
}

fn restore_terminal<W: Write>(out: &mut W) -> io::Result<()> {
    let raw = disable_raw_mode();
    execute!(out, LeaveAlternateScreen, Show)?;
    raw
}

fn start_tui<B: Backend, S: WordSource, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui(app, f))?;

        match runner.step() {
            TypingEvent::Key(key) => {
                if !app.on_key(key) {
                    break;
                }
            }
            TypingEvent::Tick { generation } => app.on_tick(generation),
            TypingEvent::Resize | TypingEvent::Redraw => {}
        }
    }

    Ok(())
}

fn ui<S: WordSource>(app: &App<S>, f: &mut Frame) {
    f.render_widget(app, f.area());
}
