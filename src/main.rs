//! BLOCKTRIS - falling blocks in the terminal
//!
//! Thin driver around the `blocktris` engine: reads keys, ticks the drop
//! timer, draws frames.

mod ui;

use blocktris::highscore::{HighScoreEntry, HighScoreStore, HighScoreTable};
use blocktris::input::{Command, InputHandler};
use blocktris::settings::Settings;
use blocktris::timer::DropTimer;
use blocktris::{Action, Engine, EngineConfig, GameState, Status};
use crossterm::{
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self, stdout},
    path::PathBuf,
    time::{Duration, Instant},
};
use tracing_subscriber::EnvFilter;

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Get the blocktris temp directory, creating it if needed
fn blocktris_temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join("blocktris");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Everything the loop mutates between frames
struct App {
    engine: Engine,
    state: GameState,
    timer: DropTimer,
    input: InputHandler,
    scores: HighScoreTable,
    store: Option<HighScoreStore>,
    player_name: String,
    /// Set once the finished game has been written to the table
    recorded: bool,
}

impl App {
    fn new(settings: &Settings) -> Self {
        let engine = Engine::new(EngineConfig::from_settings(&settings.gameplay));
        let store = match HighScoreStore::default_location() {
            Ok(store) => Some(store),
            Err(e) => {
                tracing::warn!("high scores disabled: {}", e);
                None
            }
        };
        Self::with_engine(engine, settings, store)
    }

    fn with_engine(engine: Engine, settings: &Settings, store: Option<HighScoreStore>) -> Self {
        let state = GameState::default();
        let mut timer = DropTimer::start(Instant::now(), engine.drop_interval(&state));
        timer.pause();
        let scores = store.as_ref().map(HighScoreStore::load).unwrap_or_default();

        Self {
            engine,
            state,
            timer,
            input: InputHandler::from_settings(settings),
            scores,
            store,
            player_name: settings.player.name.clone(),
            recorded: false,
        }
    }

    fn new_game(&mut self, now: Instant) {
        self.state = self.engine.start();
        self.timer = DropTimer::start(now, self.engine.drop_interval(&self.state));
        self.input.clear();
        self.recorded = false;
        tracing::info!(
            "new game, first piece {:?}",
            self.state.current_piece.map(|p| p.piece_type)
        );
    }

    /// Run one command. Returns false when the app should exit.
    fn command(&mut self, command: Command, now: Instant) -> bool {
        match command {
            Command::Quit => return false,
            Command::NewGame => {
                if self.state.status() != Status::Running {
                    self.new_game(now);
                }
            }
            Command::Game(action) => {
                let next = self.engine.apply(&self.state, action);
                self.transition(next, now);
                if action == Action::HardDrop && self.state.status() == Status::Running {
                    self.timer.reset(now);
                }
            }
        }
        true
    }

    /// Advance the auto-drop
    fn tick(&mut self, now: Instant) {
        if self.timer.poll(now) {
            let next = self.engine.soft_drop(&self.state);
            self.transition(next, now);
        }
    }

    /// Swap in `next` and keep the timer and leaderboard in step with it
    fn transition(&mut self, next: GameState, now: Instant) {
        let previous = std::mem::replace(&mut self.state, next);

        if self.state.level != previous.level {
            tracing::debug!("level up: {} -> {}", previous.level, self.state.level);
            self.timer.set_interval(self.engine.drop_interval(&self.state));
        }

        match self.state.status() {
            Status::Paused => {
                self.timer.pause();
                self.input.clear();
            }
            Status::Running => self.timer.resume(now),
            Status::GameOver => {
                self.timer.pause();
                self.record_score();
            }
            Status::NotStarted => {}
        }
    }

    fn record_score(&mut self) {
        if self.recorded {
            return;
        }
        self.recorded = true;
        tracing::info!(
            "game over: score={} level={} lines={}",
            self.state.score,
            self.state.level,
            self.state.lines
        );

        let entry = HighScoreEntry::new(
            &self.player_name,
            self.state.score,
            self.state.level,
            self.state.lines,
        );
        match &self.store {
            Some(store) => match store.record(entry) {
                Ok(table) => self.scores = table,
                Err(e) => {
                    tracing::warn!("could not save high score: {}", e);
                }
            },
            None => self.scores.insert(entry),
        }
    }
}

fn main() -> io::Result<()> {
    // Generate session ID for this instance
    let session_id: u32 = rand::random();

    let log_dir = blocktris_temp_dir();
    let log_file = format!("{:08x}.log", session_id);

    // Setup tracing to log file
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("blocktris=debug")),
        )
        .with_ansi(false)
        .init();

    tracing::info!(
        "BLOCKTRIS starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let settings = Settings::load();
    let mut app = App::new(&settings);

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    // Ask for key release events so a held key stays one intent
    let release_events = matches!(supports_keyboard_enhancement(), Ok(true));
    if release_events {
        execute!(
            stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    app.input.set_release_events(release_events);
    tracing::debug!("key release events: {}", release_events);

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app, &settings);

    // Restore terminal
    if release_events {
        execute!(stdout(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    if let Err(e) = &result {
        tracing::error!("terminal error: {}", e);
    }

    println!("\nThanks for playing BLOCKTRIS!");
    if app.state.status() != Status::NotStarted {
        println!("Final Score: {}", app.state.score);
        println!("Level: {} | Lines: {}", app.state.level, app.state.lines);
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    settings: &Settings,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| ui::render_game(frame, &app.state, &app.scores, settings))?;

        if event::poll(FRAME_DURATION)? {
            if let Event::Key(key) = event::read()? {
                if let Some(command) = app.input.handle(key) {
                    if !app.command(command, Instant::now()) {
                        return Ok(());
                    }
                }
            }
        }

        app.tick(Instant::now());
    }
}
