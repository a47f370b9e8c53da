//! Blockfall - a falling-block puzzle for the terminal

mod bag;
mod board;
mod game;
mod hud;
mod input;
mod kicks;
mod piece;
mod render;
mod score;
mod settings;
mod tetromino;
mod ui;

use anyhow::Context;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use game::Game;
use input::{Command, KeyBindings};
use ratatui::{backend::CrosstermBackend, Terminal};
use settings::Settings;
use std::{
    io::{self, stdout},
    path::PathBuf,
    time::{Duration, Instant},
};
use ui::{GameLayout, StatsPanel};

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Get the blockfall temp directory, creating it if needed
fn blockfall_temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join("blockfall");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> anyhow::Result<()> {
    // Generate session ID for this instance
    let session_id: u32 = rand::random();

    // Setup tracing to log file
    let log_dir = blockfall_temp_dir();
    let log_file = format!("{:08x}.log", session_id);
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("blockfall=debug".parse()?),
        )
        .with_ansi(false)
        .init();

    tracing::info!(
        "blockfall starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let settings = Settings::load();
    let bindings = KeyBindings::from_settings(&settings.keys);
    let mut game = match settings.gameplay.seed {
        Some(seed) => {
            tracing::info!(seed, "using fixed piece seed");
            Game::with_seed(seed)
        }
        None => Game::new(),
    };

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout());
    let result = Terminal::new(backend)
        .context("failed to create terminal")
        .and_then(|mut terminal| {
            terminal.clear()?;
            run_app(&mut terminal, &mut game, &settings, &bindings)
        });

    // Restore terminal even if the game loop failed
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)
        .context("failed to leave alternate screen")?;

    match &result {
        Ok(()) => {
            tracing::info!(
                score = game.score.points,
                lines = game.score.lines,
                "blockfall shutting down"
            );
            println!("\nThanks for playing Blockfall!");
            println!("Final Score: {}", game.score.points);
            println!("Level: {} | Lines: {}", game.score.level, game.score.lines);
        }
        Err(e) => tracing::error!("game loop failed: {:#}", e),
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut Game,
    settings: &Settings,
    bindings: &KeyBindings,
) -> anyhow::Result<()> {
    let clock = Instant::now();
    let mut panel = StatsPanel::default();

    loop {
        game.frame(clock.elapsed());
        hud::dispatch(game.drain_events(), &mut panel);

        // Render
        let screen = terminal
            .draw(|frame| ui::render_game(frame, game, &panel, settings))?
            .area;

        // Handle input
        if !event::poll(FRAME_DURATION)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                for command in bindings.commands_for(key) {
                    match command {
                        Command::Quit => return Ok(()),
                        Command::Game(action) => game.process_action(action),
                    }
                }
            }
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                if let Some(action) = GameLayout::new(screen).control_at(column, row) {
                    tracing::trace!(?action, "control button pressed");
                    game.process_action(action);
                }
            }
            _ => {}
        }
    }
}
