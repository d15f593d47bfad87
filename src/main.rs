//! Jumpy entry point
//!
//! Sets up logging, settings and the terminal, then runs
//! start screen -> (session -> game over)* until the player quits.

use std::fs::File;
use std::io::{BufWriter, Stdout, stdout};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;

use jumpy::audio::{AudioManager, Music};
use jumpy::platform::{Clock, FrameLimiter, InputState, Terminal};
use jumpy::renderer::{Canvas, Renderer};
use jumpy::sim::{GameState, tick};
use jumpy::{HighScore, Settings, ui};

#[derive(Parser, Debug)]
#[command(author, version, about = "Jumpy! An endless vertical platformer in the terminal", long_about = None)]
struct Args {
    /// JSON settings file
    #[arg(long, default_value = "jumpy.json")]
    config: PathBuf,
    /// Fixed RNG seed (sessions use seed, seed+1, ...)
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    highscore_file: Option<PathBuf>,
    #[arg(long)]
    fps: Option<u32>,
    /// Log destination; the terminal itself is busy drawing
    #[arg(long, default_value = "jumpy.log")]
    log_file: PathBuf,
}

fn init_logger(path: &Path) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match File::create(path) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => {
            eprintln!("Cannot open log file {}: {}", path.display(), e);
            builder.target(env_logger::Target::Stderr);
        }
    }
    builder.init();
}

/// Application state that outlives a single session
struct Game {
    settings: Settings,
    high_score: HighScore,
    audio: AudioManager,
    input: InputState,
    renderer: Renderer<BufWriter<Stdout>>,
    clock: Clock,
    running: bool,
    sessions: u64,
}

impl Game {
    fn new(settings: Settings, reports_release: bool) -> Result<Self> {
        let (cols, rows) = crossterm::terminal::size().context("failed to query terminal size")?;
        Ok(Self {
            high_score: HighScore::load(&settings.highscore_file),
            audio: AudioManager::new(settings.sound, settings.music),
            input: InputState::new(reports_release, Duration::from_millis(settings.key_hold_ms)),
            renderer: Renderer::new(BufWriter::new(stdout()), Canvas::for_terminal(cols, rows)),
            clock: Clock::new(),
            running: true,
            sessions: 0,
            settings,
        })
    }

    fn next_seed(&mut self) -> u64 {
        let seed = match self.settings.seed {
            Some(seed) => seed.wrapping_add(self.sessions),
            None => rand::random(),
        };
        self.sessions += 1;
        seed
    }

    fn show_start_screen(&mut self) -> Result<()> {
        self.audio.play_music(Music::Menu);
        self.renderer
            .draw_screen(&ui::start_screen(self.high_score.value()))?;
        if !self.input.wait_for_key()? {
            self.running = false;
        }
        self.audio.stop_music();
        Ok(())
    }

    /// Play one session to its end and return the score
    fn run_session(&mut self) -> Result<u64> {
        let seed = self.next_seed();
        let mut state = GameState::new(seed);
        state.begin();

        let mut limiter = FrameLimiter::new(self.settings.fps);
        while state.is_playing() {
            limiter.wait();
            self.input.poll()?;
            let input = self.input.take(Instant::now());
            tick(&mut state, &input, self.clock.now_ms());

            for event in state.drain_events() {
                self.audio.handle_event(event, self.renderer.writer())?;
            }
            self.renderer.draw_world(&state, self.audio.current_music())?;
        }

        if state.quit_requested {
            self.running = false;
        }
        Ok(state.score)
    }

    fn show_game_over_screen(&mut self, score: u64) -> Result<()> {
        if !self.running {
            return Ok(());
        }
        self.audio.play_music(Music::Menu);
        let over = ui::game_over_screen(score, &mut self.high_score);
        if over.new_high_score {
            log::info!("New high score: {}", score);
        }
        self.renderer.draw_screen(&over.screen)?;
        if !self.input.wait_for_key()? {
            self.running = false;
        }
        self.audio.stop_music();
        Ok(())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(&args.log_file);
    log::info!("Jumpy starting...");

    let mut settings = Settings::load(&args.config);
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    if let Some(path) = args.highscore_file {
        settings.highscore_file = path;
    }
    if let Some(fps) = args.fps {
        settings.fps = fps.max(1);
    }

    let terminal = Terminal::enter().context("failed to set up the terminal")?;
    let mut game = Game::new(settings, terminal.reports_release())?;

    game.show_start_screen()?;
    while game.running {
        let score = game.run_session()?;
        game.show_game_over_screen(score)?;
    }

    drop(terminal);
    log::info!("Bye");
    Ok(())
}
