//! Text screens shown between sessions, and the in-game HUD

use crate::consts::*;
use crate::highscores::HighScore;

pub const TITLE_SIZE: u32 = 48;
pub const TEXT_SIZE: u32 = 22;

/// One line of centered text; `y` is the top of the line in world pixels
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub size: u32,
    pub y: f32,
}

impl TextLine {
    pub fn new(text: impl Into<String>, size: u32, y: f32) -> Self {
        Self {
            text: text.into(),
            size,
            y,
        }
    }
}

/// A full-screen text card
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Screen {
    pub lines: Vec<TextLine>,
}

impl Screen {
    pub fn contains(&self, text: &str) -> bool {
        self.lines.iter().any(|l| l.text == text)
    }
}

pub fn start_screen(high_score: u64) -> Screen {
    Screen {
        lines: vec![
            TextLine::new(TITLE, TITLE_SIZE, HEIGHT / 4.0),
            TextLine::new("Arrows to move, Space to jump", TEXT_SIZE, HEIGHT / 2.0),
            TextLine::new("Press a key to play", TEXT_SIZE, HEIGHT * 3.0 / 4.0),
            TextLine::new(format!("High Score: {}", high_score), TEXT_SIZE, 15.0),
        ],
    }
}

/// Result of the end-of-session high score check
#[derive(Debug, Clone, PartialEq)]
pub struct GameOver {
    pub screen: Screen,
    pub new_high_score: bool,
}

/// Build the game-over card, persisting the score if it is a new record
pub fn game_over_screen(score: u64, high: &mut HighScore) -> GameOver {
    let mut lines = vec![
        TextLine::new("GAME OVER", TITLE_SIZE, HEIGHT / 4.0),
        TextLine::new(format!("Score: {}", score), TEXT_SIZE, HEIGHT / 2.0),
        TextLine::new("Press a key to play again", TEXT_SIZE, HEIGHT * 3.0 / 4.0),
    ];

    let new_high_score = high.beats(score);
    if new_high_score {
        if let Err(e) = high.record(score) {
            log::warn!("Failed to write high score to {}: {}", high.path().display(), e);
        }
        lines.push(TextLine::new("NEW HIGH SCORE!", TEXT_SIZE, HEIGHT / 2.0 + 40.0));
    } else {
        lines.push(TextLine::new(
            format!("High Score: {}", high.value()),
            TEXT_SIZE,
            HEIGHT / 2.0 + 40.0,
        ));
    }

    GameOver {
        screen: Screen { lines },
        new_high_score,
    }
}

/// Current score, top center
pub fn hud(score: u64) -> TextLine {
    TextLine::new(score.to_string(), TEXT_SIZE, 15.0)
}
