//! Terminal rendering module
//!
//! Each frame is composed into a `Canvas`, then written out in one batch of
//! queued commands and flushed once.

pub mod canvas;

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::{queue, terminal};

pub use canvas::{BG_COLOR, COLS, Canvas, Cell, ROWS, TEXT_COLOR};

use crate::audio::Music;
use crate::consts::*;
use crate::sim::{GameState, PlayerFrame, Rect};
use crate::ui::{self, Screen};

const CLOUD_COLOR: Color = Color::Rgb { r: 235, g: 245, b: 255 };
const PLATFORM_COLOR: Color = Color::Rgb { r: 90, g: 170, b: 60 };
const POWERUP_COLOR: Color = Color::Rgb { r: 255, g: 255, b: 0 };
const PLAYER_COLOR: Color = Color::Rgb { r: 255, g: 255, b: 255 };
const MOB_COLOR: Color = Color::Rgb { r: 255, g: 0, b: 0 };

struct Sprite {
    layer: u8,
    rect: Rect,
    glyph: char,
    color: Color,
}

/// Paint the world into `canvas`, lowest layer first
pub fn compose_world(canvas: &mut Canvas, state: &GameState, music: Option<Music>) {
    canvas.clear();

    let mut sprites = Vec::with_capacity(
        state.clouds.len() + state.platforms.len() + state.powerups.len() + state.mobs.len() + 1,
    );
    sprites.extend(state.clouds.iter().map(|c| Sprite {
        layer: CLOUD_LAYER,
        rect: c.drawn_rect(),
        glyph: '~',
        color: CLOUD_COLOR,
    }));
    sprites.extend(state.platforms.iter().map(|p| Sprite {
        layer: PLATFORM_LAYER,
        rect: p.rect,
        glyph: '=',
        color: PLATFORM_COLOR,
    }));
    sprites.extend(state.powerups.iter().map(|p| Sprite {
        layer: POWERUP_LAYER,
        rect: p.rect,
        glyph: '^',
        color: POWERUP_COLOR,
    }));
    if state.player.visible {
        let glyph = match state.player.frame {
            PlayerFrame::Standing(_) => '@',
            PlayerFrame::WalkRight(_) => '>',
            PlayerFrame::WalkLeft(_) => '<',
        };
        sprites.push(Sprite {
            layer: PLAYER_LAYER,
            rect: state.player.rect,
            glyph,
            color: PLAYER_COLOR,
        });
    }
    sprites.extend(state.mobs.iter().map(|m| Sprite {
        layer: MOB_LAYER,
        rect: m.rect,
        glyph: if m.facing_up() { 'W' } else { 'M' },
        color: MOB_COLOR,
    }));

    // Stable: insertion order breaks ties within a layer
    sprites.sort_by_key(|s| s.layer);
    for sprite in &sprites {
        canvas.fill_rect(&sprite.rect, sprite.glyph, sprite.color);
    }

    canvas.text(&ui::hud(state.score), TEXT_COLOR);
    if music.is_some() && canvas.cols() > 0 {
        canvas.put(
            canvas.cols() - 1,
            0,
            Cell {
                ch: '♪',
                fg: TEXT_COLOR,
                bold: false,
            },
        );
    }
}

/// Paint a text card
pub fn compose_screen(canvas: &mut Canvas, screen: &Screen) {
    canvas.clear();
    for line in &screen.lines {
        canvas.text(line, TEXT_COLOR);
    }
}

/// Writes composed frames to the terminal
pub struct Renderer<W: Write> {
    out: W,
    canvas: Canvas,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, canvas: Canvas) -> Self {
        Self { out, canvas }
    }

    /// Raw output handle (used for the terminal bell)
    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn draw_world(&mut self, state: &GameState, music: Option<Music>) -> io::Result<()> {
        compose_world(&mut self.canvas, state, music);
        self.present()
    }

    pub fn draw_screen(&mut self, screen: &Screen) -> io::Result<()> {
        compose_screen(&mut self.canvas, screen);
        queue!(self.out, terminal::Clear(terminal::ClearType::All))?;
        self.present()
    }

    fn present(&mut self) -> io::Result<()> {
        queue!(self.out, SetBackgroundColor(BG_COLOR))?;
        for row in 0..self.canvas.rows() {
            queue!(self.out, MoveTo(0, row as u16))?;
            let mut fg = None;
            let mut bold = false;
            for cell in self.canvas.row(row) {
                if fg != Some(cell.fg) {
                    queue!(self.out, SetForegroundColor(cell.fg))?;
                    fg = Some(cell.fg);
                }
                if bold != cell.bold {
                    let attr = if cell.bold {
                        Attribute::Bold
                    } else {
                        Attribute::NormalIntensity
                    };
                    queue!(self.out, SetAttribute(attr))?;
                    bold = cell.bold;
                }
                queue!(self.out, Print(cell.ch))?;
            }
            if bold {
                queue!(self.out, SetAttribute(Attribute::NormalIntensity))?;
            }
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()
    }
}
