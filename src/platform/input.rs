//! Keyboard input
//!
//! Turns terminal key events into per-tick `TickInput`. Terminals that support
//! the keyboard enhancement protocol report releases; on the rest a key counts
//! as held for a short window after its last press or auto-repeat.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::TickInput;

/// Game-level meaning of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Jump,
    Quit,
    Other,
}

impl Key {
    pub fn classify(key: &KeyEvent) -> Self {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Key::Quit;
        }
        match key.code {
            KeyCode::Left | KeyCode::Char('a') => Key::Left,
            KeyCode::Right | KeyCode::Char('d') => Key::Right,
            KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w') => Key::Jump,
            KeyCode::Esc | KeyCode::Char('q') => Key::Quit,
            _ => Key::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct HeldKey {
    down: bool,
    last_seen: Option<Instant>,
}

impl HeldKey {
    fn press(&mut self, now: Instant) {
        self.down = true;
        self.last_seen = Some(now);
    }

    fn release(&mut self) {
        self.down = false;
    }

    fn is_down(&self, now: Instant, hold: Option<Duration>) -> bool {
        match (hold, self.last_seen) {
            (None, _) => self.down,
            (Some(hold), Some(seen)) => self.down && now.saturating_duration_since(seen) <= hold,
            (Some(_), None) => false,
        }
    }
}

/// Accumulates key events between ticks
#[derive(Debug)]
pub struct InputState {
    /// `None` when the terminal reports releases
    hold: Option<Duration>,
    left: HeldKey,
    right: HeldKey,
    jump: HeldKey,
    pending: TickInput,
}

impl InputState {
    pub fn new(reports_release: bool, key_hold: Duration) -> Self {
        Self {
            hold: if reports_release { None } else { Some(key_hold) },
            left: HeldKey::default(),
            right: HeldKey::default(),
            jump: HeldKey::default(),
            pending: TickInput::default(),
        }
    }

    pub fn reports_release(&self) -> bool {
        self.hold.is_none()
    }

    /// Record one key event
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let key_kind = Key::classify(&key);
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => match key_kind {
                Key::Left => self.left.press(now),
                Key::Right => self.right.press(now),
                Key::Jump => {
                    let was_down = self.jump.is_down(now, self.hold);
                    if key.kind == KeyEventKind::Press && !was_down {
                        self.pending.jump_pressed = true;
                    }
                    self.jump.press(now);
                }
                Key::Quit => self.pending.quit = true,
                Key::Other => {}
            },
            KeyEventKind::Release => match key_kind {
                Key::Left => self.left.release(),
                Key::Right => self.right.release(),
                Key::Jump => {
                    self.jump.release();
                    self.pending.jump_released = true;
                }
                Key::Quit | Key::Other => {}
            },
        }
    }

    /// Drain all queued terminal events without blocking
    pub fn poll(&mut self) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key, Instant::now());
            }
        }
        Ok(())
    }

    /// Input for the next tick; one-shot flags are consumed
    pub fn take(&mut self, now: Instant) -> TickInput {
        // Without release reports, a jump key that stopped repeating was let go
        if self.jump.down && !self.jump.is_down(now, self.hold) {
            self.jump.release();
            self.pending.jump_released = true;
        }

        let mut input = std::mem::take(&mut self.pending);
        input.left = self.left.is_down(now, self.hold);
        input.right = self.right.is_down(now, self.hold);
        input
    }

    /// Forget held keys and queued one-shots
    pub fn reset(&mut self) {
        self.left = HeldKey::default();
        self.right = HeldKey::default();
        self.jump = HeldKey::default();
        self.pending = TickInput::default();
    }

    /// Block until a key is pressed (or released, when releases are
    /// reported). Returns false if the player asked to quit.
    pub fn wait_for_key(&mut self) -> io::Result<bool> {
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if Key::classify(&key) == Key::Quit && key.kind == KeyEventKind::Press {
                self.reset();
                return Ok(false);
            }
            let proceed = if self.reports_release() {
                key.kind == KeyEventKind::Release
            } else {
                key.kind == KeyEventKind::Press
            };
            if proceed {
                self.reset();
                return Ok(true);
            }
        }
    }
}
