//! Platform abstraction layer
//!
//! Handles the terminal side of the game:
//! - Time/ticks and frame pacing
//! - Keyboard input
//! - Raw mode / alternate screen lifetime

pub mod input;
pub mod time;

use std::io::{self, Write, stdout};

use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{cursor, execute, terminal};

pub use input::{InputState, Key};
pub use time::{Clock, FrameLimiter};

/// Terminal session guard. Restores the terminal when dropped.
pub struct Terminal {
    enhanced_keyboard: bool,
}

impl Terminal {
    /// Switch to raw mode on the alternate screen and, where supported, ask
    /// for key release events
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = stdout();
        execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;

        let enhanced_keyboard = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced_keyboard {
            execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        log::info!(
            "Terminal ready (key release events: {})",
            if enhanced_keyboard { "yes" } else { "no" }
        );
        Ok(Self { enhanced_keyboard })
    }

    /// Whether key releases are reported
    pub fn reports_release(&self) -> bool {
        self.enhanced_keyboard
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let mut out = stdout();
        if self.enhanced_keyboard {
            let _ = execute!(out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(out, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        let _ = out.flush();
    }
}
