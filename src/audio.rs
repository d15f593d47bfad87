//! Audio cues for the terminal frontend
//!
//! Sound effects ring the terminal bell. Terminals have no music channel, so
//! music is tracked as state (the renderer shows a note glyph while it plays)
//! and logged.

use std::io::{self, Write};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player left the ground
    Jump,
    /// Boost powerup collected
    Boost,
}

/// Background music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Music {
    /// Start and game-over screens
    Menu,
    /// During a session
    Gameplay,
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    sound_enabled: bool,
    music_enabled: bool,
    current_music: Option<Music>,
}

impl AudioManager {
    pub fn new(sound_enabled: bool, music_enabled: bool) -> Self {
        Self {
            sound_enabled,
            music_enabled,
            current_music: None,
        }
    }

    /// React to a simulation event
    pub fn handle_event(&mut self, event: GameEvent, out: &mut impl Write) -> io::Result<()> {
        match event {
            GameEvent::Jump => self.play(SoundEffect::Jump, out),
            GameEvent::Boost => self.play(SoundEffect::Boost, out),
            GameEvent::MusicStart => {
                self.play_music(Music::Gameplay);
                Ok(())
            }
            GameEvent::MusicStop => {
                self.stop_music();
                Ok(())
            }
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect, out: &mut impl Write) -> io::Result<()> {
        if !self.sound_enabled {
            return Ok(());
        }
        log::debug!("Sound: {:?}", effect);
        out.write_all(b"\x07")
    }

    /// Start a looping track, replacing whatever is playing
    pub fn play_music(&mut self, music: Music) {
        if !self.music_enabled || self.current_music == Some(music) {
            return;
        }
        log::debug!("Music: {:?}", music);
        self.current_music = Some(music);
    }

    pub fn stop_music(&mut self) {
        if let Some(music) = self.current_music.take() {
            log::debug!("Music stopped: {:?}", music);
        }
    }

    pub fn current_music(&self) -> Option<Music> {
        self.current_music
    }
}
