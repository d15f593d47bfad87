//! High score persistence
//!
//! A single text file holding the best score as a decimal integer. Missing or
//! unreadable content counts as zero and is never reported to the player.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The persisted best score and where it lives
#[derive(Debug, Clone)]
pub struct HighScore {
    path: PathBuf,
    value: u64,
}

impl HighScore {
    /// Read the high score file, defaulting to zero
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let value = match fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents),
            Err(e) => {
                log::info!("No high score at {} ({}), starting at 0", path.display(), e);
                0
            }
        };
        log::info!("High score: {}", value);
        Self { path, value }
    }

    /// Parse file contents. Surrounding whitespace is allowed; anything else
    /// that isn't a non-negative integer yields zero.
    pub fn parse(contents: &str) -> u64 {
        match contents.trim().parse::<i64>() {
            Ok(v) if v >= 0 => v as u64,
            Ok(v) => {
                log::warn!("Negative high score {} ignored", v);
                0
            }
            Err(e) => {
                log::warn!("Malformed high score {:?}: {}", contents, e);
                0
            }
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if a score beats the stored one
    pub fn beats(&self, score: u64) -> bool {
        score > self.value
    }

    /// Store `score` if it beats the current value.
    ///
    /// Returns whether a new high score was set. The in-memory value is updated
    /// even when the write fails, so the session still shows the new record.
    pub fn record(&mut self, score: u64) -> io::Result<bool> {
        if !self.beats(score) {
            return Ok(false);
        }
        self.value = score;
        self.save()?;
        Ok(true)
    }

    /// Overwrite the file with the current value
    pub fn save(&self) -> io::Result<()> {
        fs::write(&self.path, self.value.to_string())?;
        log::info!("High score {} saved to {}", self.value, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(HighScore::parse("120"), 120);
        assert_eq!(HighScore::parse(" 50\n"), 50);
        assert_eq!(HighScore::parse("abc"), 0);
        assert_eq!(HighScore::parse(""), 0);
        assert_eq!(HighScore::parse("-7"), 0);
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highscore.txt");
        fs::write(&path, "abc").unwrap();

        let high = HighScore::load(&path);
        assert_eq!(high.value(), 0);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let high = HighScore::load(dir.path().join("nope.txt"));
        assert_eq!(high.value(), 0);
    }

    #[test]
    fn test_record_writes_only_when_beaten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highscore.txt");
        fs::write(&path, "50").unwrap();

        let mut high = HighScore::load(&path);
        assert!(!high.record(50).unwrap());
        assert!(!high.record(30).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "50");

        assert!(high.record(120).unwrap());
        assert_eq!(high.value(), 120);
        assert_eq!(fs::read_to_string(&path).unwrap(), "120");
    }
}
