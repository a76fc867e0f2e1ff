//! Player preferences
//!
//! Persisted as JSON in a dotfile under the home directory; anything missing
//! or unreadable falls back to defaults.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Scrolling background stars
    pub starfield: bool,
    /// Explosion particles
    pub particles: bool,
    /// Terminal bell on explosions and game over
    pub bell: bool,
    /// Frame counter in the HUD
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            starfield: true,
            particles: true,
            bell: false,
            show_fps: false,
        }
    }
}

impl Settings {
    fn path() -> Option<PathBuf> {
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".neon-strike").join("settings.json"))
    }

    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };
        match fs::read_to_string(&path)
            .ok()
            .and_then(|json| serde_json::from_str(&json).ok())
        {
            Some(settings) => {
                log::info!("loaded settings from {}", path.display());
                settings
            }
            None => Self::default(),
        }
    }

    pub fn save(&self) {
        let Some(path) = Self::path() else { return };
        if let Some(dir) = path.parent() {
            let _ = fs::create_dir_all(dir);
        }
        if let Ok(json) = serde_json::to_string_pretty(self) {
            match fs::write(&path, json) {
                Ok(()) => log::info!("settings saved"),
                Err(err) => log::warn!("could not save settings: {err}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert!(s.starfield);
        assert!(s.particles);
        assert!(!s.bell);
    }

    #[test]
    fn test_round_trip() {
        let mut s = Settings::default();
        s.bell = true;
        s.starfield = false;
        let json = serde_json::to_string(&s).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert!(back.bell);
        assert!(!back.starfield);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let back: Settings = serde_json::from_str(r#"{"bell": true}"#).unwrap();
        assert!(back.bell);
        assert!(back.particles);
    }
}
