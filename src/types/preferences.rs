use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Persistent application preferences. Repeat ranges deliberately stay out of
/// here; only the UI knobs survive a restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub dark_theme: bool,
    pub rate_step: f64,
    pub last_open_dir: Option<PathBuf>,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            dark_theme: true,
            rate_step: 0.1,
            last_open_dir: None,
        }
    }
}

impl Preferences {
    /// Save to a JSON file at the given path, creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())
    }

    /// Load from a JSON file at the given path.
    pub fn load_from_file(path: &Path) -> std::io::Result<Preferences> {
        let mut file = File::open(path)?;
        let mut json = String::new();
        file.read_to_string(&mut json)?;
        serde_json::from_str(&json).map_err(std::io::Error::other)
    }

    /// Platform config location, e.g. ~/.config/loopio/preferences.json.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("loopio").join("preferences.json"))
    }

    pub fn load_or_default() -> Preferences {
        Self::default_path()
            .and_then(|path| Self::load_from_file(&path).ok())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_preferences() {
        let prefs = Preferences {
            dark_theme: false,
            rate_step: 0.25,
            last_open_dir: Some(PathBuf::from("/videos")),
        };
        let path = std::env::temp_dir().join("loopio_preferences_test.json");
        prefs.save_to_file(&path).unwrap();
        let loaded = Preferences::load_from_file(&path).unwrap();
        assert_eq!(prefs, loaded);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file_falls_back_to_default() {
        let path = std::env::temp_dir().join("loopio_preferences_missing.json");
        let _ = std::fs::remove_file(&path);
        assert!(Preferences::load_from_file(&path).is_err());
    }
}
