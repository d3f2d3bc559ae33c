//! Configuration file support
//!
//! Loads settings from ~/.gosyn.conf (or %USERPROFILE%\.gosyn.conf on Windows)
//!
//! Format: simple key=value pairs, one per line
//! Lines starting with # are comments
//!
//! Example:
//! ```text
//! # gosyn configuration
//! line-numbers = true
//! color = true
//! theme = /home/me/.gosyn-theme.toml
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Configuration settings
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether to show a line-number gutter
    pub line_numbers: bool,
    /// Whether to emit colors at all
    pub color: bool,
    /// Optional theme file path
    pub theme: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            line_numbers: false,
            color: true,
            theme: None,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".gosyn.conf"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".gosyn.conf"))
        }
    }

    /// Load configuration from file
    pub fn load() -> Self {
        let mut config = Config::default();

        if let Some(path) = Self::config_path() {
            if let Ok(contents) = fs::read_to_string(&path) {
                let settings = Self::parse(&contents);
                config.apply(&settings);
            }
        }

        config
    }

    /// Parse config file contents into key-value pairs
    fn parse(contents: &str) -> HashMap<String, String> {
        let mut settings = HashMap::new();

        for line in contents.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Parse key = value
            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim().to_lowercase();
                let value = value.trim().to_string();
                settings.insert(key, value);
            }
        }

        settings
    }

    /// Apply settings from parsed config
    fn apply(&mut self, settings: &HashMap<String, String>) {
        if let Some(value) = settings.get("line-numbers") {
            self.line_numbers = parse_bool(value);
        }

        if let Some(value) = settings.get("color") {
            self.color = parse_bool(value);
        }

        if let Some(value) = settings.get("theme") {
            if !value.is_empty() {
                self.theme = Some(PathBuf::from(value));
            }
        }
    }
}

/// Parse a boolean value from string
fn parse_bool(s: &str) -> bool {
    let s = s.to_lowercase();
    matches!(s.as_str(), "true" | "yes" | "on" | "1")
}
