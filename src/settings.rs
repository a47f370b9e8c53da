//! Settings loaded from TOML
//!
//! Read from `$BLOCKFALL_CONFIG` if set, otherwise from
//! ~/.config/blockfall/settings.toml (or the platform equivalent).
//! Missing files and missing keys fall back to defaults.

use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const CONFIG_ENV: &str = "BLOCKFALL_CONFIG";

/// Game settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Keybindings
    pub keys: KeyBindings,
    /// Visual settings
    pub visual: VisualSettings,
    /// Gameplay settings
    pub gameplay: GameplaySettings,
}

/// Key bindings (stored as strings for easy editing)
/// Each action can have one or more keys bound to it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    #[serde(deserialize_with = "deserialize_keys")]
    pub move_left: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub move_right: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub soft_drop: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub hard_drop: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub rotate_cw: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub rotate_ccw: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub hold: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub pause: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub start: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub restart: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub resume: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub quit: Vec<String>,
}

/// Deserialize keys as either a single string or array of strings
fn deserialize_keys<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct KeysVisitor;

    impl<'de> Visitor<'de> for KeysVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string or array of strings")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let mut keys = Vec::new();
            while let Some(key) = seq.next_element::<String>()? {
                keys.push(key);
            }
            Ok(keys)
        }
    }

    deserializer.deserialize_any(KeysVisitor)
}

/// Visual settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VisualSettings {
    /// Ghost piece visibility
    pub show_ghost: bool,
    /// Block style: "solid", "bracket", "round"
    pub block_style: String,
}

/// Gameplay settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameplaySettings {
    /// Fixed bag seed for a reproducible piece sequence
    pub seed: Option<u64>,
}

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: keys(&["Left"]),
            move_right: keys(&["Right"]),
            soft_drop: keys(&["Down"]),
            hard_drop: keys(&["Up", "Space"]),
            rotate_cw: keys(&["z"]),
            rotate_ccw: keys(&["x"]),
            hold: keys(&["c"]),
            pause: keys(&["Esc", "p"]),
            start: keys(&["Enter"]),
            restart: keys(&["r"]),
            resume: keys(&["Enter"]),
            quit: keys(&["q"]),
        }
    }
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            show_ghost: true,
            block_style: "solid".to_string(),
        }
    }
}

impl Settings {
    /// Where settings are read from
    pub fn settings_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        ProjectDirs::from("com", "blockfall", "blockfall")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            tracing::warn!("could not determine config directory, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load settings from `path`, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(settings) => {
                    tracing::info!(path = %path.display(), "loaded settings");
                    settings
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), "invalid settings, using defaults: {}", e);
                    Self::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "could not read settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

impl VisualSettings {
    /// Get the block and ghost glyphs (two columns each) based on style
    pub fn block_chars(&self) -> (&'static str, &'static str) {
        match self.block_style.as_str() {
            "bracket" => ("[]", ".."),
            "round" => ("()", ".."),
            _ => ("██", "░░"), // "solid" or default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(Settings::parse("").unwrap(), Settings::default());
    }

    #[test]
    fn test_keys_accept_string_or_array() {
        let settings = Settings::parse(
            r#"
            [keys]
            move_left = "a"
            hold = ["Tab", "h"]
            "#,
        )
        .unwrap();
        assert_eq!(settings.keys.move_left, vec!["a"]);
        assert_eq!(settings.keys.hold, vec!["Tab", "h"]);
        // Untouched bindings keep their defaults
        assert_eq!(settings.keys.move_right, vec!["Right"]);
    }

    #[test]
    fn test_visual_and_seed() {
        let settings = Settings::parse(
            r#"
            [visual]
            show_ghost = false
            block_style = "bracket"

            [gameplay]
            seed = 1234
            "#,
        )
        .unwrap();
        assert!(!settings.visual.show_ghost);
        assert_eq!(settings.visual.block_chars(), ("[]", ".."));
        assert_eq!(settings.gameplay.seed, Some(1234));
    }

    #[test]
    fn test_default_hold_is_plain_key() {
        // Bare modifier presses never arrive as key events
        assert_eq!(KeyBindings::default().hold, vec!["c"]);
    }

    #[test]
    fn test_bad_type_is_an_error() {
        assert!(Settings::parse("[visual]\nshow_ghost = 3").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = std::env::temp_dir().join("blockfall-test-missing/settings.toml");
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_unknown_style_is_solid() {
        let visual = VisualSettings {
            show_ghost: true,
            block_style: "sparkly".to_string(),
        };
        assert_eq!(visual.block_chars(), ("██", "░░"));
    }
}
