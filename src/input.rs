//! Keyboard mapping from configured key names to commands

use crate::game::Action;
use crate::settings;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Game(Action),
    Quit,
}

/// Resolved key bindings - supports multiple keys per command and
/// multiple commands per key
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: Vec<(KeyCode, Command)>,
}

impl KeyBindings {
    /// Parse a key string into KeyCode
    fn parse_key(s: &str) -> Option<KeyCode> {
        let code = match s.to_lowercase().as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "esc" | "escape" => KeyCode::Esc,
            s if s.chars().count() == 1 => KeyCode::Char(s.chars().next()?),
            _ => return None,
        };
        Some(code)
    }

    /// Create keybindings from settings; unknown key names are skipped
    pub fn from_settings(keys: &settings::KeyBindings) -> Self {
        let table: [(&[String], Command); 12] = [
            (&keys.move_left, Command::Game(Action::MoveLeft)),
            (&keys.move_right, Command::Game(Action::MoveRight)),
            (&keys.soft_drop, Command::Game(Action::SoftDrop)),
            (&keys.hard_drop, Command::Game(Action::HardDrop)),
            (&keys.rotate_cw, Command::Game(Action::RotateCW)),
            (&keys.rotate_ccw, Command::Game(Action::RotateCCW)),
            (&keys.hold, Command::Game(Action::Hold)),
            (&keys.pause, Command::Game(Action::Pause)),
            (&keys.start, Command::Game(Action::Start)),
            (&keys.restart, Command::Game(Action::Restart)),
            (&keys.resume, Command::Game(Action::Resume)),
            (&keys.quit, Command::Quit),
        ];

        let mut bindings = Vec::new();
        for (names, command) in table {
            for name in names {
                match Self::parse_key(name) {
                    Some(code) => bindings.push((normalize_key(code), command)),
                    None => tracing::warn!(key = %name, ?command, "unknown key name, ignoring"),
                }
            }
        }
        Self { bindings }
    }

    /// All commands bound to this key press, in binding order
    pub fn commands_for(&self, key: KeyEvent) -> Vec<Command> {
        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return vec![Command::Quit];
        }

        let code = normalize_key(key.code);
        self.bindings
            .iter()
            .filter(|(bound, _)| *bound == code)
            .map(|(_, command)| *command)
            .collect()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_settings(&settings::KeyBindings::default())
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
