//! Keyboard input to game intents
//!
//! One intent per physical key press. Auto-repeat from a held key is
//! swallowed until the key is released. Many terminals never report
//! releases, so a key that has produced no event for a short while counts
//! as released too.

use crate::game::Action;
use crate::settings::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Time after which we consider a key "released" if no repeat received
const KEY_TIMEOUT: Duration = Duration::from_millis(100);

/// What the driver should do in response to a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Game(Action),
    NewGame,
    Quit,
}

/// Key bindings configuration - supports multiple keys per command
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub move_left: Vec<KeyCode>,
    pub move_right: Vec<KeyCode>,
    pub soft_drop: Vec<KeyCode>,
    pub hard_drop: Vec<KeyCode>,
    pub rotate: Vec<KeyCode>,
    pub pause: Vec<KeyCode>,
    pub new_game: Vec<KeyCode>,
    pub quit: Vec<KeyCode>,
}

impl KeyBindings {
    /// Parse a key string into KeyCode
    fn parse_key(s: &str) -> Option<KeyCode> {
        let lower = s.to_lowercase();
        let code = match lower.as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "esc" | "escape" => KeyCode::Esc,
            "shift" => KeyCode::Modifier(ModifierKeyCode::LeftShift),
            "ctrl" | "control" => KeyCode::Modifier(ModifierKeyCode::LeftControl),
            "alt" => KeyCode::Modifier(ModifierKeyCode::LeftAlt),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };
        Some(code)
    }

    /// Parse a list of key strings into KeyCodes, skipping unknown names
    fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
        keys.iter()
            .filter_map(|s| {
                let code = Self::parse_key(s);
                if code.is_none() {
                    tracing::warn!("ignoring unknown key binding {:?}", s);
                }
                code
            })
            .collect()
    }

    /// Create keybindings from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            move_left: Self::parse_keys(&settings.keys.move_left),
            move_right: Self::parse_keys(&settings.keys.move_right),
            soft_drop: Self::parse_keys(&settings.keys.soft_drop),
            hard_drop: Self::parse_keys(&settings.keys.hard_drop),
            rotate: Self::parse_keys(&settings.keys.rotate),
            pause: Self::parse_keys(&settings.keys.pause),
            new_game: Self::parse_keys(&settings.keys.new_game),
            quit: Self::parse_keys(&settings.keys.quit),
        }
    }

    /// The command bound to `code`, if any
    pub fn command_for(&self, code: KeyCode) -> Option<Command> {
        let table = [
            (&self.move_left, Command::Game(Action::MoveLeft)),
            (&self.move_right, Command::Game(Action::MoveRight)),
            (&self.soft_drop, Command::Game(Action::SoftDrop)),
            (&self.hard_drop, Command::Game(Action::HardDrop)),
            (&self.rotate, Command::Game(Action::Rotate)),
            (&self.pause, Command::Game(Action::TogglePause)),
            (&self.new_game, Command::NewGame),
            (&self.quit, Command::Quit),
        ];
        table
            .into_iter()
            .find(|(keys, _)| keys.contains(&code))
            .map(|(_, command)| command)
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Turns raw key events into one command per press
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    bindings: KeyBindings,
    /// Keys currently held, with the last time an event for them arrived
    held: HashMap<KeyCode, Instant>,
    /// The terminal reports key releases, so the timeout is not needed
    release_events: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create input handler from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            bindings: KeyBindings::from_settings(settings),
            held: HashMap::new(),
            release_events: false,
        }
    }

    /// Whether key releases arrive as events. When they do, a held key
    /// stays held until its release instead of timing out.
    pub fn set_release_events(&mut self, enabled: bool) {
        self.release_events = enabled;
    }

    /// Route any crossterm key event
    pub fn handle(&mut self, key: KeyEvent) -> Option<Command> {
        match key.kind {
            KeyEventKind::Release => {
                self.key_up(key);
                None
            }
            _ => self.key_down(key),
        }
    }

    /// Handle a key press or repeat event
    pub fn key_down(&mut self, key: KeyEvent) -> Option<Command> {
        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Command::Quit);
        }
        self.press(normalize_key(key.code), Instant::now())
    }

    /// Handle a key release event (may never arrive on some terminals)
    pub fn key_up(&mut self, key: KeyEvent) {
        self.held.remove(&normalize_key(key.code));
    }

    /// Record a press of `code` at `now`; only the first press of a hold
    /// yields a command
    pub fn press(&mut self, code: KeyCode, now: Instant) -> Option<Command> {
        self.expire(now);
        let command = self.bindings.command_for(code)?;
        if self.held.insert(code, now).is_some() {
            return None;
        }
        Some(command)
    }

    /// Forget keys that have been silent longer than the release timeout
    pub fn expire(&mut self, now: Instant) {
        if self.release_events {
            return;
        }
        self.held
            .retain(|_, last_seen| now.saturating_duration_since(*last_seen) <= KEY_TIMEOUT);
    }

    /// Clear all held keys (useful for pause/resume)
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
