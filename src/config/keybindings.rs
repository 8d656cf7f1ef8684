//! Keybinding configuration for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::tui::event::Action;

/// Key lists per action. Keys typed while editing the URL go to the input
/// line instead and never reach these bindings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub quit: Vec<String>,
    pub move_up: Vec<String>,
    pub move_down: Vec<String>,
    pub next_page: Vec<String>,
    pub prev_page: Vec<String>,
    pub edit_url: Vec<String>,
    pub submit: Vec<String>,
    pub clear: Vec<String>,
    pub toggle_history: Vec<String>,
    pub export_json: Vec<String>,
    pub export_html: Vec<String>,
    pub copy_json: Vec<String>,
    pub preview: Vec<String>,
    pub download: Vec<String>,
}

fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            quit: keys(&["q", "Ctrl+c"]),
            move_up: keys(&["k", "Up"]),
            move_down: keys(&["j", "Down"]),
            next_page: keys(&["n", "PageDown"]),
            prev_page: keys(&["p", "PageUp"]),
            edit_url: keys(&["i", "/"]),
            submit: keys(&["Enter"]),
            clear: keys(&["c"]),
            toggle_history: keys(&["h"]),
            export_json: keys(&["J"]),
            export_html: keys(&["H"]),
            copy_json: keys(&["y"]),
            preview: keys(&["v"]),
            download: keys(&["d"]),
        }
    }
}

impl KeybindingConfig {
    /// Get the action for a key event. Earlier entries win on overlap.
    pub fn get_action(&self, key: &KeyEvent) -> Action {
        let table: [(&[String], Action); 14] = [
            (self.quit.as_slice(), Action::Quit),
            (self.move_up.as_slice(), Action::MoveUp),
            (self.move_down.as_slice(), Action::MoveDown),
            (self.next_page.as_slice(), Action::NextPage),
            (self.prev_page.as_slice(), Action::PrevPage),
            (self.edit_url.as_slice(), Action::EditUrl),
            (self.submit.as_slice(), Action::Submit),
            (self.clear.as_slice(), Action::Clear),
            (self.toggle_history.as_slice(), Action::ToggleHistory),
            (self.export_json.as_slice(), Action::ExportJson),
            (self.export_html.as_slice(), Action::ExportHtml),
            (self.copy_json.as_slice(), Action::CopyJson),
            (self.preview.as_slice(), Action::Preview),
            (self.download.as_slice(), Action::Download),
        ];

        table
            .iter()
            .find(|(bindings, _)| matches_any(key, bindings))
            .map(|(_, action)| *action)
            .unwrap_or(Action::None)
    }
}

fn matches_any(key: &KeyEvent, bindings: &[String]) -> bool {
    bindings
        .iter()
        .filter_map(|binding| parse_key_string(binding).ok())
        .any(|parsed| parsed.matches(key))
}

/// A parsed key binding with code and modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Terminals report uppercase letters with SHIFT set, so a binding of
    /// "J" also matches `Shift+J`.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.code == key.code
            && (self.modifiers == key.modifiers
                || self.modifiers == (key.modifiers & !KeyModifiers::SHIFT))
    }
}

/// Parse a key string such as `"d"`, `"PageDown"`, `"F5"` or `"Ctrl+c"`.
pub fn parse_key_string(s: &str) -> Result<KeyBinding, String> {
    let s = s.trim();
    let (modifier_parts, key_part) = match s.rsplit_once('+') {
        // A lone "+" is the plus key, not a separator
        Some((mods, key)) if !mods.is_empty() && !key.is_empty() => (Some(mods), key),
        _ => (None, s),
    };

    let mut modifiers = KeyModifiers::NONE;
    for part in modifier_parts.into_iter().flat_map(|m| m.split('+')) {
        modifiers |= match part.to_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "shift" => KeyModifiers::SHIFT,
            "alt" => KeyModifiers::ALT,
            _ => return Err(format!("Unknown modifier: {}", part)),
        };
    }

    Ok(KeyBinding {
        code: parse_key_code(key_part)?,
        modifiers,
    })
}

fn parse_key_code(s: &str) -> Result<KeyCode, String> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    let lower = s.to_lowercase();
    let code = match lower.as_str() {
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" | "bs" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "esc" | "escape" => KeyCode::Esc,
        "space" => KeyCode::Char(' '),
        other => match other.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
            Some(n @ 1..=12) => KeyCode::F(n),
            _ => return Err(format!("Unknown key: {}", s)),
        },
    };
    Ok(code)
}
