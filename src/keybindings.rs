//! Customizable keybindings for the mask editor.
//!
//! This module maps key combinations to editor shortcuts (undo, redo,
//! delete, save, cancel, close polygon). Bindings are serializable so they
//! can travel inside the editor configuration.

use serde::{Deserialize, Serialize};

/// Modifier key state accompanying a key press or pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    pub fn meta() -> Self {
        Self {
            meta: true,
            ..Self::NONE
        }
    }

    /// Ctrl on Linux/Windows or Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Keys the editor can bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Key0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,
    Enter,
    Escape,
    Delete,
    Backspace,
    Space,
    Tab,
}

/// A key plus the modifiers that must be held with it.
///
/// `command` matches either Ctrl or Cmd so one binding works on every
/// platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyCombo {
    pub key: KeyCode,
    #[serde(default)]
    pub command: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub alt: bool,
}

impl KeyCombo {
    /// A bare key without modifiers.
    pub const fn key(key: KeyCode) -> Self {
        Self {
            key,
            command: false,
            shift: false,
            alt: false,
        }
    }

    /// Ctrl/Cmd + key.
    pub const fn command(key: KeyCode) -> Self {
        Self {
            key,
            command: true,
            shift: false,
            alt: false,
        }
    }

    /// Ctrl/Cmd + Shift + key.
    pub const fn command_shift(key: KeyCode) -> Self {
        Self {
            key,
            command: true,
            shift: true,
            alt: false,
        }
    }

    /// Check whether a key press triggers this combo.
    pub fn matches(&self, key: KeyCode, modifiers: Modifiers) -> bool {
        self.key == key
            && self.command == modifiers.command()
            && self.shift == modifiers.shift
            && self.alt == modifiers.alt
    }

    /// Display string such as `Ctrl+Shift+Z`.
    pub fn label(&self) -> String {
        let mut label = String::new();
        if self.command {
            label.push_str("Ctrl+");
        }
        if self.shift {
            label.push_str("Shift+");
        }
        if self.alt {
            label.push_str("Alt+");
        }
        label.push_str(key_to_string(self.key));
        label
    }
}

/// Editor actions reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shortcut {
    Undo,
    Redo,
    /// Delete the selected masks
    DeleteSelection,
    /// Request a persist of the current document
    Save,
    /// Cancel drawing and close popups
    Cancel,
    /// Close the outline being drawn
    ClosePolygon,
}

impl Shortcut {
    /// Get the display name for this shortcut.
    pub fn name(&self) -> &'static str {
        match self {
            Shortcut::Undo => "Undo",
            Shortcut::Redo => "Redo",
            Shortcut::DeleteSelection => "Delete selection",
            Shortcut::Save => "Save",
            Shortcut::Cancel => "Cancel",
            Shortcut::ClosePolygon => "Close polygon",
        }
    }

    /// Get all shortcuts.
    pub fn all() -> &'static [Shortcut] {
        &[
            Shortcut::Undo,
            Shortcut::Redo,
            Shortcut::DeleteSelection,
            Shortcut::Save,
            Shortcut::Cancel,
            Shortcut::ClosePolygon,
        ]
    }
}

/// Keybinding configuration for the editor.
///
/// Each shortcut may have several combos; the first match wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub undo: Vec<KeyCombo>,
    pub redo: Vec<KeyCombo>,
    pub delete_selection: Vec<KeyCombo>,
    pub save: Vec<KeyCombo>,
    pub cancel: Vec<KeyCombo>,
    pub close_polygon: Vec<KeyCombo>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            undo: vec![KeyCombo::command(KeyCode::Z)],
            redo: vec![
                KeyCombo::command(KeyCode::Y),
                KeyCombo::command_shift(KeyCode::Z),
            ],
            delete_selection: vec![
                KeyCombo::key(KeyCode::Delete),
                KeyCombo::key(KeyCode::Backspace),
            ],
            save: vec![KeyCombo::command(KeyCode::S)],
            cancel: vec![KeyCombo::key(KeyCode::Escape)],
            close_polygon: vec![KeyCombo::key(KeyCode::Enter)],
        }
    }
}

impl KeyBindings {
    /// Create new keybindings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the combos bound to a shortcut.
    pub fn combos_for(&self, shortcut: Shortcut) -> &[KeyCombo] {
        match shortcut {
            Shortcut::Undo => &self.undo,
            Shortcut::Redo => &self.redo,
            Shortcut::DeleteSelection => &self.delete_selection,
            Shortcut::Save => &self.save,
            Shortcut::Cancel => &self.cancel,
            Shortcut::ClosePolygon => &self.close_polygon,
        }
    }

    fn combos_for_mut(&mut self, shortcut: Shortcut) -> &mut Vec<KeyCombo> {
        match shortcut {
            Shortcut::Undo => &mut self.undo,
            Shortcut::Redo => &mut self.redo,
            Shortcut::DeleteSelection => &mut self.delete_selection,
            Shortcut::Save => &mut self.save,
            Shortcut::Cancel => &mut self.cancel,
            Shortcut::ClosePolygon => &mut self.close_polygon,
        }
    }

    /// Get the shortcut that corresponds to a key press, if any.
    pub fn shortcut_for(&self, key: KeyCode, modifiers: Modifiers) -> Option<Shortcut> {
        Shortcut::all().iter().copied().find(|&shortcut| {
            self.combos_for(shortcut)
                .iter()
                .any(|combo| combo.matches(key, modifiers))
        })
    }

    /// Replace every combo of a shortcut with a single one.
    pub fn set_binding(&mut self, shortcut: Shortcut, combo: KeyCombo) {
        *self.combos_for_mut(shortcut) = vec![combo];
    }

    /// Check if a combo is already used by another shortcut.
    pub fn key_conflict(&self, combo: KeyCombo, exclude: Option<Shortcut>) -> Option<Shortcut> {
        Shortcut::all()
            .iter()
            .copied()
            .filter(|&shortcut| Some(shortcut) != exclude)
            .find(|&shortcut| self.combos_for(shortcut).contains(&combo))
    }
}

/// Convert a KeyCode to a display string.
pub fn key_to_string(key: KeyCode) -> &'static str {
    match key {
        KeyCode::A => "A",
        KeyCode::B => "B",
        KeyCode::C => "C",
        KeyCode::D => "D",
        KeyCode::E => "E",
        KeyCode::F => "F",
        KeyCode::G => "G",
        KeyCode::H => "H",
        KeyCode::I => "I",
        KeyCode::J => "J",
        KeyCode::K => "K",
        KeyCode::L => "L",
        KeyCode::M => "M",
        KeyCode::N => "N",
        KeyCode::O => "O",
        KeyCode::P => "P",
        KeyCode::Q => "Q",
        KeyCode::R => "R",
        KeyCode::S => "S",
        KeyCode::T => "T",
        KeyCode::U => "U",
        KeyCode::V => "V",
        KeyCode::W => "W",
        KeyCode::X => "X",
        KeyCode::Y => "Y",
        KeyCode::Z => "Z",
        KeyCode::Key0 => "0",
        KeyCode::Key1 => "1",
        KeyCode::Key2 => "2",
        KeyCode::Key3 => "3",
        KeyCode::Key4 => "4",
        KeyCode::Key5 => "5",
        KeyCode::Key6 => "6",
        KeyCode::Key7 => "7",
        KeyCode::Key8 => "8",
        KeyCode::Key9 => "9",
        KeyCode::Enter => "Enter",
        KeyCode::Escape => "Esc",
        KeyCode::Delete => "Del",
        KeyCode::Backspace => "Backspace",
        KeyCode::Space => "Space",
        KeyCode::Tab => "Tab",
    }
}
