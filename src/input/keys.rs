//! Key descriptors for the on-screen keyboard.

use serde::{Deserialize, Serialize};

/// Key codes understood by the downstream keyboard sink.
///
/// Values follow the libretro `RETROK_*` numbering. Letters and digits use
/// their lowercase ASCII values.
pub mod codes {
    pub const BACKSPACE: u32 = 8;
    pub const TAB: u32 = 9;
    pub const RETURN: u32 = 13;
    pub const ESCAPE: u32 = 27;
    pub const SPACE: u32 = 32;
    pub const QUOTE: u32 = 39;
    pub const COMMA: u32 = 44;
    pub const MINUS: u32 = 45;
    pub const PERIOD: u32 = 46;
    pub const SLASH: u32 = 47;
    pub const SEMICOLON: u32 = 59;
    pub const EQUALS: u32 = 61;
    pub const LEFTBRACKET: u32 = 91;
    pub const BACKSLASH: u32 = 92;
    pub const RIGHTBRACKET: u32 = 93;
    pub const BACKQUOTE: u32 = 96;
    pub const DELETE: u32 = 127;

    pub const UP: u32 = 273;
    pub const DOWN: u32 = 274;
    pub const RIGHT: u32 = 275;
    pub const LEFT: u32 = 276;
    pub const INSERT: u32 = 277;
    pub const HOME: u32 = 278;
    pub const END: u32 = 279;
    pub const PAGEUP: u32 = 280;
    pub const PAGEDOWN: u32 = 281;

    /// F1; F2..F12 follow consecutively.
    pub const F1: u32 = 282;

    pub const RSHIFT: u32 = 303;
    pub const LSHIFT: u32 = 304;
    pub const RCTRL: u32 = 305;
    pub const LCTRL: u32 = 306;
    pub const RALT: u32 = 307;
    pub const LALT: u32 = 308;

    /// Switches the layout between the primary and alternate keysets.
    /// Never forwarded to the keyboard sink.
    pub const TOGGLE_KEYSET: u32 = 9000;

    /// Code for a letter or digit character.
    pub const fn ascii(c: char) -> u32 {
        c.to_ascii_lowercase() as u32
    }

    /// Code for function key `F{n}`. Only `F1` through `F12` exist.
    pub const fn function(n: u32) -> Option<u32> {
        match n {
            1..=12 => Some(F1 + n - 1),
            _ => None,
        }
    }
}

/// Sentinel code for the "toggle alternate keyset" control.
pub const TOGGLE_KEYSET_CODE: u32 = codes::TOGGLE_KEYSET;

/// Relative width of a key in its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeySize {
    #[default]
    Standard,
    Wide,
    Wider,
}

/// What kind of control a [`KeyCoded`] describes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyKind {
    /// Discrete key that produces press/release events
    Key,
    /// Layout-only gap, never interactive
    Spacer,
    /// Continuous value control spanning `min..=max`
    Slider { min: f32, max: f32 },
}

/// Immutable description of one on-screen key.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyCoded {
    label: String,
    icon: Option<String>,
    code: u32,
    size: KeySize,
    is_modifier: bool,
    kind: KeyKind,
}

impl KeyCoded {
    /// Ordinary key.
    pub fn new(label: impl Into<String>, code: u32) -> Self {
        Self {
            label: label.into(),
            icon: None,
            code,
            size: KeySize::Standard,
            is_modifier: false,
            kind: KeyKind::Key,
        }
    }

    /// Latched modifier key (shift/ctrl/alt).
    pub fn modifier(label: impl Into<String>, code: u32) -> Self {
        Self {
            is_modifier: true,
            size: KeySize::Wide,
            ..Self::new(label, code)
        }
    }

    /// Non-interactive layout gap.
    pub fn spacer(size: KeySize) -> Self {
        Self {
            size,
            kind: KeyKind::Spacer,
            ..Self::new("", 0)
        }
    }

    pub fn slider(label: impl Into<String>, min: f32, max: f32) -> Self {
        Self {
            size: KeySize::Wider,
            kind: KeyKind::Slider { min, max },
            ..Self::new(label, 0)
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_size(mut self, size: KeySize) -> Self {
        self.size = size;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn code(&self) -> u32 {
        self.code
    }

    pub fn size(&self) -> KeySize {
        self.size
    }

    pub fn is_modifier(&self) -> bool {
        self.is_modifier
    }

    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    /// Whether pressing this key can produce key events at all.
    pub fn is_interactive(&self) -> bool {
        matches!(self.kind, KeyKind::Key)
    }

    pub fn is_keyset_toggle(&self) -> bool {
        self.is_interactive() && self.code == TOGGLE_KEYSET_CODE
    }
}
