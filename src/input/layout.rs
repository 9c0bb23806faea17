//! Key-list model for the on-screen keyboard.
//!
//! The keyboard is split into a left and a right half so it can hug both edges
//! of a landscape screen. Each half has a primary keyset and an alternate one
//! (digits, function keys, navigation) reached through the toggle key.

use super::keys::{KeyCoded, KeySize, TOGGLE_KEYSET_CODE, codes};

/// Which half of the keyboard a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Rows of keys for both halves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Keyset {
    pub left: Vec<Vec<KeyCoded>>,
    pub right: Vec<Vec<KeyCoded>>,
}

impl Keyset {
    pub fn rows(&self, side: Side) -> &[Vec<KeyCoded>] {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &KeyCoded> {
        self.left.iter().chain(self.right.iter()).flatten()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyboardLayout {
    primary: Keyset,
    alternate: Keyset,
    alternate_active: bool,
}

impl Default for KeyboardLayout {
    fn default() -> Self {
        Self::new(default_primary(), default_alternate())
    }
}

impl KeyboardLayout {
    pub fn new(primary: Keyset, alternate: Keyset) -> Self {
        Self {
            primary,
            alternate,
            alternate_active: false,
        }
    }

    pub fn is_alternate(&self) -> bool {
        self.alternate_active
    }

    pub fn set_alternate(&mut self, alternate: bool) {
        self.alternate_active = alternate;
    }

    /// Flips to the other keyset and reports whether the alternate one is now showing.
    pub fn toggle_alternate(&mut self) -> bool {
        self.alternate_active = !self.alternate_active;
        self.alternate_active
    }

    /// Keyset currently on screen.
    pub fn active(&self) -> &Keyset {
        if self.alternate_active {
            &self.alternate
        } else {
            &self.primary
        }
    }

    pub fn rows(&self, side: Side) -> &[Vec<KeyCoded>] {
        self.active().rows(side)
    }

    /// Finds an interactive key by code, preferring the keyset on screen.
    pub fn find(&self, code: u32) -> Option<&KeyCoded> {
        let inactive = if self.alternate_active {
            &self.primary
        } else {
            &self.alternate
        };
        self.active()
            .keys()
            .chain(inactive.keys())
            .find(|key| key.is_interactive() && key.code() == code)
    }
}

fn letters(chars: &str) -> impl Iterator<Item = KeyCoded> + '_ {
    chars
        .chars()
        .map(|c| KeyCoded::new(c.to_ascii_uppercase().to_string(), codes::ascii(c)))
}

fn toggle_key(label: &str) -> KeyCoded {
    KeyCoded::new(label, TOGGLE_KEYSET_CODE)
        .with_icon("keyboard")
        .with_size(KeySize::Wide)
}

fn default_primary() -> Keyset {
    let mut left = vec![
        vec![
            KeyCoded::new("Esc", codes::ESCAPE),
            KeyCoded::new("Tab", codes::TAB),
            KeyCoded::spacer(KeySize::Standard),
            KeyCoded::new("`", codes::BACKQUOTE),
        ],
        letters("qwert").collect(),
        letters("asdfg").collect(),
        letters("zxcvb").collect(),
    ];
    left.push(vec![
        KeyCoded::modifier("Shift", codes::LSHIFT).with_icon("shift"),
        KeyCoded::modifier("Ctrl", codes::LCTRL),
        KeyCoded::modifier("Alt", codes::LALT).with_icon("option"),
    ]);
    left.push(vec![
        toggle_key("123"),
        KeyCoded::new("Space", codes::SPACE).with_size(KeySize::Wider),
    ]);

    let mut p_row: Vec<KeyCoded> = letters("yuiop").collect();
    p_row.push(KeyCoded::new("Bksp", codes::BACKSPACE).with_icon("delete.left"));
    let mut l_row: Vec<KeyCoded> = letters("hjkl").collect();
    l_row.push(KeyCoded::new(";", codes::SEMICOLON));
    l_row.push(
        KeyCoded::new("Enter", codes::RETURN)
            .with_icon("return")
            .with_size(KeySize::Wide),
    );
    let mut m_row: Vec<KeyCoded> = letters("nm").collect();
    m_row.extend([
        KeyCoded::new(",", codes::COMMA),
        KeyCoded::new(".", codes::PERIOD),
        KeyCoded::new("/", codes::SLASH),
    ]);

    let right = vec![
        p_row,
        l_row,
        m_row,
        vec![
            KeyCoded::spacer(KeySize::Standard),
            KeyCoded::new("Up", codes::UP).with_icon("arrow.up"),
            KeyCoded::spacer(KeySize::Standard),
        ],
        vec![
            KeyCoded::new("Left", codes::LEFT).with_icon("arrow.left"),
            KeyCoded::new("Down", codes::DOWN).with_icon("arrow.down"),
            KeyCoded::new("Right", codes::RIGHT).with_icon("arrow.right"),
        ],
    ];

    Keyset { left, right }
}

fn default_alternate() -> Keyset {
    let function_row = |range: std::ops::RangeInclusive<u32>| -> Vec<KeyCoded> {
        range
            .filter_map(|n| {
                codes::function(n).map(|code| KeyCoded::new(format!("F{n}"), code))
            })
            .collect()
    };

    let left = vec![
        function_row(1..=6),
        letters("12345").collect(),
        vec![
            KeyCoded::new("-", codes::MINUS),
            KeyCoded::new("=", codes::EQUALS),
            KeyCoded::new("[", codes::LEFTBRACKET),
            KeyCoded::new("]", codes::RIGHTBRACKET),
            KeyCoded::new("\\", codes::BACKSLASH),
        ],
        vec![
            KeyCoded::modifier("Shift", codes::LSHIFT).with_icon("shift"),
            KeyCoded::modifier("Ctrl", codes::LCTRL),
            KeyCoded::modifier("Alt", codes::LALT).with_icon("option"),
        ],
        vec![toggle_key("ABC"), KeyCoded::slider("Opacity", 0.1, 1.0)],
    ];

    let right = vec![
        function_row(7..=12),
        letters("67890").collect(),
        vec![
            KeyCoded::new("'", codes::QUOTE),
            KeyCoded::new("Ins", codes::INSERT),
            KeyCoded::new("Del", codes::DELETE),
        ],
        vec![
            KeyCoded::new("Home", codes::HOME),
            KeyCoded::new("End", codes::END),
            KeyCoded::new("PgUp", codes::PAGEUP),
            KeyCoded::new("PgDn", codes::PAGEDOWN),
        ],
    ];

    Keyset { left, right }
}
