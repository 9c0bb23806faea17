//! Generic input event types shared by the platform layer and the classifiers.

use serde::{Deserialize, Serialize};

use super::keys::KeyCoded;

/// Opaque identity of a physical touch contact.
///
/// Platform layers map their native touch handles to these values; the
/// classifier only ever compares them for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TouchId(pub u64);

/// Position in the coordinate space of the touch surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One touch as reported by a begin/move/end/cancel callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSample {
    /// Contact identity, stable for the lifetime of the touch
    pub id: TouchId,
    /// Current location of the contact
    pub location: Point,
    /// Number of quick taps the platform counted for this contact
    pub tap_count: u32,
}

impl TouchSample {
    pub fn new(id: u64, x: f64, y: f64) -> Self {
        Self {
            id: TouchId(id),
            location: Point::new(x, y),
            tap_count: 0,
        }
    }

    pub fn with_taps(mut self, tap_count: u32) -> Self {
        self.tap_count = tap_count;
        self
    }
}

/// Which emulated mouse button a click targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickKind {
    Left,
    Right,
}

impl ClickKind {
    pub fn is_left(self) -> bool {
        matches!(self, ClickKind::Left)
    }

    pub fn from_left(is_left: bool) -> Self {
        if is_left {
            ClickKind::Left
        } else {
            ClickKind::Right
        }
    }
}

/// A queued click intent waiting to be delivered to the mouse sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseClickEvent {
    pub kind: ClickKind,
    pub is_pressed: bool,
}

impl MouseClickEvent {
    pub fn press(kind: ClickKind) -> Self {
        Self {
            kind,
            is_pressed: true,
        }
    }

    pub fn release(kind: ClickKind) -> Self {
        Self {
            kind,
            is_pressed: false,
        }
    }
}

/// Everything the platform can feed into an [`InputBridge`](super::InputBridge).
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    TouchesBegan(Vec<TouchSample>),
    TouchesMoved(Vec<TouchSample>),
    TouchesEnded(Vec<TouchSample>),
    TouchesCancelled(Vec<TouchSample>),
    /// Real pointer button reported by hover-capable platforms
    PointerButton { kind: ClickKind, pressed: bool },
    /// Real pointer hover position
    PointerMoved(Point),
    /// Toggle touch-to-mouse emulation
    SetMouseEnabled(bool),
    KeyPressed(KeyCoded),
    KeyReleased(KeyCoded),
    ShowKeyboard,
    HideKeyboard,
}
