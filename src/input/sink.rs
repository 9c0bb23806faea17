//! Downstream collaborators that receive classified mouse and keyboard events.
//!
//! The classifiers never inject input themselves; they call into these traits.
//! Frontends implement them on top of their input-injection API.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;

use super::modifiers::ModifierMask;

/// Receives emulated mouse activity.
pub trait MouseSink {
    fn handle_mouse_click(&mut self, is_left_click: bool, is_pressed: bool);

    /// Relative pointer motion.
    fn handle_mouse_move(&mut self, dx: f64, dy: f64);

    /// Absolute pointer position on platforms that report hover.
    fn handle_pointer_move(&mut self, _x: f64, _y: f64) {}
}

/// Receives key transitions together with the modifier context at that time.
pub trait KeyboardSink {
    fn key_down(&mut self, code: u32, modifiers: ModifierMask);
    fn key_up(&mut self, code: u32, modifiers: ModifierMask);
}

/// Physical feedback fired when a hold gesture engages.
pub trait HapticFeedback {
    fn impact(&mut self);
}

/// One call observed on a [`RecordingSink`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SinkEvent {
    MouseClick { left: bool, pressed: bool },
    MouseMove { dx: f64, dy: f64 },
    PointerMove { x: f64, y: f64 },
    KeyDown { code: u32, modifiers: u32 },
    KeyUp { code: u32, modifiers: u32 },
    Haptic,
}

impl fmt::Display for SinkEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkEvent::MouseClick { left, pressed } => write!(
                f,
                "click {} {}",
                if *left { "left" } else { "right" },
                if *pressed { "down" } else { "up" }
            ),
            SinkEvent::MouseMove { dx, dy } => write!(f, "move {dx:+.1} {dy:+.1}"),
            SinkEvent::PointerMove { x, y } => write!(f, "pointer {x:.1} {y:.1}"),
            SinkEvent::KeyDown { code, modifiers } => {
                write!(f, "key down {code} mods={modifiers:#04x}")
            }
            SinkEvent::KeyUp { code, modifiers } => write!(f, "key up {code} mods={modifiers:#04x}"),
            SinkEvent::Haptic => write!(f, "haptic"),
        }
    }
}

/// Shared recorder implementing every sink trait.
///
/// Clones share one event log, so a single recorder can be handed to both the
/// gesture classifier and the keyboard router (or moved into the input service)
/// while the caller keeps a handle for inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<SinkEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn log(&self) -> MutexGuard<'_, Vec<SinkEvent>> {
        // A panicking test thread must not hide what was recorded before it.
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn push(&self, event: SinkEvent) {
        self.log().push(event);
    }

    /// Copy of everything recorded so far.
    pub fn events(&self) -> Vec<SinkEvent> {
        self.log().clone()
    }

    /// Removes and returns everything recorded so far.
    pub fn take(&self) -> Vec<SinkEvent> {
        std::mem::take(&mut *self.log())
    }

    /// Recorded click events only, as `(is_left, is_pressed)` pairs.
    pub fn clicks(&self) -> Vec<(bool, bool)> {
        self.log()
            .iter()
            .filter_map(|event| match event {
                SinkEvent::MouseClick { left, pressed } => Some((*left, *pressed)),
                _ => None,
            })
            .collect()
    }
}

impl MouseSink for RecordingSink {
    fn handle_mouse_click(&mut self, is_left_click: bool, is_pressed: bool) {
        self.push(SinkEvent::MouseClick {
            left: is_left_click,
            pressed: is_pressed,
        });
    }

    fn handle_mouse_move(&mut self, dx: f64, dy: f64) {
        self.push(SinkEvent::MouseMove { dx, dy });
    }

    fn handle_pointer_move(&mut self, x: f64, y: f64) {
        self.push(SinkEvent::PointerMove { x, y });
    }
}

impl KeyboardSink for RecordingSink {
    fn key_down(&mut self, code: u32, modifiers: ModifierMask) {
        self.push(SinkEvent::KeyDown {
            code,
            modifiers: modifiers.bits(),
        });
    }

    fn key_up(&mut self, code: u32, modifiers: ModifierMask) {
        self.push(SinkEvent::KeyUp {
            code,
            modifiers: modifiers.bits(),
        });
    }
}

impl HapticFeedback for RecordingSink {
    fn impact(&mut self) {
        self.push(SinkEvent::Haptic);
    }
}
