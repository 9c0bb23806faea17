//! Input classification for emulated mouse and keyboard.
//!
//! This module turns raw touch streams into mouse clicks, drags and motion, and
//! on-screen keyboard presses into key transitions with latched modifier
//! context. Output goes to injected sinks; nothing here talks to a platform.

pub mod bridge;
pub mod events;
pub mod gesture;
pub mod keyboard;
pub mod keys;
pub mod layout;
pub mod modifiers;
pub mod sink;
pub mod timer;

// Re-export commonly used types at module level
pub use bridge::InputBridge;
pub use events::{ClickKind, InputEvent, MouseClickEvent, Point, TouchId, TouchSample};
pub use gesture::{GestureClassifier, GestureSettings, HoldState, TouchPoint};
pub use keyboard::{KeyDispatch, KeyboardModifierRouter, KeyboardSettings, KeyboardSurface};
pub use keys::{KeyCoded, KeyKind, KeySize, TOGGLE_KEYSET_CODE};
pub use layout::{KeyboardLayout, Side};
pub use modifiers::ModifierMask;
pub use sink::{HapticFeedback, KeyboardSink, MouseSink, RecordingSink, SinkEvent};
