//! On-screen keyboard input routing.
//!
//! [`KeyboardSurface`] is what the platform talks to: it owns the key-list
//! model and a [`KeyboardModifierRouter`] for as long as the keyboard is on
//! screen, intercepts the keyset toggle, and drops spacers and sliders before
//! anything reaches the router.

mod router;

pub use router::KeyboardModifierRouter;

use log::{debug, info};

use super::keys::{KeyCoded, KeyKind};
use super::layout::KeyboardLayout;
use super::modifiers::ModifierMask;
use super::sink::KeyboardSink;
use crate::config::KeyboardConfig;

/// Runtime settings for the keyboard surface.
#[derive(Debug, Clone, Default)]
pub struct KeyboardSettings {
    pub show_on_start: bool,
    pub start_with_alternate: bool,
}

impl From<&KeyboardConfig> for KeyboardSettings {
    fn from(cfg: &KeyboardConfig) -> Self {
        Self {
            show_on_start: cfg.show_on_start,
            start_with_alternate: cfg.start_with_alternate,
        }
    }
}

/// What a press or release turned into.
///
/// Lets the UI refresh highlights and swap keysets without keeping state of
/// its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDispatch {
    KeyDown,
    KeyUp,
    ModifierToggled { enabled: bool },
    KeysetToggled { alternate: bool },
    Ignored,
}

pub struct KeyboardSurface<K> {
    layout: KeyboardLayout,
    router: KeyboardModifierRouter<K>,
    settings: KeyboardSettings,
    visible: bool,
}

impl<K: KeyboardSink> KeyboardSurface<K> {
    pub fn new(sink: K, layout: KeyboardLayout, settings: KeyboardSettings) -> Self {
        let mut surface = Self {
            layout,
            router: KeyboardModifierRouter::new(sink),
            settings,
            visible: false,
        };
        if surface.settings.show_on_start {
            surface.show();
        }
        surface
    }

    pub fn layout(&self) -> &KeyboardLayout {
        &self.layout
    }

    pub fn router(&self) -> &KeyboardModifierRouter<K> {
        &self.router
    }

    pub fn modifiers(&self) -> ModifierMask {
        self.router.modifiers()
    }

    pub fn is_modifier_enabled(&self, key: &KeyCoded) -> bool {
        self.router.is_modifier_enabled(key)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        if self.visible {
            return;
        }
        self.visible = true;
        self.layout.set_alternate(self.settings.start_with_alternate);
        info!("Keyboard shown");
    }

    /// Hides the keyboard, dropping every latched modifier.
    pub fn hide(&mut self) {
        if !self.visible {
            return;
        }
        self.visible = false;
        self.router.reset();
        self.layout.set_alternate(false);
        info!("Keyboard hidden");
    }

    pub fn press(&mut self, key: &KeyCoded) -> KeyDispatch {
        if !self.accepts(key) {
            return KeyDispatch::Ignored;
        }
        if key.is_keyset_toggle() {
            let alternate = self.layout.toggle_alternate();
            debug!("Keyset toggled, alternate={}", alternate);
            return KeyDispatch::KeysetToggled { alternate };
        }

        self.router.key_pressed(key);
        if key.is_modifier() {
            KeyDispatch::ModifierToggled {
                enabled: self.router.is_modifier_enabled(key),
            }
        } else {
            KeyDispatch::KeyDown
        }
    }

    pub fn release(&mut self, key: &KeyCoded) -> KeyDispatch {
        if !self.accepts(key) || key.is_keyset_toggle() || key.is_modifier() {
            return KeyDispatch::Ignored;
        }
        self.router.key_released(key);
        KeyDispatch::KeyUp
    }

    /// Presses the layout key with the given code.
    pub fn press_code(&mut self, code: u32) -> Option<KeyDispatch> {
        let key = self.layout.find(code)?.clone();
        Some(self.press(&key))
    }

    pub fn release_code(&mut self, code: u32) -> Option<KeyDispatch> {
        let key = self.layout.find(code)?.clone();
        Some(self.release(&key))
    }

    fn accepts(&self, key: &KeyCoded) -> bool {
        if !self.visible {
            debug!("Keyboard hidden, ignoring key {}", key.label());
            return false;
        }
        matches!(key.kind(), KeyKind::Key)
    }
}
