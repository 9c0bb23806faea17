use log::debug;

use crate::input::keys::KeyCoded;
use crate::input::modifiers::ModifierMask;
use crate::input::sink::KeyboardSink;

/// Routes key presses to the keyboard sink with latched modifier context.
///
/// Modifier keys behave as toggles: pressing one flips its bit, releasing it
/// does nothing. Every other key is forwarded as a down/up pair carrying the
/// mask at that moment. The mask held here is the only record of which
/// modifiers are active; UI highlighting reads [`is_modifier_enabled`].
///
/// [`is_modifier_enabled`]: KeyboardModifierRouter::is_modifier_enabled
pub struct KeyboardModifierRouter<K> {
    sink: K,
    modifiers: ModifierMask,
}

impl<K: KeyboardSink> KeyboardModifierRouter<K> {
    pub fn new(sink: K) -> Self {
        Self {
            sink,
            modifiers: ModifierMask::empty(),
        }
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Current modifier bitmask.
    pub fn modifiers(&self) -> ModifierMask {
        self.modifiers
    }

    pub fn is_modifier_enabled(&self, key: &KeyCoded) -> bool {
        ModifierMask::for_key_code(key.code()).is_some_and(|bit| self.modifiers.contains(bit))
    }

    pub fn key_pressed(&mut self, key: &KeyCoded) {
        if key.is_keyset_toggle() {
            return;
        }
        if key.is_modifier() {
            let enabled = !self.is_modifier_enabled(key);
            self.toggle_modifier(key, enabled);
        } else {
            self.sink.key_down(key.code(), self.modifiers);
        }
    }

    pub fn key_released(&mut self, key: &KeyCoded) {
        if key.is_modifier() || key.is_keyset_toggle() {
            return;
        }
        self.sink.key_up(key.code(), self.modifiers);
    }

    /// Sets a modifier's latch and reports the transition downstream.
    ///
    /// Codes that own no modifier bit are ignored.
    fn toggle_modifier(&mut self, key: &KeyCoded, enabled: bool) {
        let Some(bit) = ModifierMask::for_key_code(key.code()) else {
            debug!("Key {} ({}) is not a recognized modifier", key.label(), key.code());
            return;
        };

        self.modifiers.set(bit, enabled);
        debug!(
            "Modifier {} {} (mask {:#04x})",
            key.label(),
            if enabled { "latched" } else { "released" },
            self.modifiers.bits()
        );

        if enabled {
            self.sink.key_down(key.code(), self.modifiers);
        } else {
            self.sink.key_up(key.code(), self.modifiers);
        }
    }

    /// Unlatches every modifier, sending a key-up for each so the sink's
    /// view ends at an empty mask too.
    pub fn reset(&mut self) {
        for (bit, code) in ModifierMask::LATCHABLE {
            if self.modifiers.contains(bit) {
                self.modifiers.remove(bit);
                debug!("Modifier {} released on reset", code);
                self.sink.key_up(code, self.modifiers);
            }
        }
    }
}
