//! Keyboard modifier bitmask.

use bitflags::bitflags;

use super::keys::codes;

bitflags! {
    /// Modifier context attached to every key transition sent downstream.
    ///
    /// Bit values match the libretro `RETROKMOD_*` flags so frontends can pass
    /// the mask straight through to their core.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierMask: u32 {
        const SHIFT = 0x01;
        const CTRL = 0x02;
        const ALT = 0x04;
    }
}

impl ModifierMask {
    /// Each recognized modifier bit with the key code that latches it.
    pub const LATCHABLE: [(Self, u32); 3] = [
        (Self::SHIFT, codes::LSHIFT),
        (Self::CTRL, codes::LCTRL),
        (Self::ALT, codes::LALT),
    ];

    /// Bit owned by a modifier key code, if the code is a recognized modifier.
    ///
    /// Only the left-hand variants are recognized; anything else maps to
    /// `None` and leaves the mask untouched.
    pub fn for_key_code(code: u32) -> Option<Self> {
        Self::LATCHABLE
            .iter()
            .find(|(_, latch_code)| *latch_code == code)
            .map(|(bit, _)| *bit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_hand_modifiers_map_to_one_bit_each() {
        assert_eq!(ModifierMask::for_key_code(codes::LSHIFT), Some(ModifierMask::SHIFT));
        assert_eq!(ModifierMask::for_key_code(codes::LCTRL), Some(ModifierMask::CTRL));
        assert_eq!(ModifierMask::for_key_code(codes::LALT), Some(ModifierMask::ALT));
    }

    #[test]
    fn other_codes_are_not_modifiers() {
        assert_eq!(ModifierMask::for_key_code(codes::RSHIFT), None);
        assert_eq!(ModifierMask::for_key_code(u32::from(b'a')), None);
        assert_eq!(ModifierMask::for_key_code(codes::TOGGLE_KEYSET), None);
    }
}
