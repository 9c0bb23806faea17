//! Single owner of the gesture classifier and the keyboard surface.

use std::time::Instant;

use log::debug;

use super::events::InputEvent;
use super::gesture::{GestureClassifier, GestureSettings};
use super::keyboard::{KeyDispatch, KeyboardSettings, KeyboardSurface};
use super::layout::KeyboardLayout;
use super::sink::{HapticFeedback, KeyboardSink, MouseSink};
use crate::config::Config;

/// Routes platform events to the right state machine.
///
/// Whoever owns the bridge is the serial queue: every event and every timer
/// poll goes through `&mut self`, so ordering is simply call order.
pub struct InputBridge<M, K> {
    gesture: GestureClassifier<M>,
    keyboard: KeyboardSurface<K>,
}

impl<M: MouseSink, K: KeyboardSink> InputBridge<M, K> {
    pub fn new(gesture: GestureClassifier<M>, keyboard: KeyboardSurface<K>) -> Self {
        Self { gesture, keyboard }
    }

    /// Builds both state machines from loaded configuration.
    pub fn from_config(
        config: &Config,
        mouse: M,
        keyboard: K,
        haptics: Option<Box<dyn HapticFeedback + Send>>,
    ) -> Self {
        let mut gesture = GestureClassifier::new(mouse, GestureSettings::from(&config.gesture));
        if let Some(haptics) = haptics {
            gesture = gesture.with_haptics(haptics);
        }
        let keyboard = KeyboardSurface::new(
            keyboard,
            KeyboardLayout::default(),
            KeyboardSettings::from(&config.keyboard),
        );
        Self::new(gesture, keyboard)
    }

    pub fn gesture(&self) -> &GestureClassifier<M> {
        &self.gesture
    }

    pub fn keyboard(&self) -> &KeyboardSurface<K> {
        &self.keyboard
    }

    /// Processes one event at `now`.
    ///
    /// Timers due before `now` fire first so they keep their place in line.
    /// Key events report what they turned into; everything else yields `None`.
    pub fn handle(&mut self, event: InputEvent, now: Instant) -> Option<KeyDispatch> {
        self.poll(now);
        debug!("Input event: {:?}", event);

        match event {
            InputEvent::TouchesBegan(touches) => self.gesture.touches_began(&touches, now),
            InputEvent::TouchesMoved(touches) => self.gesture.touches_moved(&touches),
            InputEvent::TouchesEnded(touches) => self.gesture.touches_ended(&touches, now),
            InputEvent::TouchesCancelled(touches) => self.gesture.touches_cancelled(&touches),
            InputEvent::PointerButton { kind, pressed } => {
                self.gesture.pointer_button(kind, pressed)
            }
            InputEvent::PointerMoved(location) => self.gesture.pointer_moved(location),
            InputEvent::SetMouseEnabled(enabled) => self.gesture.set_enabled(enabled),
            InputEvent::KeyPressed(key) => return Some(self.keyboard.press(&key)),
            InputEvent::KeyReleased(key) => return Some(self.keyboard.release(&key)),
            InputEvent::ShowKeyboard => self.keyboard.show(),
            InputEvent::HideKeyboard => self.keyboard.hide(),
        }
        None
    }

    pub fn poll(&mut self, now: Instant) {
        self.gesture.poll(now);
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.gesture.next_deadline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::events::TouchSample;
    use crate::input::keys::codes;
    use crate::input::sink::{RecordingSink, SinkEvent};
    use std::time::Duration;

    fn create_bridge() -> (InputBridge<RecordingSink, RecordingSink>, RecordingSink) {
        let recorder = RecordingSink::new();
        let bridge = InputBridge::from_config(
            &Config::default(),
            recorder.clone(),
            recorder.clone(),
            Some(Box::new(recorder.clone())),
        );
        (bridge, recorder)
    }

    #[test]
    fn pending_timers_fire_before_the_next_event() {
        let (mut bridge, recorder) = create_bridge();
        let t0 = Instant::now();

        bridge.handle(InputEvent::TouchesBegan(vec![TouchSample::new(1, 5.0, 5.0)]), t0);
        assert_eq!(bridge.next_deadline(), Some(t0 + Duration::from_secs(1)));

        // The lift arrives late; the hold must have engaged first.
        bridge.handle(
            InputEvent::TouchesEnded(vec![TouchSample::new(1, 5.0, 5.0)]),
            t0 + Duration::from_millis(1200),
        );
        assert_eq!(
            recorder.events(),
            vec![
                SinkEvent::MouseClick { left: true, pressed: true },
                SinkEvent::Haptic,
                SinkEvent::MouseClick { left: true, pressed: false },
                SinkEvent::MouseMove { dx: 0.0, dy: 0.0 },
            ]
        );
    }

    #[test]
    fn key_events_report_dispatch() {
        let (mut bridge, recorder) = create_bridge();
        let now = Instant::now();
        let shift = bridge.keyboard().layout().find(codes::LSHIFT).cloned();
        let Some(shift) = shift else {
            panic!("default layout has a shift key");
        };

        assert_eq!(
            bridge.handle(InputEvent::KeyPressed(shift.clone()), now),
            Some(KeyDispatch::ModifierToggled { enabled: true })
        );
        assert!(bridge.keyboard().is_modifier_enabled(&shift));
        assert_eq!(bridge.handle(InputEvent::HideKeyboard, now), None);
        assert!(!bridge.keyboard().is_modifier_enabled(&shift));
        assert_eq!(
            recorder.events(),
            vec![
                SinkEvent::KeyDown { code: codes::LSHIFT, modifiers: 1 },
                SinkEvent::KeyUp { code: codes::LSHIFT, modifiers: 0 },
            ]
        );
    }
}
