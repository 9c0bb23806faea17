//! Touch-to-mouse gesture state machine.
//!
//! Classifies a multi-touch stream into the semantics of a single emulated
//! mouse:
//!
//! - one-finger tap: left click per counted tap
//! - one finger held still past the hold interval: left button down until lift
//! - two-finger tap: right click, ending any hold on the first finger
//! - any motion of the first finger: relative mouse movement
//!
//! Discrete clicks go through a FIFO queue that turns every press into a
//! press/release pulse; hold gestures drive the sink directly.

use std::collections::VecDeque;
use std::ops::RangeInclusive;
use std::time::{Duration, Instant};

use log::{debug, warn};

use super::events::{ClickKind, MouseClickEvent, Point, TouchId, TouchSample};
use super::sink::{HapticFeedback, MouseSink};
use super::timer::{TimerId, TimerQueue};
use crate::config::GestureConfig;
use crate::util;

#[cfg(test)]
mod tests;

/// Maximum drift, in surface units, before a pending hold is abandoned.
pub const DEFAULT_POSITION_CHANGE_THRESHOLD: f64 = 20.0;

/// How long a touch must stay put before it becomes a held left button.
pub const DEFAULT_MOUSE_HOLD_INTERVAL: Duration = Duration::from_millis(1000);

/// Delay between a queued click press and its synthesized release.
pub const AUTO_RELEASE_DELAY: Duration = Duration::from_millis(100);

/// Accepted range for the drift threshold.
pub const POSITION_CHANGE_THRESHOLD_RANGE: RangeInclusive<f64> = 1.0..=200.0;

/// Accepted range for the hold interval, in milliseconds.
pub const MOUSE_HOLD_INTERVAL_MS_RANGE: RangeInclusive<u64> = 100..=5000;

/// Runtime settings for the classifier.
#[derive(Debug, Clone)]
pub struct GestureSettings {
    pub enabled: bool,
    pub position_change_threshold: f64,
    pub mouse_hold_interval: Duration,
    pub haptic_feedback: bool,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            position_change_threshold: DEFAULT_POSITION_CHANGE_THRESHOLD,
            mouse_hold_interval: DEFAULT_MOUSE_HOLD_INTERVAL,
            haptic_feedback: true,
        }
    }
}

impl GestureSettings {
    /// Brings the threshold and hold interval into their accepted ranges.
    ///
    /// A NaN threshold falls back to the default, since no comparison
    /// against it would ever abandon a hold.
    pub fn sanitized(mut self) -> Self {
        let threshold = self.position_change_threshold;
        if !POSITION_CHANGE_THRESHOLD_RANGE.contains(&threshold) {
            let clamped = if threshold.is_nan() {
                DEFAULT_POSITION_CHANGE_THRESHOLD
            } else {
                threshold.clamp(
                    *POSITION_CHANGE_THRESHOLD_RANGE.start(),
                    *POSITION_CHANGE_THRESHOLD_RANGE.end(),
                )
            };
            warn!(
                "Position change threshold {} out of range, using {:.1}",
                threshold, clamped
            );
            self.position_change_threshold = clamped;
        }

        let min = Duration::from_millis(*MOUSE_HOLD_INTERVAL_MS_RANGE.start());
        let max = Duration::from_millis(*MOUSE_HOLD_INTERVAL_MS_RANGE.end());
        let interval = self.mouse_hold_interval;
        if interval < min || interval > max {
            self.mouse_hold_interval = interval.clamp(min, max);
            warn!(
                "Mouse hold interval {:?} out of range, using {:?}",
                interval, self.mouse_hold_interval
            );
        }
        self
    }
}

impl From<&GestureConfig> for GestureSettings {
    fn from(cfg: &GestureConfig) -> Self {
        Self {
            enabled: cfg.enabled,
            position_change_threshold: cfg.position_change_threshold,
            mouse_hold_interval: Duration::from_millis(cfg.mouse_hold_interval_ms),
            haptic_feedback: cfg.haptic_feedback,
        }
    }
}

/// Hold progress of the primary touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldState {
    /// No hold pending or active
    NotHeld,
    /// Hold timer running; the touch has not moved past the threshold
    Waiting,
    /// Hold confirmed; the emulated left button is down
    Held,
}

/// A tracked contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: TouchId,
    /// Where the contact started
    pub origin: Point,
    /// Last reported location
    pub location: Point,
    pub hold_state: HoldState,
}

impl TouchPoint {
    fn new(sample: &TouchSample, hold_state: HoldState) -> Self {
        Self {
            id: sample.id,
            origin: sample.location,
            location: sample.location,
            hold_state,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum GestureTimer {
    /// Confirms a hold for the given primary touch
    Hold(TouchId),
    /// Synthesizes the release half of a queued click
    AutoRelease(ClickKind),
}

/// Converts touch callbacks into mouse sink calls.
///
/// All entry points expect to be called from one serial queue, in the order
/// the platform delivered the events. Call [`poll`](Self::poll) whenever
/// [`next_deadline`](Self::next_deadline) passes so timers can fire.
pub struct GestureClassifier<M> {
    sink: M,
    haptics: Option<Box<dyn HapticFeedback + Send>>,
    settings: GestureSettings,
    primary: Option<TouchPoint>,
    secondary: Option<TouchPoint>,
    pending_hold: Option<TimerId>,
    timers: TimerQueue<GestureTimer>,
    clicks: VecDeque<MouseClickEvent>,
}

impl<M: MouseSink> GestureClassifier<M> {
    /// Creates a classifier; out-of-range settings are clamped first.
    pub fn new(sink: M, settings: GestureSettings) -> Self {
        Self {
            sink,
            haptics: None,
            settings: settings.sanitized(),
            primary: None,
            secondary: None,
            pending_hold: None,
            timers: TimerQueue::new(),
            clicks: VecDeque::new(),
        }
    }

    /// Attaches the feedback collaborator fired when a hold engages.
    pub fn with_haptics(mut self, haptics: Box<dyn HapticFeedback + Send>) -> Self {
        self.haptics = Some(haptics);
        self
    }

    pub fn sink(&self) -> &M {
        &self.sink
    }

    pub fn settings(&self) -> &GestureSettings {
        &self.settings
    }

    pub fn is_enabled(&self) -> bool {
        self.settings.enabled
    }

    /// Turns touch emulation on or off.
    ///
    /// Disabling drops every tracked touch the way a cancel does, so a drag in
    /// progress releases its button.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.settings.enabled == enabled {
            return;
        }
        if !enabled {
            self.cancel_tracking();
        }
        debug!("Touch mouse emulation {}", if enabled { "enabled" } else { "disabled" });
        self.settings.enabled = enabled;
    }

    pub fn primary(&self) -> Option<&TouchPoint> {
        self.primary.as_ref()
    }

    pub fn secondary(&self) -> Option<&TouchPoint> {
        self.secondary.as_ref()
    }

    pub fn tracked_touches(&self) -> usize {
        usize::from(self.primary.is_some()) + usize::from(self.secondary.is_some())
    }

    /// Earliest instant at which [`poll`](Self::poll) has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    fn is_tracked(&self, id: TouchId) -> bool {
        self.primary.is_some_and(|touch| touch.id == id)
            || self.secondary.is_some_and(|touch| touch.id == id)
    }

    pub fn touches_began(&mut self, touches: &[TouchSample], now: Instant) {
        if !self.settings.enabled {
            return;
        }

        for sample in touches {
            if self.is_tracked(sample.id) {
                continue;
            }
            if self.primary.is_none() {
                let hold_state = match now.checked_add(self.settings.mouse_hold_interval) {
                    Some(deadline) => {
                        self.pending_hold =
                            Some(self.timers.schedule(deadline, GestureTimer::Hold(sample.id)));
                        HoldState::Waiting
                    }
                    None => {
                        warn!("Hold deadline for touch {:?} overflows, hold disabled", sample.id);
                        HoldState::NotHeld
                    }
                };
                self.primary = Some(TouchPoint::new(sample, hold_state));
                debug!("Primary touch {:?} began at {:?}", sample.id, sample.location);
            } else if self.secondary.is_none() {
                self.secondary = Some(TouchPoint::new(sample, HoldState::NotHeld));
                debug!("Secondary touch {:?} began", sample.id);
            } else {
                debug!("Ignoring touch {:?}: both slots in use", sample.id);
            }
        }
    }

    pub fn touches_moved(&mut self, touches: &[TouchSample]) {
        if !self.settings.enabled {
            return;
        }

        for sample in touches {
            if let Some(primary) = self.primary.as_mut().filter(|t| t.id == sample.id) {
                let dx = sample.location.x - primary.location.x;
                let dy = sample.location.y - primary.location.y;
                primary.location = sample.location;

                let abandon_hold = primary.hold_state == HoldState::Waiting
                    && util::distance(primary.origin, sample.location)
                        > self.settings.position_change_threshold;
                if abandon_hold {
                    primary.hold_state = HoldState::NotHeld;
                    if let Some(timer) = self.pending_hold.take() {
                        self.timers.cancel(timer);
                    }
                    debug!("Touch {:?} moved past threshold, hold abandoned", sample.id);
                }

                self.sink.handle_mouse_move(dx, dy);
            } else if let Some(secondary) = self.secondary.as_mut().filter(|t| t.id == sample.id) {
                secondary.location = sample.location;
            }
        }
    }

    pub fn touches_ended(&mut self, touches: &[TouchSample], now: Instant) {
        if !self.settings.enabled {
            return;
        }

        // Secondary lifts first so a two-finger tap reported in one batch
        // reads as a right click no matter how the platform ordered it.
        let (secondaries, rest): (Vec<&TouchSample>, Vec<&TouchSample>) = touches
            .iter()
            .partition(|sample| self.secondary.is_some_and(|t| t.id == sample.id));

        for sample in secondaries {
            if sample.tap_count > 0 {
                debug!("Two-finger tap, right click");
                self.end_hold();
                self.enqueue_click(MouseClickEvent::press(ClickKind::Right), now);
                // The primary finger was part of this gesture; its own lift
                // must not produce a left click.
                self.primary = None;
            }
            self.secondary = None;
        }

        for sample in rest {
            if !self.primary.is_some_and(|t| t.id == sample.id) {
                continue;
            }
            self.end_hold();
            for _ in 0..sample.tap_count {
                self.enqueue_click(MouseClickEvent::press(ClickKind::Left), now);
            }
            self.primary = None;
            self.secondary = None;
        }

        self.sink.handle_mouse_move(0.0, 0.0);
    }

    pub fn touches_cancelled(&mut self, touches: &[TouchSample]) {
        if !self.settings.enabled {
            return;
        }
        if touches.iter().any(|sample| self.is_tracked(sample.id)) {
            debug!("Touches cancelled");
            self.cancel_tracking();
        }
    }

    /// Real pointer button from a hover-capable platform.
    ///
    /// Only forwarded while touch emulation is disabled.
    pub fn pointer_button(&mut self, kind: ClickKind, pressed: bool) {
        if self.settings.enabled {
            return;
        }
        self.sink.handle_mouse_click(kind.is_left(), pressed);
    }

    /// Real pointer hover position, forwarded while emulation is disabled.
    pub fn pointer_moved(&mut self, location: Point) {
        if self.settings.enabled {
            return;
        }
        self.sink.handle_pointer_move(location.x, location.y);
    }

    /// Fires every timer due at or before `now`.
    pub fn poll(&mut self, now: Instant) {
        while let Some((id, timer)) = self.timers.pop_due(now) {
            match timer {
                GestureTimer::Hold(touch) => self.confirm_hold(id, touch),
                GestureTimer::AutoRelease(kind) => {
                    self.enqueue_click(MouseClickEvent::release(kind), now);
                }
            }
        }
    }

    fn confirm_hold(&mut self, timer: TimerId, touch: TouchId) {
        if self.pending_hold != Some(timer) {
            return;
        }
        self.pending_hold = None;

        let Some(primary) = self.primary.as_mut().filter(|t| t.id == touch) else {
            return;
        };
        if primary.hold_state != HoldState::Waiting {
            return;
        }

        primary.hold_state = HoldState::Held;
        debug!("Touch {:?} held, left button down", touch);
        self.sink.handle_mouse_click(true, true);
        if self.settings.haptic_feedback {
            if let Some(haptics) = self.haptics.as_mut() {
                haptics.impact();
            }
        }
    }

    /// Stops any pending or active hold on the primary touch.
    fn end_hold(&mut self) {
        if let Some(timer) = self.pending_hold.take() {
            self.timers.cancel(timer);
        }
        if let Some(primary) = self.primary.as_mut() {
            if primary.hold_state == HoldState::Held {
                debug!("Hold on {:?} ended, left button up", primary.id);
                self.sink.handle_mouse_click(true, false);
            }
            primary.hold_state = HoldState::NotHeld;
        }
    }

    fn cancel_tracking(&mut self) {
        self.end_hold();
        self.primary = None;
        self.secondary = None;
    }

    fn enqueue_click(&mut self, event: MouseClickEvent, now: Instant) {
        self.clicks.push_back(event);
        self.drain_clicks(now);
    }

    /// Delivers queued clicks in arrival order, scheduling the release pulse
    /// for every press.
    fn drain_clicks(&mut self, now: Instant) {
        while let Some(event) = self.clicks.pop_front() {
            self.sink
                .handle_mouse_click(event.kind.is_left(), event.is_pressed);
            if event.is_pressed {
                self.timers
                    .schedule(now + AUTO_RELEASE_DELAY, GestureTimer::AutoRelease(event.kind));
            }
        }
    }
}
