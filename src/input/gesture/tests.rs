use super::*;
use crate::input::sink::{RecordingSink, SinkEvent};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn create_classifier() -> (GestureClassifier<RecordingSink>, RecordingSink, Instant) {
    let recorder = RecordingSink::new();
    let classifier = GestureClassifier::new(recorder.clone(), GestureSettings::default())
        .with_haptics(Box::new(recorder.clone()));
    (classifier, recorder, Instant::now())
}

fn touch(id: u64, x: f64, y: f64) -> TouchSample {
    TouchSample::new(id, x, y)
}

const FLUSH: SinkEvent = SinkEvent::MouseMove { dx: 0.0, dy: 0.0 };

fn click(left: bool, pressed: bool) -> SinkEvent {
    SinkEvent::MouseClick { left, pressed }
}

#[test]
fn third_concurrent_touch_is_ignored() {
    let (mut classifier, _, t0) = create_classifier();

    classifier.touches_began(&[touch(1, 10.0, 10.0), touch(2, 50.0, 50.0)], t0);
    classifier.touches_began(&[touch(3, 90.0, 90.0)], t0);

    assert_eq!(classifier.tracked_touches(), 2);
    assert_eq!(classifier.primary().map(|t| t.id), Some(TouchId(1)));
    assert_eq!(classifier.secondary().map(|t| t.id), Some(TouchId(2)));
    assert_eq!(classifier.primary().map(|t| t.hold_state), Some(HoldState::Waiting));
    assert_eq!(classifier.secondary().map(|t| t.hold_state), Some(HoldState::NotHeld));
}

#[test]
fn ignored_touch_cannot_drive_the_mouse() {
    let (mut classifier, recorder, t0) = create_classifier();

    classifier.touches_began(&[touch(1, 10.0, 10.0), touch(2, 50.0, 50.0)], t0);
    classifier.touches_began(&[touch(3, 90.0, 90.0)], t0);
    classifier.touches_moved(&[touch(3, 200.0, 200.0)]);
    classifier.touches_ended(&[touch(3, 200.0, 200.0).with_taps(1)], t0 + ms(50));

    assert_eq!(recorder.events(), vec![FLUSH]);
    assert_eq!(classifier.tracked_touches(), 2);
}

#[test]
fn stationary_touch_becomes_hold_exactly_once() {
    let (mut classifier, recorder, t0) = create_classifier();

    classifier.touches_began(&[touch(1, 100.0, 100.0)], t0);
    classifier.poll(t0 + ms(999));
    assert!(recorder.events().is_empty());

    classifier.poll(t0 + ms(1000));
    assert_eq!(recorder.take(), vec![click(true, true), SinkEvent::Haptic]);
    assert_eq!(classifier.primary().map(|t| t.hold_state), Some(HoldState::Held));

    classifier.poll(t0 + ms(10_000));
    assert!(recorder.events().is_empty());
    assert_eq!(classifier.next_deadline(), None);

    classifier.touches_ended(&[touch(1, 100.0, 100.0)], t0 + ms(10_500));
    assert_eq!(recorder.take(), vec![click(true, false), FLUSH]);
    assert_eq!(classifier.tracked_touches(), 0);
}

#[test]
fn held_touch_drags_with_relative_motion() {
    let (mut classifier, recorder, t0) = create_classifier();

    classifier.touches_began(&[touch(1, 100.0, 100.0)], t0);
    classifier.poll(t0 + ms(1000));
    recorder.take();

    classifier.touches_moved(&[touch(1, 130.0, 90.0)]);
    classifier.touches_moved(&[touch(1, 160.0, 90.0)]);
    assert_eq!(
        recorder.take(),
        vec![
            SinkEvent::MouseMove { dx: 30.0, dy: -10.0 },
            SinkEvent::MouseMove { dx: 30.0, dy: 0.0 },
        ]
    );
    // Still held; moving does not drop the button.
    assert_eq!(classifier.primary().map(|t| t.hold_state), Some(HoldState::Held));
}

#[test]
fn moving_past_threshold_abandons_pending_hold() {
    let (mut classifier, recorder, t0) = create_classifier();

    classifier.touches_began(&[touch(1, 100.0, 100.0)], t0);
    classifier.touches_moved(&[touch(1, 125.0, 100.0)]);
    assert_eq!(classifier.primary().map(|t| t.hold_state), Some(HoldState::NotHeld));

    classifier.poll(t0 + ms(5000));
    assert_eq!(recorder.clicks(), vec![]);
    assert_eq!(
        recorder.events(),
        vec![SinkEvent::MouseMove { dx: 25.0, dy: 0.0 }]
    );
}

#[test]
fn threshold_is_measured_from_origin() {
    let (mut classifier, recorder, t0) = create_classifier();

    classifier.touches_began(&[touch(1, 100.0, 100.0)], t0);
    // Each step is small but together they drift 24 units from the origin.
    for step in 1..=4 {
        let offset = 6.0 * f64::from(step);
        classifier.touches_moved(&[touch(1, 100.0 + offset, 100.0)]);
    }
    assert_eq!(classifier.primary().map(|t| t.hold_state), Some(HoldState::NotHeld));

    classifier.poll(t0 + ms(2000));
    assert!(recorder.clicks().is_empty());
}

#[test]
fn small_jitter_keeps_hold_pending() {
    let (mut classifier, recorder, t0) = create_classifier();

    classifier.touches_began(&[touch(1, 100.0, 100.0)], t0);
    // Exactly on the threshold is not past it.
    classifier.touches_moved(&[touch(1, 112.0, 116.0)]);
    classifier.touches_moved(&[touch(1, 105.0, 103.0)]);
    assert_eq!(classifier.primary().map(|t| t.hold_state), Some(HoldState::Waiting));

    classifier.poll(t0 + ms(1000));
    assert_eq!(recorder.clicks(), vec![(true, true)]);
}

#[test]
fn diagonal_move_counts_toward_threshold() {
    let (mut classifier, _, t0) = create_classifier();

    classifier.touches_began(&[touch(1, 0.0, 0.0)], t0);
    // A product-based distance would read zero here.
    classifier.touches_moved(&[touch(1, 21.0, 0.0)]);
    assert_eq!(classifier.primary().map(|t| t.hold_state), Some(HoldState::NotHeld));
}

#[test]
fn multi_tap_produces_one_pulse_per_tap() {
    let (mut classifier, recorder, t0) = create_classifier();

    classifier.touches_began(&[touch(1, 100.0, 100.0)], t0);
    classifier.touches_ended(&[touch(1, 100.0, 100.0).with_taps(3)], t0 + ms(80));
    assert_eq!(
        recorder.take(),
        vec![click(true, true), click(true, true), click(true, true), FLUSH]
    );

    classifier.poll(t0 + ms(179));
    assert!(recorder.events().is_empty());

    classifier.poll(t0 + ms(180));
    assert_eq!(
        recorder.take(),
        vec![click(true, false), click(true, false), click(true, false)]
    );
    // The hold timer was cancelled by the lift.
    classifier.poll(t0 + ms(5000));
    assert!(recorder.events().is_empty());
}

#[test]
fn releases_follow_presses_in_enqueue_order() {
    let (mut classifier, recorder, t0) = create_classifier();

    classifier.touches_began(&[touch(1, 10.0, 10.0)], t0);
    classifier.touches_ended(&[touch(1, 10.0, 10.0).with_taps(1)], t0);
    classifier.touches_began(&[touch(2, 10.0, 10.0), touch(3, 40.0, 10.0)], t0 + ms(50));
    classifier.touches_ended(
        &[touch(2, 10.0, 10.0).with_taps(1), touch(3, 40.0, 10.0).with_taps(1)],
        t0 + ms(50),
    );
    recorder.take();

    classifier.poll(t0 + ms(100));
    assert_eq!(recorder.take(), vec![click(true, false)]);
    classifier.poll(t0 + ms(150));
    assert_eq!(recorder.take(), vec![click(false, false)]);
}

#[test]
fn two_finger_tap_while_hold_pending_is_right_click() {
    let (mut classifier, recorder, t0) = create_classifier();

    classifier.touches_began(&[touch(1, 100.0, 100.0)], t0);
    classifier.touches_began(&[touch(2, 160.0, 100.0)], t0 + ms(20));
    // Platform reports the primary first; the secondary still wins.
    classifier.touches_ended(
        &[touch(1, 100.0, 100.0).with_taps(1), touch(2, 160.0, 100.0).with_taps(1)],
        t0 + ms(120),
    );

    assert_eq!(recorder.take(), vec![click(false, true), FLUSH]);
    assert_eq!(classifier.tracked_touches(), 0);

    classifier.poll(t0 + ms(220));
    assert_eq!(recorder.take(), vec![click(false, false)]);

    classifier.poll(t0 + ms(5000));
    assert!(recorder.events().is_empty());
}

#[test]
fn two_finger_tap_while_held_ends_drag_then_right_clicks() {
    let (mut classifier, recorder, t0) = create_classifier();

    classifier.touches_began(&[touch(1, 100.0, 100.0)], t0);
    classifier.poll(t0 + ms(1000));
    recorder.take();

    classifier.touches_began(&[touch(2, 160.0, 100.0)], t0 + ms(1100));
    classifier.touches_ended(&[touch(2, 160.0, 100.0).with_taps(1)], t0 + ms(1150));
    assert_eq!(
        recorder.take(),
        vec![click(true, false), click(false, true), FLUSH]
    );

    // The consumed primary lifts later without further clicks.
    classifier.touches_ended(&[touch(1, 100.0, 100.0).with_taps(1)], t0 + ms(1200));
    assert_eq!(recorder.take(), vec![FLUSH]);

    classifier.poll(t0 + ms(1250));
    assert_eq!(recorder.take(), vec![click(false, false)]);
}

#[test]
fn secondary_drag_without_tap_is_not_a_right_click() {
    let (mut classifier, recorder, t0) = create_classifier();

    classifier.touches_began(&[touch(1, 100.0, 100.0)], t0);
    classifier.touches_began(&[touch(2, 160.0, 100.0)], t0);
    classifier.touches_moved(&[touch(2, 260.0, 100.0)]);
    classifier.touches_ended(&[touch(2, 260.0, 100.0)], t0 + ms(300));

    assert!(recorder.clicks().is_empty());
    assert_eq!(classifier.secondary(), None);
    assert_eq!(classifier.primary().map(|t| t.hold_state), Some(HoldState::Waiting));
}

#[test]
fn incomplete_tap_only_flushes_motion() {
    let (mut classifier, recorder, t0) = create_classifier();

    classifier.touches_began(&[touch(1, 100.0, 100.0)], t0);
    classifier.touches_ended(&[touch(1, 100.0, 100.0)], t0 + ms(400));
    classifier.poll(t0 + ms(5000));

    assert_eq!(recorder.events(), vec![FLUSH]);
}

#[test]
fn cancel_releases_held_button_without_clicking() {
    let (mut classifier, recorder, t0) = create_classifier();

    classifier.touches_began(&[touch(1, 100.0, 100.0), touch(2, 150.0, 100.0)], t0);
    classifier.poll(t0 + ms(1000));
    recorder.take();

    classifier.touches_cancelled(&[touch(1, 100.0, 100.0)]);
    assert_eq!(recorder.take(), vec![click(true, false)]);
    assert_eq!(classifier.tracked_touches(), 0);

    classifier.touches_ended(&[touch(2, 150.0, 100.0).with_taps(1)], t0 + ms(1100));
    assert!(recorder.clicks().is_empty());
}

#[test]
fn cancel_of_unknown_touch_is_ignored() {
    let (mut classifier, _, t0) = create_classifier();

    classifier.touches_began(&[touch(1, 100.0, 100.0)], t0);
    classifier.touches_cancelled(&[touch(7, 0.0, 0.0)]);
    assert_eq!(classifier.tracked_touches(), 1);
}

#[test]
fn disabled_classifier_forwards_pointer_only() {
    let (mut classifier, recorder, t0) = create_classifier();
    classifier.set_enabled(false);

    classifier.touches_began(&[touch(1, 100.0, 100.0)], t0);
    classifier.touches_ended(&[touch(1, 100.0, 100.0).with_taps(1)], t0);
    classifier.poll(t0 + ms(2000));
    assert!(recorder.events().is_empty());

    classifier.pointer_moved(Point::new(12.0, 34.0));
    classifier.pointer_button(ClickKind::Right, true);
    classifier.pointer_button(ClickKind::Right, false);
    assert_eq!(
        recorder.take(),
        vec![
            SinkEvent::PointerMove { x: 12.0, y: 34.0 },
            click(false, true),
            click(false, false),
        ]
    );

    classifier.set_enabled(true);
    classifier.pointer_button(ClickKind::Left, true);
    assert!(recorder.events().is_empty());
}

#[test]
fn disabling_mid_drag_releases_button() {
    let (mut classifier, recorder, t0) = create_classifier();

    classifier.touches_began(&[touch(1, 100.0, 100.0)], t0);
    classifier.poll(t0 + ms(1000));
    recorder.take();

    classifier.set_enabled(false);
    assert_eq!(recorder.take(), vec![click(true, false)]);
    assert_eq!(classifier.tracked_touches(), 0);
}

#[test]
fn haptics_can_be_turned_off() {
    let recorder = RecordingSink::new();
    let settings = GestureSettings {
        haptic_feedback: false,
        mouse_hold_interval: ms(1500),
        ..GestureSettings::default()
    };
    let mut classifier =
        GestureClassifier::new(recorder.clone(), settings).with_haptics(Box::new(recorder.clone()));
    let t0 = Instant::now();

    classifier.touches_began(&[touch(1, 0.0, 0.0)], t0);
    classifier.poll(t0 + ms(1000));
    assert!(recorder.events().is_empty());
    classifier.poll(t0 + ms(1500));
    assert_eq!(recorder.events(), vec![click(true, true)]);
}

#[test]
fn nan_threshold_falls_back_to_default() {
    let recorder = RecordingSink::new();
    let settings = GestureSettings {
        position_change_threshold: f64::NAN,
        ..GestureSettings::default()
    };
    let mut classifier = GestureClassifier::new(recorder.clone(), settings);
    let t0 = Instant::now();

    assert_eq!(
        classifier.settings().position_change_threshold,
        DEFAULT_POSITION_CHANGE_THRESHOLD
    );

    classifier.touches_began(&[touch(1, 0.0, 0.0)], t0);
    classifier.touches_moved(&[touch(1, 300.0, 0.0)]);
    assert_eq!(classifier.primary().map(|t| t.hold_state), Some(HoldState::NotHeld));

    // The abandoned hold must not engage later.
    classifier.poll(t0 + ms(2000));
    assert_eq!(recorder.events(), vec![SinkEvent::MouseMove { dx: 300.0, dy: 0.0 }]);
}

#[test]
fn oversized_settings_are_clamped() {
    let recorder = RecordingSink::new();
    let settings = GestureSettings {
        position_change_threshold: 1e9,
        mouse_hold_interval: Duration::MAX,
        ..GestureSettings::default()
    };
    let mut classifier = GestureClassifier::new(recorder.clone(), settings);
    let t0 = Instant::now();

    assert_eq!(classifier.settings().position_change_threshold, 200.0);
    assert_eq!(classifier.settings().mouse_hold_interval, ms(5000));

    classifier.touches_began(&[touch(1, 0.0, 0.0)], t0);
    assert_eq!(classifier.next_deadline(), Some(t0 + ms(5000)));
    classifier.poll(t0 + ms(5000));
    assert_eq!(recorder.events(), vec![click(true, true)]);
}

#[test]
fn tiny_hold_interval_is_raised_to_minimum() {
    let settings = GestureSettings {
        position_change_threshold: -5.0,
        mouse_hold_interval: Duration::ZERO,
        ..GestureSettings::default()
    }
    .sanitized();

    assert_eq!(settings.position_change_threshold, 1.0);
    assert_eq!(settings.mouse_hold_interval, ms(100));
}
