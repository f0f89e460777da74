//! Tests for the gesture engine

use super::*;
use crate::input::TouchPhase;
use glam::Vec2;
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

fn tp(id: u64, x: f32, y: f32, phase: TouchPhase) -> TouchPoint {
    TouchPoint::new(id, Vec2::new(x, y), phase)
}

fn engine(mode: GestureKind, config: GestureConfig) -> GestureEngine {
    GestureEngine::with_mode(config, mode).unwrap()
}

/// Collect every event delivered to a listener
fn record(engine: &mut GestureEngine) -> Rc<RefCell<Vec<GestureEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    engine.on_event(move |event| sink.borrow_mut().push(*event));
    log
}

#[test]
fn test_invalid_config_rejected_at_construction() {
    let config = GestureConfig {
        long_press_threshold: -1.0,
        ..Default::default()
    };
    assert!(matches!(
        GestureEngine::new(config),
        Err(ConfigError::Negative { field: "long_press_threshold", .. })
    ));
}

#[test]
fn test_default_mode_is_swipe() {
    let engine = GestureEngine::new(GestureConfig::default()).unwrap();
    assert_eq!(engine.mode(), GestureKind::Swipe);
}

#[test]
fn test_from_app_config_uses_mode() {
    let app = AppConfig {
        mode: GestureKind::PinchZoom,
        gestures: GestureConfig::default(),
    };
    let engine = GestureEngine::from_app_config(&app).unwrap();
    assert_eq!(engine.mode(), GestureKind::PinchZoom);
}

#[test]
fn test_swipe_through_engine() {
    let mut engine = engine(
        GestureKind::Swipe,
        GestureConfig {
            swipe_min_distance: 50.0,
            global_sensitivity: 2.0,
            ..Default::default()
        },
    );
    let log = record(&mut engine);

    engine.tick(&[tp(1, 0.0, 0.0, TouchPhase::Began)], 0.0);
    let events = engine.tick(&[tp(1, 100.0, 0.0, TouchPhase::Ended)], 0.2).to_vec();

    assert_eq!(events, vec![GestureEvent::Swipe { direction: Vec2::new(2.0, 0.0) }]);
    assert_eq!(*log.borrow(), events);
}

#[test]
fn test_tap_timing_uses_tick_clock() {
    let config = GestureConfig {
        tap_max_time: 0.3,
        tap_max_movement: 10.0,
        ..Default::default()
    };

    let mut quick = engine(GestureKind::Tap, config.clone());
    quick.tick(&[tp(1, 0.0, 0.0, TouchPhase::Began)], 5.0);
    assert_eq!(quick.tick(&[tp(1, 5.0, 0.0, TouchPhase::Ended)], 5.1), &[GestureEvent::Tap]);

    let mut slow = engine(GestureKind::Tap, config);
    slow.tick(&[tp(1, 0.0, 0.0, TouchPhase::Began)], 5.0);
    assert!(slow.tick(&[tp(1, 5.0, 0.0, TouchPhase::Ended)], 5.5).is_empty());
}

#[test]
fn test_long_press_fires_at_exact_threshold_mid_session() {
    let mut engine = engine(
        GestureKind::LongPress,
        GestureConfig {
            long_press_threshold: 0.8,
            ..Default::default()
        },
    );

    engine.tick(&[tp(1, 0.0, 0.0, TouchPhase::Began)], 0.016);
    assert_eq!(
        engine.tick(&[tp(1, 0.0, 0.0, TouchPhase::Stationary)], 0.816),
        &[GestureEvent::LongPress]
    );
}

#[test]
fn test_drag_emits_end_then_swipe() {
    let mut engine = engine(GestureKind::Drag, GestureConfig::default());
    let log = record(&mut engine);

    engine.tick(&[tp(1, 0.0, 0.0, TouchPhase::Began)], 0.0);
    engine.tick(&[tp(1, 10.0, 0.0, TouchPhase::Moved)], 0.1);
    engine.tick(&[tp(1, 80.0, 0.0, TouchPhase::Moved)], 0.2);
    engine.tick(&[tp(1, 80.0, 0.0, TouchPhase::Ended)], 0.3);

    let log = log.borrow();
    assert_eq!(log.len(), 5);
    assert_eq!(log[3], GestureEvent::DragEnd { position: Vec2::new(80.0, 0.0) });
    assert_eq!(log[4], GestureEvent::Swipe { direction: Vec2::new(80.0, 0.0) });
}

#[test]
fn test_pinch_through_engine() {
    let mut engine = engine(GestureKind::PinchZoom, GestureConfig::default());
    let log = record(&mut engine);

    engine.tick(
        &[tp(1, 0.0, 0.0, TouchPhase::Began), tp(2, 100.0, 0.0, TouchPhase::Began)],
        0.0,
    );
    engine.tick(
        &[tp(1, 0.0, 0.0, TouchPhase::Stationary), tp(2, 125.0, 0.0, TouchPhase::Moved)],
        0.1,
    );
    engine.tick(
        &[tp(1, 0.0, 0.0, TouchPhase::Stationary), tp(2, 150.0, 0.0, TouchPhase::Moved)],
        0.2,
    );

    let total: f32 = log
        .borrow()
        .iter()
        .map(|e| match e {
            GestureEvent::PinchZoom { delta } => *delta,
            _ => 0.0,
        })
        .sum();
    assert_eq!(log.borrow().len(), 2);
    assert_eq!(total, 50.0);
}

#[test]
fn test_joystick_through_engine() {
    let mut engine = engine(
        GestureKind::Joystick,
        GestureConfig {
            joystick_max_distance: 100.0,
            global_sensitivity: 1.5,
            ..Default::default()
        },
    );

    engine.tick(&[tp(1, 0.0, 0.0, TouchPhase::Began)], 0.0);
    assert_eq!(
        engine.tick(&[tp(1, 200.0, 0.0, TouchPhase::Moved)], 0.1),
        &[GestureEvent::Joystick { direction: Vec2::new(1.5, 0.0) }]
    );
    assert_eq!(
        engine.tick(&[tp(1, 200.0, 0.0, TouchPhase::Ended)], 0.2),
        &[GestureEvent::Joystick { direction: Vec2::ZERO }]
    );
}

#[test]
fn test_long_press_does_not_survive_mode_switch() {
    let mut engine = engine(
        GestureKind::LongPress,
        GestureConfig {
            long_press_threshold: 0.8,
            ..Default::default()
        },
    );
    let log = record(&mut engine);

    engine.tick(&[tp(1, 0.0, 0.0, TouchPhase::Began)], 0.0);
    engine.tick(&[tp(1, 0.0, 0.0, TouchPhase::Stationary)], 0.5);

    engine.set_mode(GestureKind::Tap);
    engine.tick(&[tp(1, 0.0, 0.0, TouchPhase::Stationary)], 0.6);
    engine.set_mode(GestureKind::LongPress);
    assert!(!engine.is_tracking());

    engine.tick(&[tp(1, 0.0, 0.0, TouchPhase::Stationary)], 1.0);
    engine.tick(&[tp(1, 0.0, 0.0, TouchPhase::Stationary)], 3.0);
    assert!(log.borrow().is_empty());

    // A fresh press after release works normally
    engine.tick(&[tp(1, 0.0, 0.0, TouchPhase::Ended)], 3.1);
    engine.tick(&[tp(2, 0.0, 0.0, TouchPhase::Began)], 4.0);
    engine.tick(&[tp(2, 0.0, 0.0, TouchPhase::Stationary)], 5.0);
    assert_eq!(*log.borrow(), vec![GestureEvent::LongPress]);
}

#[test]
fn test_set_same_mode_resets() {
    let mut engine = engine(GestureKind::Drag, GestureConfig::default());
    engine.tick(&[tp(1, 0.0, 0.0, TouchPhase::Began)], 0.0);
    assert!(engine.is_tracking());

    assert_eq!(
        engine.set_mode(GestureKind::Drag),
        &[GestureEvent::DragEnd { position: Vec2::ZERO }]
    );
    assert!(!engine.is_tracking());
    assert!(engine.tick(&[tp(1, 30.0, 0.0, TouchPhase::Moved)], 0.1).is_empty());
}

#[test]
fn test_switch_mid_drag_closes_drag() {
    let mut engine = engine(GestureKind::Drag, GestureConfig::default());
    let log = record(&mut engine);

    engine.tick(&[tp(1, 0.0, 0.0, TouchPhase::Began)], 0.0);
    engine.tick(&[tp(1, 90.0, 0.0, TouchPhase::Moved)], 0.1);
    engine.set_mode(GestureKind::Tap);

    let log = log.borrow();
    assert_eq!(log.len(), 3);
    assert_eq!(log[2], GestureEvent::DragEnd { position: Vec2::new(90.0, 0.0) });
    assert_eq!(engine.mode(), GestureKind::Tap);
}

#[test]
fn test_switch_mid_joystick_recenters() {
    let mut engine = engine(GestureKind::Joystick, GestureConfig::default());
    let log = record(&mut engine);

    engine.tick(&[tp(1, 0.0, 0.0, TouchPhase::Began)], 0.0);
    engine.tick(&[tp(1, 50.0, 0.0, TouchPhase::Moved)], 0.1);
    engine.set_mode(GestureKind::Swipe);

    assert_eq!(log.borrow().last(), Some(&GestureEvent::Joystick { direction: Vec2::ZERO }));
}

#[test]
fn test_switch_while_idle_or_pressing_is_silent() {
    let mut engine = engine(GestureKind::LongPress, GestureConfig::default());
    let log = record(&mut engine);

    assert!(engine.set_mode(GestureKind::Drag).is_empty());
    engine.set_mode(GestureKind::LongPress);
    engine.tick(&[tp(1, 0.0, 0.0, TouchPhase::Began)], 0.0);
    assert!(engine.set_mode(GestureKind::Tap).is_empty());
    assert!(log.borrow().is_empty());
}

#[test]
fn test_unseen_touch_treated_as_began() {
    let mut engine = engine(GestureKind::Drag, GestureConfig::default());
    let events = engine.tick(&[tp(4, 12.0, 3.0, TouchPhase::Moved)], 0.0).to_vec();
    assert_eq!(events, vec![GestureEvent::DragStart { position: Vec2::new(12.0, 3.0) }]);
    assert_eq!(engine.active_touches(), 1);
}

#[test]
fn test_vanished_touch_cancels_drag() {
    let mut engine = engine(GestureKind::Drag, GestureConfig::default());
    engine.tick(&[tp(1, 0.0, 0.0, TouchPhase::Began)], 0.0);
    engine.tick(&[tp(1, 90.0, 0.0, TouchPhase::Moved)], 0.1);

    let events = engine.tick(&[], 0.2).to_vec();
    assert_eq!(events, vec![GestureEvent::DragEnd { position: Vec2::new(90.0, 0.0) }]);
    assert!(!engine.is_tracking());
    assert_eq!(engine.active_touches(), 0);
}

#[test]
fn test_idle_empty_ticks_emit_nothing() {
    let mut engine = engine(GestureKind::Tap, GestureConfig::default());
    for i in 0..10 {
        assert!(engine.tick(&[], i as f64 * 0.016).is_empty());
    }
}

#[test]
fn test_backwards_clock_is_held() {
    let mut engine = engine(
        GestureKind::LongPress,
        GestureConfig {
            long_press_threshold: 0.5,
            ..Default::default()
        },
    );

    engine.tick(&[tp(1, 0.0, 0.0, TouchPhase::Began)], 10.0);
    // Clock jumps back; elapsed must not go negative or restart the press
    assert!(engine.tick(&[tp(1, 0.0, 0.0, TouchPhase::Stationary)], 2.0).is_empty());
    assert_eq!(
        engine.tick(&[tp(1, 0.0, 0.0, TouchPhase::Stationary)], 10.5),
        &[GestureEvent::LongPress]
    );
}

#[test]
fn test_listeners_in_registration_order_and_removal() {
    let mut engine = engine(GestureKind::Tap, GestureConfig::default());
    let order = Rc::new(RefCell::new(Vec::new()));

    let first = {
        let order = order.clone();
        engine.on_event(move |_| order.borrow_mut().push(1))
    };
    {
        let order = order.clone();
        engine.on_event(move |_| order.borrow_mut().push(2));
    }

    engine.tick(&[tp(1, 0.0, 0.0, TouchPhase::Began)], 0.0);
    engine.tick(&[tp(1, 0.0, 0.0, TouchPhase::Ended)], 0.1);
    assert_eq!(*order.borrow(), vec![1, 2]);

    assert!(engine.remove_listener(first));
    engine.tick(&[tp(2, 0.0, 0.0, TouchPhase::Began)], 1.0);
    engine.tick(&[tp(2, 0.0, 0.0, TouchPhase::Ended)], 1.1);
    assert_eq!(*order.borrow(), vec![1, 2, 2]);
}

#[test]
fn test_panicking_listener_leaves_recognizer_consistent() {
    let mut engine = engine(GestureKind::Drag, GestureConfig::default());
    let armed = Rc::new(RefCell::new(true));
    {
        let armed = armed.clone();
        engine.on_event(move |event| {
            if matches!(event, GestureEvent::DragStart { .. }) && armed.replace(false) {
                panic!("listener failure");
            }
        });
    }

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        engine.tick(&[tp(1, 0.0, 0.0, TouchPhase::Began)], 0.0);
    }));
    assert!(result.is_err());

    // The drag was already anchored before dispatch
    assert!(engine.is_tracking());
    assert_eq!(
        engine.tick(&[tp(1, 5.0, 0.0, TouchPhase::Moved)], 0.1),
        &[GestureEvent::Drag { delta: Vec2::new(5.0, 0.0) }]
    );
}
