//! Touch Gestures - tick-driven multi-touch gesture recognition
//!
//! Turns a per-tick feed of touch contacts into typed gesture events:
//! swipe, tap, long-press, drag, pinch-zoom and virtual joystick. One
//! gesture kind is active at a time; events are delivered synchronously to
//! registered listeners.
//!
//! ```
//! use glam::Vec2;
//! use touch_gestures::{GestureConfig, GestureEngine, GestureEvent, GestureKind, TouchPhase, TouchPoint};
//!
//! let mut engine = GestureEngine::with_mode(GestureConfig::default(), GestureKind::Swipe).unwrap();
//! engine.on_event(|event| println!("{}", event));
//!
//! engine.tick(&[TouchPoint::new(1, Vec2::ZERO, TouchPhase::Began)], 0.0);
//! let events = engine.tick(&[TouchPoint::new(1, Vec2::new(120.0, 0.0), TouchPhase::Ended)], 0.2);
//! assert_eq!(events, &[GestureEvent::Swipe { direction: Vec2::X }]);
//! ```

pub mod config;
pub mod engine;
pub mod gesture;
pub mod input;
pub mod trace;

pub use config::{AppConfig, ConfigError, GestureConfig, LongPressMovement};
pub use engine::{GestureEngine, ListenerId};
pub use gesture::{GestureEvent, GestureKind};
pub use input::{TouchPhase, TouchPoint};
