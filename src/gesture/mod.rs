//! Gesture recognizers
//!
//! One state machine per gesture kind. Each recognizer consumes a
//! normalized [`TouchFrame`] per tick and pushes zero or more
//! [`GestureEvent`]s. Recognizers own their state exclusively and only
//! read the configuration they were built from.

pub mod drag;
pub mod geometry;
pub mod joystick;
pub mod long_press;
pub mod pinch;
pub mod swipe;
pub mod tap;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::input::{TouchFrame, TouchPhase, TouchPoint};

pub use drag::DragRecognizer;
pub use joystick::JoystickRecognizer;
pub use long_press::LongPressRecognizer;
pub use pinch::PinchRecognizer;
pub use swipe::SwipeRecognizer;
pub use tap::TapRecognizer;

/// Gesture kind, doubling as the engine's mode selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GestureKind {
    #[default]
    Swipe,
    Tap,
    #[serde(alias = "long_press", alias = "longpress")]
    LongPress,
    Drag,
    #[serde(alias = "pinch_zoom", alias = "pinchzoom", alias = "pinch")]
    PinchZoom,
    #[serde(alias = "virtual-joystick", alias = "virtual_joystick")]
    Joystick,
}

impl GestureKind {
    pub const ALL: [GestureKind; 6] = [
        GestureKind::Swipe,
        GestureKind::Tap,
        GestureKind::LongPress,
        GestureKind::Drag,
        GestureKind::PinchZoom,
        GestureKind::Joystick,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GestureKind::Swipe => "swipe",
            GestureKind::Tap => "tap",
            GestureKind::LongPress => "long-press",
            GestureKind::Drag => "drag",
            GestureKind::PinchZoom => "pinch-zoom",
            GestureKind::Joystick => "joystick",
        }
    }
}

impl std::fmt::Display for GestureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GestureKind {
    type Err = String;

    /// Case-insensitive; `-`, `_` and no separator are all accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "swipe" => Ok(GestureKind::Swipe),
            "tap" => Ok(GestureKind::Tap),
            "longpress" => Ok(GestureKind::LongPress),
            "drag" => Ok(GestureKind::Drag),
            "pinchzoom" | "pinch" => Ok(GestureKind::PinchZoom),
            "joystick" | "virtualjoystick" => Ok(GestureKind::Joystick),
            _ => Err(format!(
                "unknown gesture kind '{}' (expected one of: swipe, tap, long-press, drag, pinch-zoom, joystick)",
                s
            )),
        }
    }
}

/// Event emitted by a recognizer
///
/// Vector payloads already carry the global sensitivity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GestureEvent {
    /// Unit direction of the swipe, scaled by sensitivity
    Swipe { direction: Vec2 },
    Tap,
    LongPress,
    /// Anchor position of a new drag
    DragStart { position: Vec2 },
    /// Movement since the previous drag sample
    Drag { delta: Vec2 },
    /// Release position of the drag
    DragEnd { position: Vec2 },
    /// Change of inter-touch distance since the previous tick
    PinchZoom { delta: f32 },
    /// Stick deflection, magnitude in [0, 1] before sensitivity
    Joystick { direction: Vec2 },
}

impl GestureEvent {
    /// Gesture kind that produces this event
    ///
    /// Drag mode also emits `Swipe`, so this is not always the active mode.
    pub fn kind(&self) -> GestureKind {
        match self {
            GestureEvent::Swipe { .. } => GestureKind::Swipe,
            GestureEvent::Tap => GestureKind::Tap,
            GestureEvent::LongPress => GestureKind::LongPress,
            GestureEvent::DragStart { .. } | GestureEvent::Drag { .. } | GestureEvent::DragEnd { .. } => {
                GestureKind::Drag
            }
            GestureEvent::PinchZoom { .. } => GestureKind::PinchZoom,
            GestureEvent::Joystick { .. } => GestureKind::Joystick,
        }
    }
}

impl std::fmt::Display for GestureEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GestureEvent::Swipe { direction } => write!(f, "swipe ({:.3}, {:.3})", direction.x, direction.y),
            GestureEvent::Tap => write!(f, "tap"),
            GestureEvent::LongPress => write!(f, "long-press"),
            GestureEvent::DragStart { position } => {
                write!(f, "drag-start at ({:.1}, {:.1})", position.x, position.y)
            }
            GestureEvent::Drag { delta } => write!(f, "drag ({:.3}, {:.3})", delta.x, delta.y),
            GestureEvent::DragEnd { position } => {
                write!(f, "drag-end at ({:.1}, {:.1})", position.x, position.y)
            }
            GestureEvent::PinchZoom { delta } => write!(f, "pinch-zoom {:+.3}", delta),
            GestureEvent::Joystick { direction } => {
                write!(f, "joystick ({:.3}, {:.3})", direction.x, direction.y)
            }
        }
    }
}

/// Slack for comparing tick-time differences against duration limits
///
/// Timestamps such as `0.816 - 0.016` land one ulp off the intended value.
pub(crate) const TIME_EPSILON: f64 = 1e-9;

/// A per-gesture state machine
pub trait Recognizer {
    fn kind(&self) -> GestureKind;

    /// Consume one frame, appending any recognized events to `out`
    fn update(&mut self, frame: &TouchFrame, out: &mut Vec<GestureEvent>);

    /// Drop all transient state
    fn reset(&mut self);

    /// Abandon any gesture in flight, appending the events that close it
    ///
    /// Recognizers whose consumers hold open state (drag, joystick) emit
    /// their terminal event here; the rest drop silently.
    fn cancel(&mut self, _out: &mut Vec<GestureEvent>) {
        self.reset();
    }

    /// True while a gesture is in flight
    fn is_tracking(&self) -> bool;
}

/// What a single-touch recognizer should act on this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Contact<'a> {
    /// A contact began; single-touch recognizers re-anchor on it
    Began(&'a TouchPoint),
    /// The bound contact reported Moved, Stationary or Ended
    Sample(&'a TouchPoint),
    /// The bound contact was canceled
    Lost(&'a TouchPoint),
    /// Nothing relevant to this recognizer
    Idle,
}

/// Resolve the contact driving a single-touch recognizer
///
/// `bound` is the id the recognizer anchored on, if any. A sample for any
/// other contact is never returned, so recognizers cannot read an anchor
/// that belongs to a different finger.
pub(crate) fn primary_contact(frame: &TouchFrame, bound: Option<u64>) -> Contact<'_> {
    if let Some(id) = bound {
        if let Some(lost) = frame.canceled_touch(id) {
            return Contact::Lost(lost);
        }
        if let Some(touch) = frame.touch(id) {
            return match touch.phase {
                TouchPhase::Began => Contact::Began(touch),
                _ => Contact::Sample(touch),
            };
        }
    }

    match frame.primary() {
        Some(touch) if touch.phase == TouchPhase::Began => Contact::Began(touch),
        _ => Contact::Idle,
    }
}
