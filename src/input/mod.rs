//! Touch input types
//!
//! The host feeds the engine one snapshot of active contacts per tick.
//! [`TouchTracker`] turns that raw snapshot into a [`TouchFrame`] the
//! recognizers can trust: every contact they see has begun, and contacts
//! that vanished are reported as canceled.

pub mod tracker;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use tracker::TouchTracker;

/// Lifecycle stage of a single touch contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchPhase {
    /// Finger touched down this tick
    Began,
    /// Finger moved since the previous tick
    Moved,
    /// Finger is down and did not move
    Stationary,
    /// Finger lifted this tick
    Ended,
    /// The platform stopped tracking the finger
    Canceled,
}

impl std::fmt::Display for TouchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TouchPhase::Began => write!(f, "began"),
            TouchPhase::Moved => write!(f, "moved"),
            TouchPhase::Stationary => write!(f, "stationary"),
            TouchPhase::Ended => write!(f, "ended"),
            TouchPhase::Canceled => write!(f, "canceled"),
        }
    }
}

/// One contact in a tick snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Stable identifier for the lifetime of the contact
    pub id: u64,
    /// Screen position
    pub position: Vec2,
    pub phase: TouchPhase,
}

impl TouchPoint {
    pub fn new(id: u64, position: Vec2, phase: TouchPhase) -> Self {
        Self { id, position, phase }
    }
}

/// A normalized tick snapshot, as seen by the recognizers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TouchFrame {
    /// Tick time in seconds (monotonic)
    pub now: f64,
    /// Live contacts in feed order. Never contains `Canceled`.
    pub touches: Vec<TouchPoint>,
    /// Contacts lost this tick, at their last known position
    pub canceled: Vec<TouchPoint>,
}

impl TouchFrame {
    /// First contact in feed order
    pub fn primary(&self) -> Option<&TouchPoint> {
        self.touches.first()
    }

    /// Live contact with the given id
    pub fn touch(&self, id: u64) -> Option<&TouchPoint> {
        self.touches.iter().find(|t| t.id == id)
    }

    /// Canceled contact with the given id
    pub fn canceled_touch(&self, id: u64) -> Option<&TouchPoint> {
        self.canceled.iter().find(|t| t.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.touches.is_empty() && self.canceled.is_empty()
    }
}
