//! Pinch-zoom recognition
//!
//! Works on the first two contacts of the frame. The tick a pair forms (or
//! either contact begins) only records the inter-touch distance; every later
//! tick emits the scaled change since the previous tick. Deltas are
//! incremental, so consumers sum them for a total zoom.

use tracing::{debug, trace};

use super::geometry::distance;
use super::{GestureEvent, GestureKind, Recognizer};
use crate::config::GestureConfig;
use crate::input::{TouchFrame, TouchPhase};

#[derive(Debug, Clone, Copy, PartialEq)]
struct PinchPair {
    /// Contact ids, smaller first
    ids: (u64, u64),
    previous_distance: f32,
}

#[derive(Debug, Clone)]
pub struct PinchRecognizer {
    sensitivity: f32,
    pair: Option<PinchPair>,
}

impl PinchRecognizer {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            sensitivity: config.global_sensitivity,
            pair: None,
        }
    }
}

impl Recognizer for PinchRecognizer {
    fn kind(&self) -> GestureKind {
        GestureKind::PinchZoom
    }

    fn update(&mut self, frame: &TouchFrame, out: &mut Vec<GestureEvent>) {
        let (a, b) = match (frame.touches.first(), frame.touches.get(1)) {
            (Some(a), Some(b)) => (a, b),
            _ => {
                if frame.touches.is_empty() && self.pair.take().is_some() {
                    trace!("Pinch pair released");
                }
                return;
            }
        };

        let ids = (a.id.min(b.id), a.id.max(b.id));
        let current = distance(a.position, b.position);
        let began = a.phase == TouchPhase::Began || b.phase == TouchPhase::Began;

        match self.pair.as_mut() {
            Some(pair) if !began && pair.ids == ids => {
                let delta = (current - pair.previous_distance) * self.sensitivity;
                pair.previous_distance = current;
                trace!("Pinch delta {:+.3}", delta);
                out.push(GestureEvent::PinchZoom { delta });
            }
            _ => {
                debug!("Pinch pair {:?} initialized at {:.1} units", ids, current);
                self.pair = Some(PinchPair {
                    ids,
                    previous_distance: current,
                });
            }
        }

        if a.phase == TouchPhase::Ended || b.phase == TouchPhase::Ended {
            self.pair = None;
        }
    }

    fn reset(&mut self) {
        self.pair = None;
    }

    fn is_tracking(&self) -> bool {
        self.pair.is_some()
    }
}
