//! Swipe recognition
//!
//! Anchors on `Began`, measures on `Ended`. A release at or beyond
//! `swipe_min_distance` emits one `Swipe` carrying the unit direction
//! scaled by sensitivity; anything shorter is forgotten.

use glam::Vec2;
use tracing::{debug, trace};

use super::geometry::{direction, distance};
use super::{primary_contact, Contact, GestureEvent, GestureKind, Recognizer};
use crate::config::GestureConfig;
use crate::input::{TouchFrame, TouchPhase};

#[derive(Debug, Clone)]
pub struct SwipeRecognizer {
    min_distance: f32,
    sensitivity: f32,
    /// Bound touch id and its anchor position
    anchor: Option<(u64, Vec2)>,
}

impl SwipeRecognizer {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            min_distance: config.swipe_min_distance,
            sensitivity: config.global_sensitivity,
            anchor: None,
        }
    }
}

impl Recognizer for SwipeRecognizer {
    fn kind(&self) -> GestureKind {
        GestureKind::Swipe
    }

    fn update(&mut self, frame: &TouchFrame, out: &mut Vec<GestureEvent>) {
        match primary_contact(frame, self.anchor.map(|(id, _)| id)) {
            Contact::Began(touch) => {
                trace!("Swipe anchored at {:?} (touch {})", touch.position, touch.id);
                self.anchor = Some((touch.id, touch.position));
            }
            Contact::Sample(touch) if touch.phase == TouchPhase::Ended => {
                let Some((_, start)) = self.anchor.take() else {
                    return;
                };

                let travelled = distance(start, touch.position);
                if travelled >= self.min_distance {
                    let dir = direction(touch.position - start) * self.sensitivity;
                    debug!("Swipe recognized: {:.1} units, direction {:?}", travelled, dir);
                    out.push(GestureEvent::Swipe { direction: dir });
                } else {
                    trace!("Swipe dropped: {:.1} < {:.1}", travelled, self.min_distance);
                }
            }
            Contact::Lost(_) => {
                trace!("Swipe canceled");
                self.anchor = None;
            }
            Contact::Sample(_) | Contact::Idle => {}
        }
    }

    fn reset(&mut self) {
        self.anchor = None;
    }

    fn is_tracking(&self) -> bool {
        self.anchor.is_some()
    }
}
