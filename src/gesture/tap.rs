//! Tap recognition
//!
//! A tap is a release that is both quick (`tap_max_time`) and close to
//! where it started (`tap_max_movement`). Failing either cancels silently.

use glam::Vec2;
use tracing::{debug, trace};

use super::geometry::distance;
use super::{primary_contact, Contact, GestureEvent, GestureKind, Recognizer, TIME_EPSILON};
use crate::config::GestureConfig;
use crate::input::{TouchFrame, TouchPhase};

#[derive(Debug, Clone, Copy)]
struct TapAnchor {
    id: u64,
    position: Vec2,
    started_at: f64,
}

#[derive(Debug, Clone)]
pub struct TapRecognizer {
    max_movement: f32,
    max_time: f64,
    anchor: Option<TapAnchor>,
}

impl TapRecognizer {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            max_movement: config.tap_max_movement,
            max_time: config.tap_max_time,
            anchor: None,
        }
    }
}

impl Recognizer for TapRecognizer {
    fn kind(&self) -> GestureKind {
        GestureKind::Tap
    }

    fn update(&mut self, frame: &TouchFrame, out: &mut Vec<GestureEvent>) {
        match primary_contact(frame, self.anchor.map(|a| a.id)) {
            Contact::Began(touch) => {
                self.anchor = Some(TapAnchor {
                    id: touch.id,
                    position: touch.position,
                    started_at: frame.now,
                });
            }
            Contact::Sample(touch) if touch.phase == TouchPhase::Ended => {
                let Some(anchor) = self.anchor.take() else {
                    return;
                };

                let elapsed = frame.now - anchor.started_at;
                let movement = distance(anchor.position, touch.position);
                if elapsed <= self.max_time + TIME_EPSILON && movement <= self.max_movement {
                    debug!("Tap recognized ({:.3}s, {:.1} units)", elapsed, movement);
                    out.push(GestureEvent::Tap);
                } else {
                    trace!("Tap rejected ({:.3}s, {:.1} units)", elapsed, movement);
                }
            }
            Contact::Lost(_) => self.anchor = None,
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
