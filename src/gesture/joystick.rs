//! Virtual joystick recognition
//!
//! The stick is centered wherever the contact begins (optionally only
//! inside `joystick_area`). Each `Moved` sample emits the offset from the
//! center, radially clamped to `joystick_max_distance` and divided by it,
//! so the magnitude lies in [0, 1] before sensitivity. Release emits an
//! explicit zero vector so consumers recenter.

use glam::Vec2;
use tracing::{debug, trace};

use super::geometry::{clamp_magnitude, Rect};
use super::{primary_contact, Contact, GestureEvent, GestureKind, Recognizer};
use crate::config::GestureConfig;
use crate::input::{TouchFrame, TouchPhase};

#[derive(Debug, Clone)]
pub struct JoystickRecognizer {
    sensitivity: f32,
    max_distance: f32,
    area: Option<Rect>,
    /// Bound touch id and stick center
    center: Option<(u64, Vec2)>,
}

impl JoystickRecognizer {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            sensitivity: config.global_sensitivity,
            max_distance: config.joystick_max_distance,
            area: config.joystick_area,
            center: None,
        }
    }

    /// Stick center while active
    pub fn center(&self) -> Option<Vec2> {
        self.center.map(|(_, c)| c)
    }

    /// Map a raw offset from the center to stick output
    fn deflection(&self, offset: Vec2) -> Vec2 {
        clamp_magnitude(offset, self.max_distance) / self.max_distance * self.sensitivity
    }
}

impl Recognizer for JoystickRecognizer {
    fn kind(&self) -> GestureKind {
        GestureKind::Joystick
    }

    fn update(&mut self, frame: &TouchFrame, out: &mut Vec<GestureEvent>) {
        match primary_contact(frame, self.center.map(|(id, _)| id)) {
            Contact::Began(touch) => {
                if let Some(area) = &self.area {
                    if !area.contains(touch.position) {
                        trace!("Joystick touch at {:?} outside area, ignored", touch.position);
                        self.center = None;
                        return;
                    }
                }
                debug!("Joystick activated at {:?}", touch.position);
                self.center = Some((touch.id, touch.position));
            }
            Contact::Sample(touch) => {
                let Some((_, center)) = self.center else {
                    return;
                };

                match touch.phase {
                    TouchPhase::Moved => {
                        let direction = self.deflection(touch.position - center);
                        trace!("Joystick {:?}", direction);
                        out.push(GestureEvent::Joystick { direction });
                    }
                    TouchPhase::Ended => {
                        debug!("Joystick released");
                        out.push(GestureEvent::Joystick { direction: Vec2::ZERO });
                        self.center = None;
                    }
                    _ => {}
                }
            }
            Contact::Lost(_) => self.cancel(out),
            Contact::Idle => {}
        }
    }

    fn reset(&mut self) {
        self.center = None;
    }

    fn cancel(&mut self, out: &mut Vec<GestureEvent>) {
        if self.center.take().is_some() {
            debug!("Joystick canceled, recentering");
            out.push(GestureEvent::Joystick { direction: Vec2::ZERO });
        }
    }

    fn is_tracking(&self) -> bool {
        self.center.is_some()
    }
}
