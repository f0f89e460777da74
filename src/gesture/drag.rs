//! Drag recognition
//!
//! `Began` emits `DragStart`, every `Moved` sample emits the scaled delta
//! since the previous sample, and `Ended` emits `DragEnd`. A drag whose
//! scaled total displacement exceeds `swipe_min_distance` additionally
//! emits a `Swipe` with that displacement, always after `DragEnd`.
//!
//! A canceled contact emits `DragEnd` at its last sampled position and
//! never a swipe.

use glam::Vec2;
use tracing::{debug, trace};

use super::{primary_contact, Contact, GestureEvent, GestureKind, Recognizer};
use crate::config::GestureConfig;
use crate::input::{TouchFrame, TouchPhase};

#[derive(Debug, Clone, Copy)]
struct DragState {
    id: u64,
    anchor: Vec2,
    last: Vec2,
}

#[derive(Debug, Clone)]
pub struct DragRecognizer {
    sensitivity: f32,
    swipe_min_distance: f32,
    drag: Option<DragState>,
}

impl DragRecognizer {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            sensitivity: config.global_sensitivity,
            swipe_min_distance: config.swipe_min_distance,
            drag: None,
        }
    }

    /// True between `DragStart` and `DragEnd`
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}

impl Recognizer for DragRecognizer {
    fn kind(&self) -> GestureKind {
        GestureKind::Drag
    }

    fn update(&mut self, frame: &TouchFrame, out: &mut Vec<GestureEvent>) {
        match primary_contact(frame, self.drag.map(|d| d.id)) {
            Contact::Began(touch) => {
                debug!("Drag started at {:?} (touch {})", touch.position, touch.id);
                self.drag = Some(DragState {
                    id: touch.id,
                    anchor: touch.position,
                    last: touch.position,
                });
                out.push(GestureEvent::DragStart {
                    position: touch.position,
                });
            }
            Contact::Sample(touch) => {
                let Some(state) = self.drag.as_mut() else {
                    return;
                };

                match touch.phase {
                    TouchPhase::Moved => {
                        let delta = (touch.position - state.last) * self.sensitivity;
                        state.last = touch.position;
                        trace!("Drag delta {:?}", delta);
                        out.push(GestureEvent::Drag { delta });
                    }
                    TouchPhase::Ended => {
                        let anchor = state.anchor;
                        self.drag = None;
                        out.push(GestureEvent::DragEnd {
                            position: touch.position,
                        });

                        let total = (touch.position - anchor) * self.sensitivity;
                        if total.length() > self.swipe_min_distance {
                            debug!("Drag released as swipe {:?}", total);
                            out.push(GestureEvent::Swipe { direction: total });
                        } else {
                            debug!("Drag ended at {:?}", touch.position);
                        }
                    }
                    _ => {}
                }
            }
            Contact::Lost(_) => self.cancel(out),
            Contact::Idle => {}
        }
    }

    fn reset(&mut self) {
        self.drag = None;
    }

    fn cancel(&mut self, out: &mut Vec<GestureEvent>) {
        if let Some(state) = self.drag.take() {
            debug!("Drag canceled at {:?}", state.last);
            out.push(GestureEvent::DragEnd { position: state.last });
        }
    }

    fn is_tracking(&self) -> bool {
        self.is_dragging()
    }
}
