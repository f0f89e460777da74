//! Long-press recognition
//!
//! State machine: `Idle -> Pressing -> Fired`.
//!
//! The threshold is evaluated on `Stationary` samples only, against the tick
//! clock, so the press fires on the first stationary tick at or past
//! `long_press_threshold` and never again for the same contact. `Ended`
//! returns to `Idle` from any state.
//!
//! Movement handling follows [`LongPressMovement`]: `Ignore` keeps the
//! press alive through `Moved` samples, `Cancel` abandons it once the
//! contact strays more than `long_press_max_movement` from its anchor.

use glam::Vec2;
use tracing::{debug, trace};

use super::geometry::distance;
use super::{primary_contact, Contact, GestureEvent, GestureKind, Recognizer, TIME_EPSILON};
use crate::config::{GestureConfig, LongPressMovement};
use crate::input::{TouchFrame, TouchPhase};

#[derive(Debug, Clone, Copy, PartialEq)]
enum PressState {
    Idle,
    Pressing {
        id: u64,
        anchor: Vec2,
        started_at: f64,
    },
    Fired {
        id: u64,
    },
}

#[derive(Debug, Clone)]
pub struct LongPressRecognizer {
    threshold: f64,
    movement: LongPressMovement,
    max_movement: f32,
    state: PressState,
}

impl LongPressRecognizer {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            threshold: config.long_press_threshold,
            movement: config.long_press_movement,
            max_movement: config.long_press_max_movement,
            state: PressState::Idle,
        }
    }

    /// True once the current press has fired
    pub fn has_fired(&self) -> bool {
        matches!(self.state, PressState::Fired { .. })
    }

    fn bound_id(&self) -> Option<u64> {
        match self.state {
            PressState::Idle => None,
            PressState::Pressing { id, .. } | PressState::Fired { id } => Some(id),
        }
    }
}

impl Recognizer for LongPressRecognizer {
    fn kind(&self) -> GestureKind {
        GestureKind::LongPress
    }

    fn update(&mut self, frame: &TouchFrame, out: &mut Vec<GestureEvent>) {
        match primary_contact(frame, self.bound_id()) {
            Contact::Began(touch) => {
                trace!("Long-press pressing (touch {})", touch.id);
                self.state = PressState::Pressing {
                    id: touch.id,
                    anchor: touch.position,
                    started_at: frame.now,
                };
            }
            Contact::Sample(touch) => match (touch.phase, self.state) {
                (TouchPhase::Ended, _) => self.state = PressState::Idle,
                (TouchPhase::Stationary, PressState::Pressing { id, started_at, .. }) => {
                    let elapsed = frame.now - started_at;
                    if elapsed + TIME_EPSILON >= self.threshold {
                        debug!("Long-press recognized after {:.3}s", elapsed);
                        out.push(GestureEvent::LongPress);
                        self.state = PressState::Fired { id };
                    }
                }
                (TouchPhase::Moved, PressState::Pressing { anchor, .. })
                    if self.movement == LongPressMovement::Cancel =>
                {
                    let moved = distance(anchor, touch.position);
                    if moved > self.max_movement {
                        debug!("Long-press canceled by movement ({:.1} units)", moved);
                        self.state = PressState::Idle;
                    }
                }
                _ => {}
            },
            Contact::Lost(_) => self.state = PressState::Idle,
            Contact::Idle => {}
        }
    }

    fn reset(&mut self) {
        self.state = PressState::Idle;
    }

    fn is_tracking(&self) -> bool {
        self.state != PressState::Idle
    }
}
