//! Touch identity tracking across ticks
//!
//! Keeps the set of contacts that have begun and not yet ended, so each
//! snapshot can be re-synchronized before recognition:
//! - an unknown id reporting `Moved`/`Stationary` is promoted to `Began`
//! - an unknown id reporting `Ended`/`Canceled` is dropped
//! - a known id missing from the snapshot is reported as canceled

use glam::Vec2;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, trace, warn};

use super::{TouchFrame, TouchPhase, TouchPoint};

/// Tracks which contacts are currently down
#[derive(Debug, Default)]
pub struct TouchTracker {
    /// Last known position of every open contact, keyed by id
    active: BTreeMap<u64, Vec2>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of contacts currently down
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Check whether a contact is currently down
    pub fn is_active(&self, id: u64) -> bool {
        self.active.contains_key(&id)
    }

    /// Normalize one snapshot into a frame
    ///
    /// # Arguments
    /// * `touches` - Raw contacts reported by the host this tick
    /// * `now` - Tick time in seconds
    pub fn frame(&mut self, touches: &[TouchPoint], now: f64) -> TouchFrame {
        let mut frame = TouchFrame {
            now,
            touches: Vec::with_capacity(touches.len()),
            canceled: Vec::new(),
        };
        let mut seen = HashSet::with_capacity(touches.len());

        for touch in touches {
            if !seen.insert(touch.id) {
                warn!("Duplicate touch id {} in snapshot, keeping first sample", touch.id);
                continue;
            }

            let known = self.active.contains_key(&touch.id);
            match touch.phase {
                TouchPhase::Began => {
                    self.active.insert(touch.id, touch.position);
                    frame.touches.push(*touch);
                }
                TouchPhase::Moved | TouchPhase::Stationary if !known => {
                    debug!(
                        "Touch {} reported {} without Began, treating as Began",
                        touch.id, touch.phase
                    );
                    self.active.insert(touch.id, touch.position);
                    frame.touches.push(TouchPoint {
                        phase: TouchPhase::Began,
                        ..*touch
                    });
                }
                TouchPhase::Moved | TouchPhase::Stationary => {
                    self.active.insert(touch.id, touch.position);
                    frame.touches.push(*touch);
                }
                TouchPhase::Ended if known => {
                    self.active.remove(&touch.id);
                    frame.touches.push(*touch);
                }
                TouchPhase::Canceled if known => {
                    self.active.remove(&touch.id);
                    frame.canceled.push(*touch);
                }
                TouchPhase::Ended | TouchPhase::Canceled => {
                    trace!("Dropping {} for unknown touch {}", touch.phase, touch.id);
                }
            }
        }

        // Contacts that disappeared without a terminal phase
        let vanished: Vec<u64> = self
            .active
            .keys()
            .copied()
            .filter(|id| !seen.contains(id))
            .collect();
        for id in vanished {
            if let Some(position) = self.active.remove(&id) {
                debug!("Touch {} vanished without Ended, canceling", id);
                frame
                    .canceled
                    .push(TouchPoint::new(id, position, TouchPhase::Canceled));
            }
        }

        frame
    }
}
