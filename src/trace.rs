//! Recorded touch traces
//!
//! A trace is a list of ticks, each with a timestamp and the contacts down
//! at that tick. Traces are stored as YAML or JSON and replayed through a
//! [`GestureEngine`] for debugging and regression checks.
//!
//! ```yaml
//! ticks:
//!   - time: 0.0
//!     touches: [{ id: 1, x: 0, y: 0, phase: began }]
//!   - time: 0.1
//!     touches: [{ id: 1, x: 80, y: 0, phase: ended }]
//! ```

use anyhow::{bail, Context, Result};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::engine::GestureEngine;
use crate::gesture::GestureEvent;
use crate::input::{TouchPhase, TouchPoint};

/// One contact as written in a trace file
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct TraceTouch {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub phase: TouchPhase,
}

impl From<TraceTouch> for TouchPoint {
    fn from(t: TraceTouch) -> Self {
        TouchPoint::new(t.id, Vec2::new(t.x, t.y), t.phase)
    }
}

/// One tick of a trace
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TraceTick {
    /// Seconds, monotonic within the trace
    pub time: f64,
    #[serde(default)]
    pub touches: Vec<TraceTouch>,
}

/// A recorded sequence of touch snapshots
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Trace {
    pub ticks: Vec<TraceTick>,
}

/// An event produced during replay, stamped with its tick time
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReplayedEvent {
    pub time: f64,
    #[serde(flatten)]
    pub event: GestureEvent,
}

impl Trace {
    /// Load a trace, picking the format from the file extension
    ///
    /// `.json` is parsed as JSON; anything else as YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read trace file: {}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let trace: Trace = if is_json {
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON trace: {}", path.display()))?
        } else {
            serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML trace: {}", path.display()))?
        };

        trace.validate()?;
        debug!("Loaded trace with {} ticks from {}", trace.ticks.len(), path.display());
        Ok(trace)
    }

    /// Reject traces whose clock is not usable
    pub fn validate(&self) -> Result<()> {
        let mut previous = f64::NEG_INFINITY;
        for (idx, tick) in self.ticks.iter().enumerate() {
            if !tick.time.is_finite() {
                bail!("Tick {} has a non-finite time", idx);
            }
            if tick.time < previous {
                bail!(
                    "Tick {} goes back in time ({} after {})",
                    idx, tick.time, previous
                );
            }
            previous = tick.time;
        }
        Ok(())
    }

    /// Feed every tick through the engine, collecting emitted events
    pub fn replay(&self, engine: &mut GestureEngine) -> Vec<ReplayedEvent> {
        info!("Replaying {} ticks in {} mode", self.ticks.len(), engine.mode());

        let mut replayed = Vec::new();
        let mut touches: Vec<TouchPoint> = Vec::new();

        for tick in &self.ticks {
            touches.clear();
            touches.extend(tick.touches.iter().copied().map(TouchPoint::from));

            replayed.extend(engine.tick(&touches, tick.time).iter().map(|event| ReplayedEvent {
                time: tick.time,
                event: *event,
            }));
        }

        info!("Replay produced {} events", replayed.len());
        replayed
    }
}
