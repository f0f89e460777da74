//! Gesture engine: mode dispatch and event delivery
//!
//! The engine owns exactly one active recognizer, selected by
//! [`GestureKind`]. Each [`GestureEngine::tick`] re-synchronizes the raw
//! touch snapshot, runs the active recognizer to completion, then hands the
//! produced events to every listener in registration order.
//!
//! Switching modes closes any drag or joystick in flight, then rebuilds the
//! selected recognizer from the configuration, so no state from an earlier
//! activation survives. Contacts already down at switch time stay known to
//! the tracker and are ignored until they end.

pub mod listeners;

use tracing::{debug, info, trace, warn};

use crate::config::{AppConfig, ConfigError, GestureConfig};
use crate::gesture::{
    DragRecognizer, GestureEvent, GestureKind, JoystickRecognizer, LongPressRecognizer,
    PinchRecognizer, Recognizer, SwipeRecognizer, TapRecognizer,
};
use crate::input::{TouchPoint, TouchTracker};

pub use listeners::{Listener, ListenerId, ListenerRegistry};

/// The recognizer for the current mode
#[derive(Debug, Clone)]
pub enum ActiveRecognizer {
    Swipe(SwipeRecognizer),
    Tap(TapRecognizer),
    LongPress(LongPressRecognizer),
    Drag(DragRecognizer),
    PinchZoom(PinchRecognizer),
    Joystick(JoystickRecognizer),
}

impl ActiveRecognizer {
    /// Build a fresh recognizer for `kind`
    pub fn new(kind: GestureKind, config: &GestureConfig) -> Self {
        match kind {
            GestureKind::Swipe => ActiveRecognizer::Swipe(SwipeRecognizer::new(config)),
            GestureKind::Tap => ActiveRecognizer::Tap(TapRecognizer::new(config)),
            GestureKind::LongPress => ActiveRecognizer::LongPress(LongPressRecognizer::new(config)),
            GestureKind::Drag => ActiveRecognizer::Drag(DragRecognizer::new(config)),
            GestureKind::PinchZoom => ActiveRecognizer::PinchZoom(PinchRecognizer::new(config)),
            GestureKind::Joystick => ActiveRecognizer::Joystick(JoystickRecognizer::new(config)),
        }
    }

    pub fn as_recognizer(&self) -> &dyn Recognizer {
        match self {
            ActiveRecognizer::Swipe(r) => r,
            ActiveRecognizer::Tap(r) => r,
            ActiveRecognizer::LongPress(r) => r,
            ActiveRecognizer::Drag(r) => r,
            ActiveRecognizer::PinchZoom(r) => r,
            ActiveRecognizer::Joystick(r) => r,
        }
    }

    pub fn as_recognizer_mut(&mut self) -> &mut dyn Recognizer {
        match self {
            ActiveRecognizer::Swipe(r) => r,
            ActiveRecognizer::Tap(r) => r,
            ActiveRecognizer::LongPress(r) => r,
            ActiveRecognizer::Drag(r) => r,
            ActiveRecognizer::PinchZoom(r) => r,
            ActiveRecognizer::Joystick(r) => r,
        }
    }

    pub fn kind(&self) -> GestureKind {
        self.as_recognizer().kind()
    }
}

/// Tick-driven gesture recognizer with a single active mode
#[derive(Debug)]
pub struct GestureEngine {
    config: GestureConfig,
    recognizer: ActiveRecognizer,
    tracker: TouchTracker,
    listeners: ListenerRegistry,
    /// Time of the last accepted tick
    last_tick: Option<f64>,
    /// Events produced by the most recent tick
    emitted: Vec<GestureEvent>,
}

impl GestureEngine {
    /// Create an engine in swipe mode
    pub fn new(config: GestureConfig) -> Result<Self, ConfigError> {
        Self::with_mode(config, GestureKind::default())
    }

    /// Create an engine with an initial mode
    pub fn with_mode(config: GestureConfig, mode: GestureKind) -> Result<Self, ConfigError> {
        config.validate()?;
        info!("Gesture engine created in {} mode", mode);

        Ok(Self {
            recognizer: ActiveRecognizer::new(mode, &config),
            config,
            tracker: TouchTracker::new(),
            listeners: ListenerRegistry::new(),
            last_tick: None,
            emitted: Vec::new(),
        })
    }

    /// Create an engine from a loaded configuration file
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Self::with_mode(config.gestures.clone(), config.mode)
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Currently active gesture kind
    pub fn mode(&self) -> GestureKind {
        self.recognizer.kind()
    }

    /// Switch the active recognizer
    ///
    /// The selected recognizer always starts from a clean state, even when
    /// `kind` is already active. A drag or joystick in flight is closed
    /// first: listeners receive `DragEnd` at the last sampled position or a
    /// zero `Joystick` before the switch completes. Other gestures in
    /// flight are dropped silently.
    ///
    /// # Returns
    /// The closing events, already delivered to every listener
    pub fn set_mode(&mut self, kind: GestureKind) -> &[GestureEvent] {
        let previous = self.mode();
        self.emitted.clear();
        self.recognizer
            .as_recognizer_mut()
            .cancel(&mut self.emitted);
        self.recognizer = ActiveRecognizer::new(kind, &self.config);

        if previous == kind {
            debug!("Gesture mode {} reset", kind);
        } else {
            info!("Gesture mode switched: {} -> {}", previous, kind);
        }

        for event in &self.emitted {
            trace!("Dispatching {}", event);
            self.listeners.dispatch(event);
        }

        &self.emitted
    }

    /// Register a listener; listeners run in registration order
    pub fn on_event<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&GestureEvent) + 'static,
    {
        self.listeners.register(Box::new(listener))
    }

    /// Unregister a listener, returning whether it was registered
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// True while the active recognizer has a gesture in flight
    pub fn is_tracking(&self) -> bool {
        self.recognizer.as_recognizer().is_tracking()
    }

    /// Number of contacts currently down
    pub fn active_touches(&self) -> usize {
        self.tracker.active_count()
    }

    /// Process one touch snapshot
    ///
    /// # Arguments
    /// * `touches` - Contacts active this tick, in feed order (empty when none)
    /// * `now` - Monotonic time in seconds
    ///
    /// # Returns
    /// The events emitted this tick, already delivered to every listener
    pub fn tick(&mut self, touches: &[TouchPoint], now: f64) -> &[GestureEvent] {
        let now = self.accept_time(now);
        let frame = self.tracker.frame(touches, now);
        self.emitted.clear();

        if frame.is_empty() && !self.is_tracking() {
            return &self.emitted;
        }

        self.recognizer
            .as_recognizer_mut()
            .update(&frame, &mut self.emitted);

        for event in &self.emitted {
            trace!("Dispatching {}", event);
            self.listeners.dispatch(event);
        }

        &self.emitted
    }

    /// Keep the tick clock monotonic
    fn accept_time(&mut self, now: f64) -> f64 {
        let accepted = match self.last_tick {
            Some(last) if !now.is_finite() => {
                warn!("Non-finite tick time {}, reusing {:.3}", now, last);
                last
            }
            None if !now.is_finite() => {
                warn!("Non-finite tick time {}, starting clock at 0", now);
                0.0
            }
            Some(last) if now < last => {
                warn!("Tick time went backwards ({:.3} < {:.3}), holding clock", now, last);
                last
            }
            _ => now,
        };

        self.last_tick = Some(accepted);
        accepted
    }
}

#[cfg(test)]
mod tests;
