//! Configuration management for the gesture engine
//!
//! Handles loading, parsing, and validation of YAML configuration files.
//! Tuning values are read once at startup; the engine never mutates them.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::gesture::geometry::Rect;
use crate::gesture::GestureKind;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Gesture kind active at startup
    #[serde(default)]
    pub mode: GestureKind,
    #[serde(default)]
    pub gestures: GestureConfig,
}

/// How the long-press recognizer treats movement during the hold
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LongPressMovement {
    /// Movement is ignored; only `Stationary` samples are checked
    #[default]
    Ignore,
    /// Moving farther than `long_press_max_movement` abandons the press
    Cancel,
}

/// Gesture tuning parameters
///
/// Distances are in screen units, times in seconds.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct GestureConfig {
    /// Multiplier applied to every emitted vector or scalar
    #[serde(default = "default_sensitivity")]
    pub global_sensitivity: f32,
    #[serde(default = "default_swipe_min_distance")]
    pub swipe_min_distance: f32,
    #[serde(default = "default_tap_max_movement")]
    pub tap_max_movement: f32,
    #[serde(default = "default_tap_max_time")]
    pub tap_max_time: f64,
    #[serde(default = "default_long_press_threshold")]
    pub long_press_threshold: f64,
    #[serde(default)]
    pub long_press_movement: LongPressMovement,
    /// Only read with [`LongPressMovement::Cancel`]
    #[serde(default = "default_long_press_max_movement")]
    pub long_press_max_movement: f32,
    /// Optional region a joystick touch must begin in
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub joystick_area: Option<Rect>,
    #[serde(default = "default_joystick_max_distance")]
    pub joystick_max_distance: f32,
    /// Travel limit for consumers that move objects; not read by the engine
    #[serde(default = "default_movement_limit")]
    pub movement_limit: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            global_sensitivity: default_sensitivity(),
            swipe_min_distance: default_swipe_min_distance(),
            tap_max_movement: default_tap_max_movement(),
            tap_max_time: default_tap_max_time(),
            long_press_threshold: default_long_press_threshold(),
            long_press_movement: LongPressMovement::default(),
            long_press_max_movement: default_long_press_max_movement(),
            joystick_area: None,
            joystick_max_distance: default_joystick_max_distance(),
            movement_limit: default_movement_limit(),
        }
    }
}

/// Construction-time configuration failure
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be a finite number (got {value})")]
    NotFinite { field: &'static str, value: String },

    #[error("{field} cannot be negative (got {value})")]
    Negative { field: &'static str, value: String },

    #[error("joystick_max_distance must be greater than zero (got {0})")]
    ZeroJoystickRadius(f32),

    #[error("joystick_area is malformed: min {min:?} must not exceed max {max:?}")]
    InvalidJoystickArea { min: [f32; 2], max: [f32; 2] },
}

impl GestureConfig {
    /// Validate every tuning value
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        check_non_negative("global_sensitivity", self.global_sensitivity)?;
        check_non_negative("swipe_min_distance", self.swipe_min_distance)?;
        check_non_negative("tap_max_movement", self.tap_max_movement)?;
        check_non_negative("tap_max_time", self.tap_max_time)?;
        check_non_negative("long_press_threshold", self.long_press_threshold)?;
        check_non_negative("long_press_max_movement", self.long_press_max_movement)?;
        check_non_negative("joystick_max_distance", self.joystick_max_distance)?;
        check_non_negative("movement_limit", self.movement_limit)?;

        // Joystick output is divided by this radius
        if self.joystick_max_distance <= 0.0 {
            return Err(ConfigError::ZeroJoystickRadius(self.joystick_max_distance));
        }

        if let Some(area) = &self.joystick_area {
            if !area.is_valid() {
                return Err(ConfigError::InvalidJoystickArea {
                    min: area.min.to_array(),
                    max: area.max.to_array(),
                });
            }
        }

        Ok(())
    }
}

impl AppConfig {
    /// Load configuration from file with validation
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: AppConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?;

        config
            .gestures
            .validate()
            .with_context(|| format!("Invalid gesture settings in {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let yaml = serde_yaml::to_string(self).context("Failed to serialize config to YAML")?;

        fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}

/// Reject non-finite or negative values, keeping the value as written
fn check_non_negative<T>(field: &'static str, value: T) -> std::result::Result<(), ConfigError>
where
    T: Into<f64> + Copy + std::fmt::Display,
{
    let wide: f64 = value.into();
    if !wide.is_finite() {
        return Err(ConfigError::NotFinite { field, value: value.to_string() });
    }
    if wide < 0.0 {
        return Err(ConfigError::Negative { field, value: value.to_string() });
    }
    Ok(())
}

// Default value functions
fn default_sensitivity() -> f32 { 1.0 }
fn default_swipe_min_distance() -> f32 { 50.0 }
fn default_tap_max_movement() -> f32 { 10.0 }
fn default_tap_max_time() -> f64 { 0.3 }
fn default_long_press_threshold() -> f64 { 0.8 }
fn default_long_press_max_movement() -> f32 { 10.0 }
fn default_joystick_max_distance() -> f32 { 100.0 }
fn default_movement_limit() -> f32 { 2.5 }
