//! Per-device configuration
//!
//! Loaded from YAML or JSON, every field optional, unknown fields rejected.
//! Call [`DeviceConfig::validate`] (the loaders do) before building a device.

use std::path::Path;
use std::time::Duration;

use rumble_errors::{RumbleError, ValidationError, validate, validate_range};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_GAIN, DEFAULT_MAX_EFFECTS, DEFAULT_TICK_PERIOD_MS, MAX_EFFECTS_LIMIT,
    MAX_TICK_PERIOD_MS,
};
use crate::AggregationPolicy;

/// Inclusive actuator magnitude range of a device
///
/// # Examples
///
/// ```
/// use rumble_ffb::MagnitudeRange;
///
/// let range = MagnitudeRange::default();
/// assert!(range.contains(0));
/// assert!(range.contains(0xFFFF));
/// assert!(!range.contains(-1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MagnitudeRange {
    /// Smallest accepted magnitude
    pub min: u16,
    /// Largest accepted magnitude
    pub max: u16,
}

impl Default for MagnitudeRange {
    fn default() -> Self {
        Self {
            min: 0,
            max: u16::MAX,
        }
    }
}

impl MagnitudeRange {
    /// Create a range
    pub const fn new(min: u16, max: u16) -> Self {
        Self { min, max }
    }

    /// True if `value` lies within the range
    #[inline]
    pub fn contains(&self, value: i32) -> bool {
        value >= i32::from(self.min) && value <= i32::from(self.max)
    }

    /// Clamp a computed level into the range
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        // an unvalidated range with min > max resolves to max
        value.max(f64::from(self.min)).min(f64::from(self.max))
    }

    /// Check that `min <= max`
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ConstraintViolation`] for an empty range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min > self.max {
            return Err(ValidationError::constraint(format!(
                "magnitude.min ({}) must not exceed magnitude.max ({})",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Configuration of one force-feedback device
///
/// # Examples
///
/// ```
/// use rumble_ffb::{AggregationPolicy, DeviceConfig};
///
/// let config = DeviceConfig::from_yaml_str("max_effects: 4\naggregation: max\n")?;
/// assert_eq!(config.max_effects, 4);
/// assert_eq!(config.aggregation, AggregationPolicy::Max);
/// assert_eq!(config.tick_period_ms, 8);
/// # Ok::<(), rumble_errors::RumbleError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeviceConfig {
    /// Number of effects the registry holds
    pub max_effects: usize,
    /// Accepted actuator magnitudes
    pub magnitude: MagnitudeRange,
    /// How concurrent effects combine per channel
    pub aggregation: AggregationPolicy,
    /// Device gain applied after aggregation, full scale `0xFFFF`
    pub gain: u16,
    /// Tick cadence for drivers that own a clock
    pub tick_period_ms: u32,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            max_effects: DEFAULT_MAX_EFFECTS,
            magnitude: MagnitudeRange::default(),
            aggregation: AggregationPolicy::default(),
            gain: DEFAULT_GAIN,
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
        }
    }
}

impl DeviceConfig {
    /// Default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the registry capacity
    pub fn with_max_effects(mut self, max_effects: usize) -> Self {
        self.max_effects = max_effects;
        self
    }

    /// Set the magnitude range
    pub fn with_magnitude(mut self, magnitude: MagnitudeRange) -> Self {
        self.magnitude = magnitude;
        self
    }

    /// Set the aggregation policy
    pub fn with_aggregation(mut self, aggregation: AggregationPolicy) -> Self {
        self.aggregation = aggregation;
        self
    }

    /// Set the device gain
    pub fn with_gain(mut self, gain: u16) -> Self {
        self.gain = gain;
        self
    }

    /// Set the tick period
    pub fn with_tick_period_ms(mut self, tick_period_ms: u32) -> Self {
        self.tick_period_ms = tick_period_ms;
        self
    }

    /// Tick period as a [`Duration`]
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(u64::from(self.tick_period_ms))
    }

    /// Check every field
    ///
    /// # Errors
    ///
    /// Returns a [`RumbleError::Validation`] naming the first bad field.
    pub fn validate(&self) -> Result<(), RumbleError> {
        validate_range!("max_effects", self.max_effects, 1, MAX_EFFECTS_LIMIT);
        validate_range!("tick_period_ms", self.tick_period_ms, 1, MAX_TICK_PERIOD_MS);
        self.magnitude.validate()?;
        validate!(
            self.magnitude.max > 0,
            ValidationError::constraint("magnitude.max must be non-zero")
        );
        Ok(())
    }

    /// Parse and validate YAML
    ///
    /// # Errors
    ///
    /// Returns [`RumbleError::Config`] for malformed input and
    /// [`RumbleError::Validation`] for out-of-range values.
    pub fn from_yaml_str(input: &str) -> Result<Self, RumbleError> {
        let config: Self = serde_yaml::from_str(input)
            .map_err(|e| RumbleError::config(format!("invalid YAML device config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate JSON
    ///
    /// # Errors
    ///
    /// Returns [`RumbleError::Config`] for malformed input and
    /// [`RumbleError::Validation`] for out-of-range values.
    pub fn from_json_str(input: &str) -> Result<Self, RumbleError> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| RumbleError::config(format!("invalid JSON device config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a file, choosing the format by extension (`.yaml`, `.yml`, `.json`)
    ///
    /// # Errors
    ///
    /// Returns [`RumbleError::Io`] if the file cannot be read and
    /// [`RumbleError::Config`] for an unknown extension or malformed content.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RumbleError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str(&std::fs::read_to_string(path)?),
            Some("json") => Self::from_json_str(&std::fs::read_to_string(path)?),
            _ => Err(RumbleError::config(format!(
                "unsupported device config format: {}",
                path.display()
            ))),
        }
    }

    /// Serialize to YAML
    ///
    /// # Errors
    ///
    /// Returns [`RumbleError::Config`] if serialization fails.
    pub fn to_yaml_string(&self) -> Result<String, RumbleError> {
        serde_yaml::to_string(self)
            .map_err(|e| RumbleError::config(format!("failed to serialize device config: {e}")))
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        format!(
            "max_effects={}, magnitude={}..={}, aggregation={}, gain={}, tick_period_ms={}",
            self.max_effects,
            self.magnitude.min,
            self.magnitude.max,
            self.aggregation.name(),
            self.gain,
            self.tick_period_ms
        )
    }
}
