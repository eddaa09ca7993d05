//! Trace event definitions for effect requests, ticks and device lifecycle

use core::fmt;

use rumble_errors::{ConversionError, RegistryError};

/// State-changing operation observed on a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectOperation {
    /// Effect descriptor uploaded under an id
    Upload,
    /// Effect removed from the registry
    Erase,
    /// Playback started or restarted
    Play,
    /// Playback stopped by request
    Stop,
    /// Playback ended because the effect ran its full length
    Complete,
}

impl EffectOperation {
    /// Returns the operation name for structured logs
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            EffectOperation::Upload => "upload",
            EffectOperation::Erase => "erase",
            EffectOperation::Play => "play",
            EffectOperation::Stop => "stop",
            EffectOperation::Complete => "complete",
        }
    }
}

/// Result of an observed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectOutcome {
    /// The operation took effect
    Applied,
    /// An upload overwrote an existing effect with the same id
    Replaced,
    /// Rejected: the effect kind has no rumble representation
    UnsupportedKind,
    /// Rejected: a magnitude was outside the device range
    InvalidMagnitude,
    /// Rejected: the registry is full
    CapacityExceeded,
    /// Rejected: no effect or playback under that id
    UnknownEffectId,
}

impl EffectOutcome {
    /// Returns the outcome name for structured logs
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            EffectOutcome::Applied => "applied",
            EffectOutcome::Replaced => "replaced",
            EffectOutcome::UnsupportedKind => "unsupported_kind",
            EffectOutcome::InvalidMagnitude => "invalid_magnitude",
            EffectOutcome::CapacityExceeded => "capacity_exceeded",
            EffectOutcome::UnknownEffectId => "unknown_effect_id",
        }
    }

    /// Returns true if the operation took effect
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, EffectOutcome::Applied | EffectOutcome::Replaced)
    }
}

impl From<&RegistryError> for EffectOutcome {
    fn from(err: &RegistryError) -> Self {
        match err {
            RegistryError::ConversionFailed(ConversionError::UnsupportedEffectKind { .. }) => {
                EffectOutcome::UnsupportedKind
            }
            RegistryError::ConversionFailed(ConversionError::InvalidMagnitudeRange { .. }) => {
                EffectOutcome::InvalidMagnitude
            }
            RegistryError::CapacityExceeded { .. } => EffectOutcome::CapacityExceeded,
            RegistryError::UnknownEffectId(_) => EffectOutcome::UnknownEffectId,
        }
    }
}

/// Record of one state-changing call: `{operation, effect_id, outcome}`.
///
/// `Copy` and fixed-size, so it can be emitted from the upload and tick
/// paths without allocating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectTraceEvent {
    /// What was requested
    pub operation: EffectOperation,
    /// The effect id the request named
    pub effect_id: u16,
    /// What happened
    pub outcome: EffectOutcome,
}

impl EffectTraceEvent {
    /// Create a new effect event
    #[inline]
    pub const fn new(operation: EffectOperation, effect_id: u16, outcome: EffectOutcome) -> Self {
        Self {
            operation,
            effect_id,
            outcome,
        }
    }

    /// Create an event for a request that failed with `err`
    #[inline]
    pub fn rejected(operation: EffectOperation, effect_id: u16, err: &RegistryError) -> Self {
        Self::new(operation, effect_id, EffectOutcome::from(err))
    }

    /// Returns true if the request was rejected
    #[inline]
    pub const fn is_rejection(&self) -> bool {
        !self.outcome.is_success()
    }
}

/// Summary of one scheduler tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickTraceEvent {
    /// Monotonic tick counter
    pub tick_count: u64,
    /// Effects still playing after the tick
    pub active_effects: u32,
    /// Published weak motor magnitude
    pub weak_magnitude: u16,
    /// Published strong motor magnitude
    pub strong_magnitude: u16,
}

/// Device lifecycle events.
///
/// These carry owned strings and are not suitable for the tick path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceTraceEvent {
    /// A device session started
    DeviceOpened {
        /// Device identifier
        device_id: String,
        /// Registry capacity
        max_effects: usize,
    },

    /// A device session ended
    DeviceClosed {
        /// Device identifier
        device_id: String,
        /// Reason for closing
        reason: String,
    },

    /// A configuration was applied to a device
    ConfigApplied {
        /// Device identifier
        device_id: String,
        /// Human-readable summary of the configuration
        summary: String,
    },

    /// Writing output to the hardware failed
    OutputFailed {
        /// Device identifier
        device_id: String,
        /// Transport error message
        message: String,
    },
}

impl DeviceTraceEvent {
    /// Returns the device id this event refers to
    pub fn device_id(&self) -> &str {
        match self {
            DeviceTraceEvent::DeviceOpened { device_id, .. }
            | DeviceTraceEvent::DeviceClosed { device_id, .. }
            | DeviceTraceEvent::ConfigApplied { device_id, .. }
            | DeviceTraceEvent::OutputFailed { device_id, .. } => device_id,
        }
    }

    /// Returns true if this is an error event
    pub fn is_error(&self) -> bool {
        matches!(self, DeviceTraceEvent::OutputFailed { .. })
    }
}

/// Category for filtering trace records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceCategory {
    /// Effect request records
    Effect,
    /// Tick summaries
    Tick,
    /// Device lifecycle
    Device,
}

/// Any trace event, as stored by buffering providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceRecord {
    /// An effect request record
    Effect(EffectTraceEvent),
    /// A tick summary
    Tick(TickTraceEvent),
    /// A lifecycle event
    Device(DeviceTraceEvent),
}

impl TraceRecord {
    /// Returns the record category
    pub fn category(&self) -> TraceCategory {
        match self {
            TraceRecord::Effect(_) => TraceCategory::Effect,
            TraceRecord::Tick(_) => TraceCategory::Tick,
            TraceRecord::Device(_) => TraceCategory::Device,
        }
    }
}

impl fmt::Display for EffectTraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Effect(op={}, id={}, outcome={})",
            self.operation.as_str(),
            self.effect_id,
            self.outcome.as_str()
        )
    }
}

impl fmt::Display for TickTraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tick(tick={}, active={}, weak={}, strong={})",
            self.tick_count, self.active_effects, self.weak_magnitude, self.strong_magnitude
        )
    }
}

impl fmt::Display for DeviceTraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceTraceEvent::DeviceOpened {
                device_id,
                max_effects,
            } => write!(f, "DeviceOpened(id={device_id}, max_effects={max_effects})"),
            DeviceTraceEvent::DeviceClosed { device_id, reason } => {
                write!(f, "DeviceClosed(id={device_id}, reason={reason})")
            }
            DeviceTraceEvent::ConfigApplied { device_id, summary } => {
                write!(f, "ConfigApplied(id={device_id}, {summary})")
            }
            DeviceTraceEvent::OutputFailed { device_id, message } => {
                write!(f, "OutputFailed(id={device_id}, error={message})")
            }
        }
    }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceRecord::Effect(e) => e.fmt(f),
            TraceRecord::Tick(e) => e.fmt(f),
            TraceRecord::Device(e) => e.fmt(f),
        }
    }
}
