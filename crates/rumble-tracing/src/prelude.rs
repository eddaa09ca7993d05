//! Prelude for rumble-tracing
//!
//! This module re-exports the most commonly used types and macros.

pub use crate::{
    DeviceTraceEvent, EffectOperation, EffectOutcome, EffectTraceEvent, LogProvider,
    MemoryProvider, TickTraceEvent, TracingError, TracingManager, TracingMetrics,
    TracingProvider, trace_effect, trace_output_failed, trace_tick,
};
