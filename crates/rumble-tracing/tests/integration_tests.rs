//! Integration tests for rumble-tracing

use rumble_errors::{ConversionError, RegistryError};
use rumble_tracing::{
    DeviceTraceEvent, EffectOperation, EffectOutcome, EffectTraceEvent, MemoryProvider,
    TraceRecord, TracingError, TracingManager, trace_effect, trace_tick,
};

#[test]
fn test_manager_routes_all_event_kinds() -> Result<(), TracingError> {
    let provider = MemoryProvider::new(32)?;
    let mut manager = TracingManager::with_provider(Box::new(provider.clone()));
    manager.initialize()?;

    manager.emit_device_event(DeviceTraceEvent::DeviceOpened {
        device_id: "pad0".to_string(),
        max_effects: 16,
    });
    trace_effect!(manager, Upload, 0, Applied);
    trace_effect!(manager, Play, 0, Applied);
    trace_tick!(manager, 1, 1, 100, 200);
    trace_effect!(manager, Complete, 0, Applied);
    manager.emit_device_event(DeviceTraceEvent::DeviceClosed {
        device_id: "pad0".to_string(),
        reason: "shutdown".to_string(),
    });

    let records = provider.records();
    assert_eq!(records.len(), 6);
    assert!(matches!(records.first(), Some(TraceRecord::Device(DeviceTraceEvent::DeviceOpened { .. }))));
    assert!(matches!(records.get(3), Some(TraceRecord::Tick(_))));

    let metrics = manager.metrics();
    assert_eq!(metrics.effect_events_emitted, 3);
    assert_eq!(metrics.completions, 1);
    assert_eq!(metrics.device_events_emitted, 2);
    assert!(metrics.is_healthy());

    manager.shutdown();
    Ok(())
}

#[test]
fn test_rejections_map_from_registry_errors() -> Result<(), TracingError> {
    let provider = MemoryProvider::new(8)?;
    let manager = TracingManager::with_provider(Box::new(provider.clone()));

    let errors = [
        RegistryError::from(ConversionError::unsupported("friction")),
        RegistryError::CapacityExceeded { capacity: 2 },
        RegistryError::UnknownEffectId(9),
    ];
    for err in &errors {
        manager.emit_effect_event(EffectTraceEvent::rejected(EffectOperation::Upload, 9, err));
    }

    let outcomes: Vec<EffectOutcome> = provider.effect_events().iter().map(|e| e.outcome).collect();
    assert_eq!(
        outcomes,
        vec![
            EffectOutcome::UnsupportedKind,
            EffectOutcome::CapacityExceeded,
            EffectOutcome::UnknownEffectId,
        ]
    );
    assert_eq!(manager.metrics().rejected_requests, 3);
    Ok(())
}

#[test]
fn test_log_provider_with_subscriber() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let manager = TracingManager::new();
        trace_effect!(manager, Upload, 1, Applied);
        trace_effect!(manager, Stop, 1, UnknownEffectId);
        trace_tick!(manager, 7, 0, 0, 0);
        assert_eq!(manager.metrics().total_emitted(), 3);
    });
}
