//! Device-level playback: upload, play, tick, complete

use rumble_errors::RegistryError;
use rumble_ffb::{
    AggregationPolicy, DeviceConfig, DeviceOutput, EffectId, Envelope, ForceFeedbackDevice,
    MagnitudeRange, SharedDevice,
};
use rumble_test_helpers::prelude::*;
use rumble_tracing::{EffectOperation, EffectOutcome, MemoryProvider, TracingManager};

fn open(config: &DeviceConfig) -> Result<ForceFeedbackDevice, Box<dyn std::error::Error>> {
    Ok(ForceFeedbackDevice::from_config("pad0", config)?)
}

fn id(raw: u16) -> EffectId {
    EffectId::new(raw)
}

#[test]
fn test_reference_rumble_end_to_end() -> TestResult {
    let mut device = open(&DeviceConfig::default())?;
    device.upload(id(0), &reference_rumble())?;
    device.play(id(0))?;

    assert_eq!(device.tick(500), DeviceOutput::new(100, 200));
    assert_eq!(device.weak_magnitude(), 100);
    assert_eq!(device.strong_magnitude(), 200);

    assert_eq!(device.tick(600), DeviceOutput::ZERO);
    assert!(!device.scheduler().is_playing(id(0)));
    assert!(device.registry().contains(id(0)));
    Ok(())
}

#[test]
fn test_capacity_is_enforced_for_new_ids_only() -> TestResult {
    let mut device = open(&DeviceConfig::default())?;
    let capacity = device.max_effects();
    assert_eq!(capacity, 16);

    for raw in 0..16 {
        device.upload(id(raw), &rumble(raw, raw, 100, 0))?;
    }
    assert_eq!(
        must_err(device.upload(id(16), &reference_rumble())),
        RegistryError::CapacityExceeded { capacity: 16 }
    );

    device.upload(id(3), &reference_rumble())?;
    assert_eq!(device.registry().len(), 16);

    device.erase(id(0))?;
    device.upload(id(16), &reference_rumble())?;
    Ok(())
}

#[test]
fn test_erase_then_play_is_rejected() -> TestResult {
    let mut device = open(&DeviceConfig::default())?;
    device.upload(id(2), &reference_rumble())?;
    device.erase(id(2))?;

    assert_eq!(
        must_err(device.play(id(2))),
        RegistryError::UnknownEffectId(2)
    );
    assert_eq!(
        must_err(device.erase(id(2))),
        RegistryError::UnknownEffectId(2)
    );
    Ok(())
}

#[test]
fn test_erase_while_playing_silences() -> TestResult {
    let mut device = open(&DeviceConfig::default())?;
    device.upload(id(0), &rumble(300, 300, 0, 0))?;
    device.play(id(0))?;
    assert_eq!(device.tick(10), DeviceOutput::new(300, 300));

    device.erase(id(0))?;
    assert_eq!(device.scheduler().playing_count(), 0);
    assert_eq!(device.tick(10), DeviceOutput::ZERO);
    Ok(())
}

#[test]
fn test_envelope_boundaries() -> TestResult {
    let mut device = open(&DeviceConfig::default())?;
    device.upload(id(0), &constant(10_000, Envelope::new(100, 0, 50, 0), 200))?;
    device.play(id(0))?;

    let steps = [
        (0, 0),
        (50, 5_000),
        (50, 10_000),
        (50, 10_000),
        (25, 5_000),
    ];
    for (delta, level) in steps {
        let output = device.tick(delta);
        assert_eq!(
            output,
            DeviceOutput::new(level, level),
            "at {} ms",
            device.scheduler().clock_ms()
        );
    }

    assert_eq!(device.tick(25), DeviceOutput::ZERO);
    assert_eq!(device.scheduler().last_completed(), &[id(0)]);
    Ok(())
}

#[test]
fn test_ramp_interpolates() -> TestResult {
    let mut device = open(&DeviceConfig::default())?;
    device.upload(id(0), &ramp(0, 4000, 400))?;
    device.play(id(0))?;

    assert_eq!(device.tick(100), DeviceOutput::new(1000, 1000));
    assert_eq!(device.tick(200), DeviceOutput::new(3000, 3000));
    assert_eq!(device.tick(100), DeviceOutput::ZERO);
    Ok(())
}

#[test]
fn test_delay_postpones_output() -> TestResult {
    let mut device = open(&DeviceConfig::default())?;
    device.upload(id(0), &rumble(100, 200, 100, 50))?;
    device.play(id(0))?;

    assert_eq!(device.tick(0), DeviceOutput::ZERO);
    assert_eq!(device.tick(49), DeviceOutput::ZERO);
    assert!(device.scheduler().is_playing(id(0)));
    assert_eq!(device.tick(1), DeviceOutput::new(100, 200));
    assert_eq!(device.tick(99), DeviceOutput::new(100, 200));
    assert_eq!(device.tick(1), DeviceOutput::ZERO);
    Ok(())
}

#[test]
fn test_restart_resets_elapsed_time() -> TestResult {
    let mut device = open(&DeviceConfig::default())?;
    device.upload(id(0), &reference_rumble())?;
    device.play(id(0))?;
    device.tick(300);

    device.play(id(0))?;
    device.play(id(0))?;
    assert_eq!(device.scheduler().playing_count(), 1);

    assert_eq!(device.tick(800), DeviceOutput::new(100, 200));
    assert_eq!(device.tick(200), DeviceOutput::ZERO);
    Ok(())
}

#[test]
fn test_repeat_count() -> TestResult {
    let mut device = open(&DeviceConfig::default())?;
    device.upload(id(0), &rumble(10, 20, 100, 0))?;
    device.play_repeat(id(0), 2)?;

    assert_eq!(device.tick(50), DeviceOutput::new(10, 20));
    assert_eq!(device.tick(50), DeviceOutput::ZERO);
    assert!(device.scheduler().is_playing(id(0)));
    assert_eq!(device.tick(50), DeviceOutput::new(10, 20));
    assert_eq!(device.tick(50), DeviceOutput::ZERO);
    assert!(!device.scheduler().is_playing(id(0)));
    Ok(())
}

#[test]
fn test_play_count_zero_stops() -> TestResult {
    let mut device = open(&DeviceConfig::default())?;
    device.upload(id(0), &rumble(10, 20, 0, 0))?;
    device.play(id(0))?;
    device.tick(5);

    device.play_repeat(id(0), 0)?;
    assert!(!device.scheduler().is_playing(id(0)));
    assert_eq!(device.tick(5), DeviceOutput::ZERO);
    Ok(())
}

#[test]
fn test_stop_requires_playback() -> TestResult {
    let mut device = open(&DeviceConfig::default())?;
    device.upload(id(0), &reference_rumble())?;
    assert_eq!(
        must_err(device.stop(id(0))),
        RegistryError::UnknownEffectId(0)
    );

    device.play(id(0))?;
    device.stop(id(0))?;
    assert_eq!(device.tick(10), DeviceOutput::ZERO);
    Ok(())
}

#[test]
fn test_sum_saturates_at_range() -> TestResult {
    let config = DeviceConfig::new().with_magnitude(MagnitudeRange::new(0, 50_000));
    let mut device = open(&config)?;
    device.upload(id(0), &rumble(30_000, 10_000, 0, 0))?;
    device.upload(id(1), &rumble(30_000, 10_000, 0, 0))?;
    device.play(id(0))?;
    device.play(id(1))?;

    assert_eq!(device.tick(1), DeviceOutput::new(50_000, 20_000));
    Ok(())
}

#[test]
fn test_max_policy_picks_loudest() -> TestResult {
    let config = DeviceConfig::new().with_aggregation(AggregationPolicy::Max);
    let mut device = open(&config)?;
    device.upload(id(0), &rumble(40_000, 100, 0, 0))?;
    device.upload(id(1), &rumble(1_000, 9_000, 0, 0))?;
    device.play(id(0))?;
    device.play(id(1))?;

    assert_eq!(device.tick(1), DeviceOutput::new(40_000, 9_000));
    Ok(())
}

#[test]
fn test_gain_never_drops_below_range_min() -> TestResult {
    let config = DeviceConfig::new()
        .with_magnitude(MagnitudeRange::new(1000, u16::MAX))
        .with_gain(0x4000);
    let mut device = open(&config)?;
    device.upload(id(0), &rumble(2000, 2000, 0, 0))?;
    device.upload(id(1), &rumble(0, 8000, 0, 0))?;

    device.play(id(0))?;
    assert_eq!(device.tick(1), DeviceOutput::new(1000, 1000));

    device.stop(id(0))?;
    device.play(id(1))?;
    assert_eq!(device.tick(1), DeviceOutput::new(0, 2000));
    Ok(())
}

#[test]
fn test_gain_scales_output() -> TestResult {
    let config = DeviceConfig::new().with_gain(0x7FFF);
    let mut device = open(&config)?;
    device.upload(id(0), &reference_rumble())?;
    device.play(id(0))?;
    assert_eq!(device.tick(1), DeviceOutput::new(50, 100));

    device.set_gain(0);
    assert_eq!(device.tick(1), DeviceOutput::ZERO);
    Ok(())
}

#[test]
fn test_diagnostics_follow_requests() -> TestResult {
    let provider = MemoryProvider::new(64)?;
    let tracer = TracingManager::with_provider(Box::new(provider.clone()));
    let mut device = ForceFeedbackDevice::with_tracer("pad0", &DeviceConfig::default(), tracer)?;

    device.upload(id(0), &rumble(1, 1, 10, 0))?;
    device.upload(id(0), &rumble(2, 2, 10, 0))?;
    device.play(id(0))?;
    must_err(device.play(id(9)));
    device.tick(10);

    let events: Vec<_> = provider
        .effect_events()
        .into_iter()
        .map(|e| (e.operation, e.effect_id, e.outcome))
        .collect();
    assert_eq!(
        events,
        vec![
            (EffectOperation::Upload, 0, EffectOutcome::Applied),
            (EffectOperation::Upload, 0, EffectOutcome::Replaced),
            (EffectOperation::Play, 0, EffectOutcome::Applied),
            (EffectOperation::Play, 9, EffectOutcome::UnknownEffectId),
            (EffectOperation::Complete, 0, EffectOutcome::Applied),
        ]
    );
    assert_eq!(provider.tick_events().len(), 1);
    Ok(())
}

#[test]
fn test_shared_device_across_threads() -> TestResult {
    let shared = SharedDevice::new(open(&DeviceConfig::default())?);

    std::thread::scope(|scope| {
        for raw in 0..4u16 {
            let shared = shared.clone();
            scope.spawn(move || {
                must(shared.upload(id(raw), &rumble(100, 100, 0, 0)));
                must(shared.play(id(raw)));
            });
        }
    });

    assert_eq!(shared.with(|device| device.scheduler().playing_count()), 4);
    assert_eq!(shared.tick(1), DeviceOutput::new(400, 400));
    assert_eq!(shared.output(), DeviceOutput::new(400, 400));
    Ok(())
}

#[test]
fn test_close_forgets_everything() -> TestResult {
    let mut device = open(&DeviceConfig::default())?;
    device.upload(id(0), &reference_rumble())?;
    device.play(id(0))?;
    device.close("unplugged");

    assert!(device.registry().is_empty());
    assert_eq!(device.tick(10), DeviceOutput::ZERO);
    Ok(())
}
