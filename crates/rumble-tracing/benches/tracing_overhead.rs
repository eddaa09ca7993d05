//! Benchmark tests for tracing overhead on the tick path

use criterion::{Criterion, criterion_group, criterion_main};
use rumble_tracing::{
    DeviceTraceEvent, EffectOperation, EffectOutcome, EffectTraceEvent, MemoryProvider,
    TickTraceEvent, TracingError, TracingManager, TracingMetrics, TracingProvider,
};

struct NullProvider;

impl TracingProvider for NullProvider {
    fn initialize(&mut self) -> Result<(), TracingError> {
        Ok(())
    }

    fn emit_effect_event(&self, _event: EffectTraceEvent) {}

    fn emit_tick_event(&self, _event: TickTraceEvent) {}

    fn emit_device_event(&self, _event: DeviceTraceEvent) {}

    fn metrics(&self) -> TracingMetrics {
        TracingMetrics::default()
    }

    fn shutdown(&mut self) {}
}

fn tick(n: u64) -> TickTraceEvent {
    TickTraceEvent {
        tick_count: n,
        active_effects: 4,
        weak_magnitude: 1000,
        strong_magnitude: 2000,
    }
}

fn bench_manager_emission(c: &mut Criterion) {
    let manager = TracingManager::with_provider(Box::new(NullProvider));
    c.bench_function("emit_tick_null_provider", |b| {
        b.iter(|| manager.emit_tick_event(std::hint::black_box(tick(1))))
    });

    let mut disabled = TracingManager::with_provider(Box::new(NullProvider));
    disabled.set_enabled(false);
    c.bench_function("emit_tick_disabled", |b| {
        b.iter(|| disabled.emit_tick_event(std::hint::black_box(tick(1))))
    });

    let log = TracingManager::new();
    c.bench_function("emit_effect_log_provider", |b| {
        b.iter(|| {
            log.emit_effect_event(std::hint::black_box(EffectTraceEvent::new(
                EffectOperation::Play,
                1,
                EffectOutcome::Applied,
            )))
        })
    });
}

fn bench_memory_provider(c: &mut Criterion) {
    let Ok(provider) = MemoryProvider::new(1024) else {
        return;
    };
    let manager = TracingManager::with_provider(Box::new(provider));
    let mut n = 0u64;
    c.bench_function("emit_tick_memory_ring", |b| {
        b.iter(|| {
            n = n.wrapping_add(1);
            manager.emit_tick_event(std::hint::black_box(tick(n)))
        })
    });
}

criterion_group!(benches, bench_manager_emission, bench_memory_provider);
criterion_main!(benches);
