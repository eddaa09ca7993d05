//! Device worker task
//!
//! One tokio task owns a [`ForceFeedbackDevice`] and its [`OutputSink`]. It
//! drains a bounded request queue and ticks the device on a fixed interval,
//! so every operation on the device happens in one place, in order.
//! Callers talk to it through a cloneable [`DeviceHandle`].

use std::time::Duration;

use rumble_errors::EffectResult;
use rumble_ffb::{DeviceConfig, DeviceOutput, EffectDescriptor, EffectId, FfRequest, ForceFeedbackDevice};
use rumble_tracing::trace_output_failed;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use crate::{EngineError, EngineResult, OutputSink};

/// Requests a handle can queue before senders wait
pub const DEFAULT_QUEUE_DEPTH: usize = 64;

const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

/// Worker settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerConfig {
    /// Interval between ticks, at least 1 ms
    pub tick_period: Duration,
    /// Capacity of the request queue, at least 1
    pub queue_depth: usize,
}

impl WorkerConfig {
    /// Worker ticking every `tick_period`
    pub fn new(tick_period: Duration) -> Self {
        Self {
            tick_period: tick_period.max(MIN_TICK_PERIOD),
            queue_depth: DEFAULT_QUEUE_DEPTH,
        }
    }

    /// Worker settings matching a device configuration
    pub fn from_device_config(config: &DeviceConfig) -> Self {
        Self::new(config.tick_period())
    }

    /// Set the request queue capacity
    pub fn with_queue_depth(mut self, queue_depth: usize) -> Self {
        self.queue_depth = queue_depth.max(1);
        self
    }
}

/// Converts wall-clock progress into whole-millisecond tick deltas
///
/// The sub-millisecond remainder of each step is carried into the next, so
/// the sum of deltas never drifts from elapsed time.
#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    last: Instant,
    carry: Duration,
}

impl TickClock {
    /// Start measuring at `start`
    pub fn new(start: Instant) -> Self {
        Self {
            last: start,
            carry: Duration::ZERO,
        }
    }

    /// Whole milliseconds elapsed since the previous call
    pub fn advance(&mut self, now: Instant) -> u32 {
        let total = now
            .saturating_duration_since(self.last)
            .saturating_add(self.carry);
        self.last = now;

        let whole = u64::try_from(total.as_millis()).unwrap_or(u64::MAX);
        self.carry = total.saturating_sub(Duration::from_millis(whole));
        u32::try_from(whole).unwrap_or(u32::MAX)
    }

    /// Time not yet reported
    pub fn carry(&self) -> Duration {
        self.carry
    }
}

/// Counters reported when a worker exits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkerSummary {
    /// Ticks processed
    pub ticks: u64,
    /// Requests handled, accepted or rejected
    pub requests: u64,
    /// Sink writes that failed
    pub output_failures: u64,
}

#[derive(Debug)]
enum Command {
    Request {
        request: FfRequest,
        reply: oneshot::Sender<EffectResult>,
    },
    Shutdown {
        reason: String,
    },
}

/// Cloneable handle to a running device worker
#[derive(Debug, Clone)]
pub struct DeviceHandle {
    commands: mpsc::Sender<Command>,
    output: watch::Receiver<DeviceOutput>,
}

impl DeviceHandle {
    /// Queue a request and wait for the device's answer
    ///
    /// # Errors
    ///
    /// - [`EngineError::WorkerClosed`] if the worker has exited
    /// - [`EngineError::Request`] if the device rejected the request
    pub async fn request(&self, request: FfRequest) -> EngineResult {
        let (reply, response) = oneshot::channel();
        if self
            .commands
            .send(Command::Request { request, reply })
            .await
            .is_err()
        {
            return Err(EngineError::WorkerClosed);
        }
        match response.await {
            Ok(result) => result.map_err(EngineError::from),
            Err(_) => Err(EngineError::WorkerClosed),
        }
    }

    /// Store or replace an effect
    ///
    /// # Errors
    ///
    /// See [`DeviceHandle::request`].
    pub async fn upload(&self, id: EffectId, descriptor: EffectDescriptor) -> EngineResult {
        self.request(FfRequest::Upload { id, descriptor }).await
    }

    /// Remove an effect
    ///
    /// # Errors
    ///
    /// See [`DeviceHandle::request`].
    pub async fn erase(&self, id: EffectId) -> EngineResult {
        self.request(FfRequest::Erase { id }).await
    }

    /// Start an effect for one pass
    ///
    /// # Errors
    ///
    /// See [`DeviceHandle::request`].
    pub async fn play(&self, id: EffectId) -> EngineResult {
        self.play_repeat(id, 1).await
    }

    /// Start an effect for `count` passes; zero stops it
    ///
    /// # Errors
    ///
    /// See [`DeviceHandle::request`].
    pub async fn play_repeat(&self, id: EffectId, count: u32) -> EngineResult {
        self.request(FfRequest::Play { id, count }).await
    }

    /// Stop an effect
    ///
    /// # Errors
    ///
    /// See [`DeviceHandle::request`].
    pub async fn stop(&self, id: EffectId) -> EngineResult {
        self.request(FfRequest::Stop { id }).await
    }

    /// Change the device gain
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::WorkerClosed`] if the worker has exited.
    pub async fn set_gain(&self, gain: u16) -> EngineResult {
        self.request(FfRequest::SetGain { gain }).await
    }

    /// Ask the worker to silence the device and exit
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::WorkerClosed`] if it already has.
    pub async fn shutdown(&self, reason: impl Into<String>) -> EngineResult {
        self.commands
            .send(Command::Shutdown {
                reason: reason.into(),
            })
            .await
            .map_err(|closed| {
                debug!(error = %closed, "shutdown requested after worker exit");
                EngineError::WorkerClosed
            })
    }

    /// Output published by the most recent tick
    pub fn output(&self) -> DeviceOutput {
        *self.output.borrow()
    }

    /// Receiver notified after every tick
    pub fn subscribe_output(&self) -> watch::Receiver<DeviceOutput> {
        self.output.clone()
    }

    /// True once the worker has exited
    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }
}

/// The task side of a device worker
#[derive(Debug)]
pub struct DeviceWorker<S> {
    device: ForceFeedbackDevice,
    sink: S,
    commands: mpsc::Receiver<Command>,
    output: watch::Sender<DeviceOutput>,
    tick_period: Duration,
    summary: WorkerSummary,
}

impl<S: OutputSink> DeviceWorker<S> {
    /// Pair a worker with its handle without spawning it
    pub fn new(device: ForceFeedbackDevice, sink: S, config: WorkerConfig) -> (Self, DeviceHandle) {
        let (command_tx, command_rx) = mpsc::channel(config.queue_depth.max(1));
        let (output_tx, output_rx) = watch::channel(device.output());

        let worker = Self {
            device,
            sink,
            commands: command_rx,
            output: output_tx,
            tick_period: config.tick_period.max(MIN_TICK_PERIOD),
            summary: WorkerSummary::default(),
        };
        let handle = DeviceHandle {
            commands: command_tx,
            output: output_rx,
        };
        (worker, handle)
    }

    /// Process requests and ticks until shutdown or until every handle is dropped
    pub async fn run(mut self) -> WorkerSummary {
        let mut ticker = interval(self.tick_period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut clock = TickClock::new(Instant::now());

        info!(
            device = %self.device.name(),
            tick_period = ?self.tick_period,
            "device worker started"
        );

        let reason = loop {
            tokio::select! {
                biased;

                // ready at most once per period, so requests still get through
                now = ticker.tick() => {
                    let delta_ms = clock.advance(now);
                    self.tick(delta_ms);
                }
                command = self.commands.recv() => match command {
                    Some(Command::Request { request, reply }) => {
                        let result = self.device.handle(request);
                        self.summary.requests = self.summary.requests.saturating_add(1);
                        if reply.send(result).is_err() {
                            debug!(device = %self.device.name(), "requester went away before the reply");
                        }
                    }
                    Some(Command::Shutdown { reason }) => break reason,
                    None => break String::from("all handles dropped"),
                },
            }
        };

        self.finish(&reason);
        self.summary
    }

    fn tick(&mut self, delta_ms: u32) {
        let output = self.device.tick(delta_ms);
        self.summary.ticks = self.summary.ticks.saturating_add(1);
        self.write(output);
        self.output.send_replace(output);
    }

    fn write(&mut self, output: DeviceOutput) {
        if let Err(err) = self.sink.write_output(output) {
            self.summary.output_failures = self.summary.output_failures.saturating_add(1);
            warn!(device = %self.device.name(), error = %err, %output, "output write failed");
            trace_output_failed!(self.device.tracer(), self.device.name(), err);
        }
    }

    fn finish(&mut self, reason: &str) {
        self.device.close(reason);
        self.write(DeviceOutput::ZERO);
        self.output.send_replace(DeviceOutput::ZERO);
        info!(
            device = %self.device.name(),
            reason,
            ticks = self.summary.ticks,
            output_failures = self.summary.output_failures,
            "device worker stopped"
        );
    }
}

/// Spawn a worker for `device` on the current tokio runtime
pub fn spawn_device_worker<S: OutputSink>(
    device: ForceFeedbackDevice,
    sink: S,
    config: WorkerConfig,
) -> (DeviceHandle, JoinHandle<WorkerSummary>) {
    let (worker, handle) = DeviceWorker::new(device, sink, config);
    (handle, tokio::spawn(worker.run()))
}

/// Open a device from `config` and spawn its worker
///
/// # Errors
///
/// Returns [`EngineError::Setup`] if the configuration is invalid.
pub fn spawn_from_config<S: OutputSink>(
    name: impl Into<String>,
    config: &DeviceConfig,
    sink: S,
) -> EngineResult<(DeviceHandle, JoinHandle<WorkerSummary>)> {
    let device = ForceFeedbackDevice::from_config(name, config)?;
    Ok(spawn_device_worker(
        device,
        sink,
        WorkerConfig::from_device_config(config),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_clock_carries_remainder() {
        let start = Instant::now();
        let mut clock = TickClock::new(start);

        assert_eq!(clock.advance(start + Duration::from_micros(1500)), 1);
        assert_eq!(clock.carry(), Duration::from_micros(500));
        assert_eq!(clock.advance(start + Duration::from_micros(3000)), 2);
        assert_eq!(clock.carry(), Duration::ZERO);
        assert_eq!(clock.advance(start + Duration::from_micros(3400)), 0);
        assert_eq!(clock.advance(start + Duration::from_micros(4000)), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clock_ignores_backwards_time() {
        let start = Instant::now();
        let mut clock = TickClock::new(start + Duration::from_millis(10));
        assert_eq!(clock.advance(start), 0);
    }

    #[test]
    fn test_config_floors() {
        let config = WorkerConfig::new(Duration::ZERO).with_queue_depth(0);
        assert_eq!(config.tick_period, Duration::from_millis(1));
        assert_eq!(config.queue_depth, 1);
        assert_eq!(
            WorkerConfig::from_device_config(&DeviceConfig::default()).tick_period,
            Duration::from_millis(8)
        );
    }
}
