//! Collection cycles and the interval loop.

use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, error, info};

use super::{Config, MonitorError, Shutdown};
use crate::collector::Collector;
use crate::metrics::Registry;
use crate::model::Dimension;
use crate::publish::{PublishError, PublishSink, publish};

const TICKER_THREAD: &str = "cwmonitor-ticker";

/// Runs one cycle: collect, add `dimensions`, publish.
///
/// Returns the number of published points.
pub fn run_cycle<S: PublishSink + ?Sized>(
    collector: &mut Collector,
    dimensions: &[Dimension],
    config: &Config,
    sink: &mut S,
) -> Result<usize, PublishError> {
    let mut data = collector.collect();
    if let Some(timing) = collector.last_timing() {
        debug!("collected {} data points in {:?}", data.len(), timing.total);
    }
    data.add_dimensions(dimensions);

    match publish(&data, config.batch_size, &config.namespace, sink) {
        Ok(()) => {
            info!(
                "published {} data points to namespace [{}]",
                data.len(),
                config.namespace
            );
            Ok(data.len())
        }
        Err(e) => {
            error!("{}", e);
            Err(e)
        }
    }
}

/// Validates `config`, runs a first cycle and then one cycle per interval
/// until `shutdown` is triggered.
///
/// With `config.once` only the first cycle runs and its publish failure is
/// returned. Later cycles run on a dedicated thread; a cycle that overruns
/// its interval causes the missed ticks to be skipped, not queued.
pub fn run<S: PublishSink + Send + ?Sized>(
    config: &Config,
    registry: &Registry,
    sink: &mut S,
    shutdown: &Shutdown,
) -> Result<(), MonitorError> {
    config.validate().map_err(MonitorError::InvalidConfig)?;

    for line in config.summary_lines() {
        info!("{}", line);
    }

    let mut collector = Collector::new(registry.select(&config.metrics));
    info!("sampling metrics: {:?}", collector.metric_names());
    let dimensions = config.extra_dimensions();

    let first = run_cycle(&mut collector, &dimensions, config, sink);
    if config.once {
        return first.map(|_| ()).map_err(MonitorError::Publish);
    }

    thread::scope(|scope| {
        let handle = thread::Builder::new()
            .name(TICKER_THREAD.to_string())
            .spawn_scoped(scope, || {
                tick_loop(&mut collector, &dimensions, config, sink, shutdown)
            })
            .map_err(MonitorError::Spawn)?;
        handle.join().map_err(|_| MonitorError::Panicked)
    })?;

    info!("stopping monitoring");
    Ok(())
}

fn tick_loop<S: PublishSink + ?Sized>(
    collector: &mut Collector,
    dimensions: &[Dimension],
    config: &Config,
    sink: &mut S,
    shutdown: &Shutdown,
) {
    let interval = config.interval;
    let Some(mut next) = Instant::now().checked_add(interval) else {
        debug!("interval {:?} is beyond the clock range, waiting for shutdown", interval);
        shutdown.wait();
        return;
    };

    loop {
        if shutdown.wait_until(next) {
            debug!("shutdown requested, leaving ticker");
            return;
        }

        // Failures are logged by the cycle itself.
        let _ = run_cycle(collector, dimensions, config, sink);

        let Some((tick, skipped)) = next_tick(next, interval, Instant::now()) else {
            debug!("next tick is beyond the clock range, waiting for shutdown");
            shutdown.wait();
            return;
        };
        if skipped > 0 {
            debug!("cycle overran its interval, skipped {} ticks", skipped);
        }
        next = tick;
    }
}

/// First tick of the `previous + k * interval` grid that is later than `now`,
/// with the number of ticks passed over. `None` when it cannot be represented.
///
/// `interval` must be non-zero.
fn next_tick(previous: Instant, interval: Duration, now: Instant) -> Option<(Instant, u64)> {
    let next = previous.checked_add(interval)?;
    if next > now {
        return Some((next, 0));
    }

    let behind = now.duration_since(next).as_nanos();
    let skipped = u64::try_from(behind / interval.as_nanos() + 1).ok()?;
    let ahead = u64::try_from(interval.as_nanos().checked_mul(u128::from(skipped))?).ok()?;
    Some((next.checked_add(Duration::from_nanos(ahead))?, skipped))
}
