//! cwmonitor - host and container metrics agent.
//!
//! Samples the selected metrics every interval and publishes them, in
//! batches, as JSON lines on stdout or appended to a file.

use tikv_jemallocator::Jemalloc;
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{CommandFactory, FromArgMatches, Parser};
use tracing::{error, info, warn};

use cwmonitor::logging::init_logging;
use cwmonitor::metrics::Registry;
use cwmonitor::monitor::{self, Config, DEFAULT_METRICS, DEFAULT_NAMESPACE, Shutdown};
use cwmonitor::publish::{BATCH_SIZE, JsonLinesSink, PublishSink};
use cwmonitor::util::BuildInfo;

/// Host and container metrics agent.
#[derive(Parser, Debug)]
#[command(name = "cwmonitor", about = "Host and container metrics agent", version)]
struct Args {
    /// Comma separated metrics to collect:
    /// cpu, memory, swap, disk, docker-stats, docker-health.
    #[arg(long, env = "CWMONITOR_METRICS", default_value = DEFAULT_METRICS)]
    metrics: String,

    /// Collection interval in minutes.
    #[arg(long, env = "CWMONITOR_INTERVAL", default_value_t = 1)]
    interval: u64,

    /// Collect and publish once, then exit.
    #[arg(long)]
    once: bool,

    /// Namespace the data points are published under.
    #[arg(long, env = "CWMONITOR_NAMESPACE", default_value = DEFAULT_NAMESPACE)]
    namespace: String,

    /// Host identifier added as the `Host` dimension of every data point.
    #[arg(long = "hostid", env = "CWMONITOR_ID")]
    host_id: Option<String>,

    /// Container label used to name containers in their dimension.
    #[arg(long, env = "CWMONITOR_DOCKER_LABEL")]
    docker_label: Option<String>,

    /// Maximum number of data points per publish call.
    #[arg(long, default_value_t = BATCH_SIZE)]
    batch_size: usize,

    /// Path to /proc filesystem (for testing/mocking).
    #[arg(long, default_value = "/proc")]
    proc_path: PathBuf,

    /// Append published batches to this file instead of writing to stdout.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            namespace: self.namespace.clone(),
            interval: Duration::from_secs(self.interval.saturating_mul(60)),
            host_id: self.host_id.clone().unwrap_or_default(),
            metrics: self.metrics.clone(),
            once: self.once,
            docker_label: self.docker_label.clone().filter(|l| !l.is_empty()),
            batch_size: self.batch_size,
            proc_path: self.proc_path.clone(),
        }
    }
}

/// Parses the command line; `--version` prints the full build information.
fn parse_args() -> Args {
    let long_version: &'static str = Box::leak(BuildInfo::current().to_string().into_boxed_str());
    let matches = Args::command().long_version(long_version).get_matches();
    Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
}

fn open_sink(output: Option<&PathBuf>) -> Box<dyn PublishSink + Send> {
    match output {
        Some(path) => match JsonLinesSink::append_to(path) {
            Ok(sink) => {
                info!("publishing to {}", path.display());
                Box::new(sink)
            }
            Err(e) => {
                error!("cannot open {}: {}", path.display(), e);
                process::exit(1);
            }
        },
        None => Box::new(JsonLinesSink::stdout()),
    }
}

fn main() {
    let args = parse_args();

    init_logging(args.verbose, args.quiet);
    info!("cwmonitor {}", BuildInfo::current());

    let config = args.config();
    let registry = Registry::standard(&config);
    let mut sink = open_sink(args.output.as_ref());

    let shutdown = Shutdown::new();
    let handle = shutdown.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("received shutdown signal");
        handle.trigger();
    }) {
        warn!("failed to set Ctrl-C handler: {}", e);
    }

    if let Err(e) = monitor::run(&config, &registry, &mut sink, &shutdown) {
        error!("{}", e);
        process::exit(1);
    }
}
