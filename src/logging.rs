//! Logging setup.
//!
//! Lines look like:
//!
//! ```text
//! 2024-03-01T12:30:00Z | INFO    | published 5 data points to namespace [CWMonitor]
//! ```

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Event formatter producing `<timestamp> | <LEVEL> | <message>` lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipeFormat;

/// Timestamp and level columns of a log line, including the trailing separator.
pub fn line_prefix(timestamp: DateTime<Utc>, level: Level) -> String {
    format!(
        "{} | {:<7} | ",
        timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        level.as_str()
    )
}

impl<S, N> FormatEvent<S, N> for PipeFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(writer, "{}", line_prefix(Utc::now(), *event.metadata().level()))?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Maps the command line verbosity flags to a level.
/// Default is INFO; `-v` DEBUG, `-vv` TRACE, `-q` ERROR.
pub fn level_for(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs the global subscriber writing to stderr. `RUST_LOG` is honoured
/// for targets other than this crate.
pub fn init_logging(verbose: u8, quiet: bool) {
    let level = level_for(verbose, quiet);

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("cwmonitor={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .event_format(PipeFormat)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_line_prefix() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        assert_eq!(line_prefix(ts, Level::INFO), "2024-03-01T12:30:00Z | INFO    | ");
        assert_eq!(line_prefix(ts, Level::ERROR), "2024-03-01T12:30:00Z | ERROR   | ");
    }

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(0, false), Level::INFO);
        assert_eq!(level_for(1, false), Level::DEBUG);
        assert_eq!(level_for(5, false), Level::TRACE);
        assert_eq!(level_for(2, true), Level::ERROR);
    }

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_formatted_event() {
        let buffer = Buffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .event_format(PipeFormat)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("unknown metric: {}", "bogus");
        });

        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        let columns: Vec<_> = output.trim_end().split(" | ").collect();
        assert_eq!(columns.len(), 3);
        assert!(DateTime::parse_from_rfc3339(columns[0]).is_ok());
        assert_eq!(columns[1], "WARN   ");
        assert_eq!(columns[2], "unknown metric: bogus");
    }
}
