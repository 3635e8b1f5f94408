//! Diagnostics go to stderr; stdout is reserved for image data.
//!
//! [`init_with_level`] installs a plain `log` backend printing
//! `[elapsed LEVEL target] message`. With the `tracing` feature,
//! [`init_tracing`] installs a `tracing-subscriber` stack instead, which also
//! picks up `log` records and reports span timings.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

struct StderrLogger {
    level: LevelFilter,
    started: Instant,
}

impl StderrLogger {
    fn new(level: LevelFilter) -> Self {
        Self {
            level,
            started: Instant::now(),
        }
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // Module path without the crate prefix, e.g. `detector::pipeline`.
        let target = record.target();
        let target = target.split_once("::").map_or(target, |(_, rest)| rest);
        let _ = writeln!(
            std::io::stderr().lock(),
            "[{:>8.3}s {:<5} {target}] {}",
            self.started.elapsed().as_secs_f64(),
            record.level(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Install the stderr logger. Later calls keep the first level.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    let mut first = false;
    let logger = LOGGER.get_or_init(|| {
        first = true;
        StderrLogger::new(level)
    });
    if first {
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// Install a `tracing` subscriber on stderr, filtered by `RUST_LOG` or, when
/// that is unset, by `level`.
#[cfg(feature = "tracing")]
pub fn init_tracing(
    level: LevelFilter,
    json: bool,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::fmt::{format::FmtSpan, time::Uptime};
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));
    let output = fmt::layer()
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::CLOSE);
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(output.json().flatten_event(true)).try_init()
    } else {
        registry.with(output.with_timer(Uptime::default())).try_init()
    }
}
