use std::fs::OpenOptions;
use std::panic::Location;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Severity of a record handed to a `LogSink`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Info,
    Warning,
    Error,
    Critical,
}

/// Destination of log records. Passed explicitly to the validator and the
/// order client.
pub trait LogSink {
    /// `origin` is the source location the record was emitted from.
    fn log(&self, level: Level, origin: &'static Location<'static>, message: &str);
}

// Level helpers live on the trait object so `#[track_caller]` sees the real
// call site; calls through a vtable would report the shim instead.
impl dyn LogSink + '_ {
    #[track_caller]
    pub fn info(&self, message: &str) {
        self.log(Level::Info, Location::caller(), message);
    }

    #[track_caller]
    pub fn warning(&self, message: &str) {
        self.log(Level::Warning, Location::caller(), message);
    }

    #[track_caller]
    pub fn error(&self, message: &str) {
        self.log(Level::Error, Location::caller(), message);
    }

    #[track_caller]
    pub fn critical(&self, message: &str) {
        self.log(Level::Critical, Location::caller(), message);
    }
}

/// Forwards records to `tracing`, tagged with a `caller` field of the form
/// `file:line`.
/// `tracing` has no level above error, so critical records are errors marked
/// with a `critical` field.
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, level: Level, origin: &'static Location<'static>, message: &str) {
        let caller = format!("{}:{}", origin.file(), origin.line());
        match level {
            Level::Info => tracing::info!(caller = %caller, "{message}"),
            Level::Warning => tracing::warn!(caller = %caller, "{message}"),
            Level::Error => tracing::error!(caller = %caller, "{message}"),
            Level::Critical => tracing::error!(caller = %caller, critical = true, "{message}"),
        }
    }
}

/// Install the global subscriber: console at INFO (or `RUST_LOG`), and the log
/// file at DEBUG. The file is opened once in append mode.
pub fn init_tracing(log_file: &str) -> std::io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("futurely=info"));
    let file_filter = EnvFilter::new("futurely=debug");

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact().with_filter(console_filter))
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .with_filter(file_filter),
        )
        .init();

    tracing::debug!("logging configured, appending to {log_file}");
    Ok(())
}
