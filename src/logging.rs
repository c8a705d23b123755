use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Env var naming a log file. When unset, logs go to stderr.
pub const LOG_FILE_ENV: &str = "SCHOOLHUB_LOG";

const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber.
///
/// Stdout carries command output only. Logs go to stderr, or with
/// `SCHOOLHUB_LOG=<path>` to `<path>.<unix-secs>.<pid>` without colour codes.
/// `RUST_LOG` overrides the default `info` filter.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let (writer, ansi) = match std::env::var_os(LOG_FILE_ENV) {
        Some(base) => {
            let path = log_file_path(base.into());
            match File::create(&path) {
                Ok(file) => (BoxMakeWriter::new(Mutex::new(file)), false),
                Err(e) => {
                    eprintln!("Warning: cannot create log file {}: {}", path.display(), e);
                    (BoxMakeWriter::new(std::io::stderr), true)
                }
            }
        }
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(true)
        .with_timer(UtcTime::rfc_3339());

    tracing_subscriber::registry().with(filter).with(layer).init();
}

/// One file per process, so parallel invocations never interleave.
fn log_file_path(base: PathBuf) -> PathBuf {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let mut name = base.into_os_string();
    name.push(format!(".{}.{}", secs, std::process::id()));
    PathBuf::from(name)
}
