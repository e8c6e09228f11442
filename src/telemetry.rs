//! Diagnostics for the CLI.
//!
//! Stdout carries command output (JSON records, session summaries) and is
//! meant to be piped, so log events never go there. They are written to a
//! file, and only when `AGRISYNC_LOG` asks for one.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Env var holding the base path of the log file.
pub const LOG_ENV: &str = "AGRISYNC_LOG";

/// Install the global subscriber if `AGRISYNC_LOG` is set.
///
/// Verbosity comes from `RUST_LOG` and defaults to `info`. A log file that
/// cannot be created is reported on stderr and the command runs unlogged.
pub fn init_tracing() {
    let Ok(base) = std::env::var(LOG_ENV) else {
        return;
    };
    let path = log_file_path(&base, chrono::Utc::now().timestamp(), std::process::id());

    let file = match std::fs::File::create(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("agrisync: cannot open log file {}: {}", path, e);
            return;
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}

/// `{base}.{unix_seconds}.{pid}`; back-to-back invocations never share a file.
fn log_file_path(base: &str, unix_seconds: i64, pid: u32) -> String {
    format!("{}.{}.{}", base, unix_seconds, pid)
}
