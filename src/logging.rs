use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log file.
pub const LOG_PATH_ENV: &str = "FLUXSTORE_LOG";

/// Initialize tracing with file output.
///
/// The library itself only emits `tracing` events; hosts call this to see
/// them. Nothing is installed unless `FLUXSTORE_LOG` names a file. The
/// filter comes from `RUST_LOG` and defaults to `info`.
///
/// Returns `false` when no subscriber was installed (variable unset, file
/// not creatable, or a global subscriber already present).
pub fn init_tracing() -> bool {
    let Some(log_path) = std::env::var(LOG_PATH_ENV).ok() else {
        return false;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Ok(file) = std::fs::File::create(&log_path) else {
        eprintln!("Warning: Failed to create log file: {}", log_path);
        return false;
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .is_ok()
}
