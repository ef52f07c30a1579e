//! Logging configuration using tracing

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub const LOG_ENV: &str = "FORMSMITH_LOG";

/// Filter used when `FORMSMITH_LOG` is unset. `-v` flags raise the crate's level.
pub fn default_filter(verbose: u8) -> String {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    format!("formsmith={},warn", level)
}

/// Initialize the logging subsystem. Logs go to stderr so stdout stays
/// reserved for command output.
///
/// # Examples
/// ```bash
/// FORMSMITH_LOG=debug formsmith blocks form.jsx
/// ```
pub fn init(verbose: u8) {
    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let result = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_timer(fmt::time::ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string())),
        )
        .try_init();

    if let Err(e) = result {
        eprintln!("Warning: logging already initialised: {}", e);
    }
}
