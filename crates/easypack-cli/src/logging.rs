use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::cli::Verbosity;

/// Initialize stderr logging.
///
/// The filter comes from `EASYPACK_LOG`, then `RUST_LOG`, and otherwise from
/// the verbosity flags: `--quiet` logs errors only, the default shows
/// warnings, `--verbose` shows debug output.
pub fn init(verbosity: Verbosity) {
    let default_level = match verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal => "warn",
        Verbosity::Verbose => "debug",
    };

    let env_filter = EnvFilter::try_from_env("EASYPACK_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(env_filter)
        .init();
}
