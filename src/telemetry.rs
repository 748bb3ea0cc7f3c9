use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Environment variable holding an explicit log filter (e.g. `copsoq_score=debug`).
pub const LOG_ENV: &str = "COPSOQ_LOG";

/// Filter used when no environment override is set.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Install the global fmt subscriber, writing to stderr.
///
/// `COPSOQ_LOG` takes precedence, then `RUST_LOG`, then the verbosity default.
pub fn init(verbose: bool) -> Result<()> {
    let env_filter = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => filter,
        Err(_) => match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => {
                let value = default_filter(verbose);
                EnvFilter::try_new(value)
                    .with_context(|| format!("invalid log level/filter '{}'", value))?
            }
        },
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))
}
