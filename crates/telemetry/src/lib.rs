//! Logging bootstrap for the gateway binaries.

use anyhow::anyhow;
use shelf_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `telemetry.log_level`. On Lambda, ANSI colours and
/// timestamps are dropped since CloudWatch stamps every line itself.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = env_filter(&settings.log_level)?;
    let on_lambda = shelf_kernel::running_on_lambda();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(!on_lambda);

    let result = match (settings.log_format, on_lambda) {
        (LogFormat::Json, _) => builder.json().flatten_event(true).try_init(),
        (LogFormat::Pretty, true) => builder.without_time().try_init(),
        (LogFormat::Pretty, false) => builder.try_init(),
    };

    result.map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))?;

    tracing::debug!(target: "shelf-telemetry", format = ?settings.log_format, "telemetry initialized");
    Ok(())
}

fn env_filter(default_directive: &str) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default_directive)
            .map_err(|err| anyhow!("invalid log level '{default_directive}': {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_directive() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert!(env_filter("shelf=[").is_err());
        assert!(env_filter("shelf_invoker=debug,info").is_ok());
    }
}
