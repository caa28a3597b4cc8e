use todo_client::{LogLevel, Logger};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` wins over `default_filter`.
pub fn init(default_filter: &str) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))
}

/// Routes client library logs into tracing
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => tracing::debug!(target: "todo_client", "{}", message),
            LogLevel::Info => tracing::info!(target: "todo_client", "{}", message),
            LogLevel::Warn => tracing::warn!(target: "todo_client", "{}", message),
            LogLevel::Error => tracing::error!(target: "todo_client", "{}", message),
        }
    }
}
