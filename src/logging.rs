//! Tracing subscriber setup for embedders without their own.

use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{GraphError, Result};

/// Installs a global fmt subscriber filtered by `level` (an `EnvFilter`
/// directive such as `"info"` or `"plangraph=trace"`).
pub fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level).map_err(|e| {
        GraphError::InvalidArgument(format!("invalid plangraph log filter {level:?}: {e}"))
    })?;
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .try_init()
        .map_err(|_| {
            GraphError::InvalidArgument(
                "plangraph logging: a global tracing subscriber is already installed".into(),
            )
        })
}
