use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, EnvFilter};

/// Route tracing output to `<dir>/spintrack.log`; the terminal belongs to the UI.
///
/// `RUST_LOG` wins over `level`. Keep the returned guard alive until exit so
/// buffered lines get flushed.
pub fn init(dir: Option<&Path>, level: &str) -> Result<Option<WorkerGuard>> {
    let Some(dir) = dir else {
        return Ok(None);
    };
    std::fs::create_dir_all(dir).with_context(|| format!("create log dir: {}", dir.display()))?;
    let appender = tracing_appender::rolling::never(dir, "spintrack.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install subscriber: {}", e))?;
    Ok(Some(guard))
}
