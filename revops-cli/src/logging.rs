//! Logging setup: terminal output plus a persistent log file.

use std::path::Path;

use anyhow::{Context, Result};
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger,
};

/// Log at info level to the terminal and at debug level to `log_path`,
/// creating the parent directory if needed.
pub fn init(log_path: &Path) -> Result<()> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Debug, Config::default(), file),
    ])
    .context("Logger already initialized")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test on purpose: the global logger can only be installed once
    // per process.
    #[test]
    fn test_init_creates_log_directory_and_writes_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("revops.log");

        init(&path).unwrap();
        log::info!("logging smoke line");
        log::logger().flush();

        assert!(path.exists());
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("logging smoke line"));
    }
}
