//! Logger setup: terminal and/or file output through simplelog.
use crate::algebra::error::{AlgebraError, AlgebraResult};
use chrono::Local;
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::File;
use std::path::Path;

/// `log_<date>_<time>.txt` in the working directory
pub fn default_log_file_name() -> String {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("log_{}.txt", date_and_time)
}

/// Level names as written in task documents: off, error, warn, info, debug, trace.
pub fn parse_level(name: &str) -> AlgebraResult<LevelFilter> {
    name.trim()
        .parse::<LevelFilter>()
        .map_err(|_| AlgebraError::Config(format!("unknown log level '{}'", name)))
}

/// Installs the global logger. A second call in the same process is ignored, since `log`
/// accepts exactly one logger.
pub fn init_logger(level: LevelFilter, console: bool, file: Option<&Path>) -> AlgebraResult<()> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if console {
        loggers.push(TermLogger::new(
            level,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if let Some(path) = file {
        let file = File::create(path).map_err(|e| {
            AlgebraError::Config(format!("cannot create log file {}: {}", path.display(), e))
        })?;
        loggers.push(WriteLogger::new(level, Config::default(), file));
    }
    if !loggers.is_empty() {
        let _ = CombinedLogger::init(loggers);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug").unwrap(), LevelFilter::Debug);
        assert_eq!(parse_level("WARN").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_level(" off ").unwrap(), LevelFilter::Off);
        assert!(matches!(parse_level("loud"), Err(AlgebraError::Config(_))));
    }

    #[test]
    fn test_default_log_file_name() {
        let name = default_log_file_name();
        assert!(name.starts_with("log_"));
        assert!(name.ends_with(".txt"));
    }

    #[test]
    fn test_file_logger_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("algebra.log");
        init_logger(LevelFilter::Info, false, Some(&path)).unwrap();
        assert!(path.exists());
        let missing = dir.path().join("no_such_dir").join("algebra.log");
        assert!(init_logger(LevelFilter::Info, false, Some(&missing)).is_err());
    }
}
