//! log4rs setup: a rolling `app.log` for everything and a rolling `bench.log` that
//! receives only the `staffdb::bench` JSON events.

use std::path::{Path, PathBuf};

use log::LevelFilter;
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::append::rolling_file::policy::compound::{
    CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
};
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::benchlog;

pub const DEFAULT_RETENTION: usize = 7;
const ROLL_SIZE: u64 = 10 * 1024 * 1024;
const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}";

pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_ascii_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

fn rolling(
    dir: &Path,
    stem: &str,
    pattern: &str,
    keep: u32,
) -> Result<RollingFileAppender, Box<dyn std::error::Error>> {
    let roller =
        FixedWindowRoller::builder().build(&format!("{}", dir.join(format!("{stem}.{{}}.log")).display()), keep)?;
    let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(ROLL_SIZE)), Box::new(roller));
    Ok(RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build(dir.join(format!("{stem}.log")), Box::new(policy))?)
}

/// Build the log4rs config without installing it.
///
/// # Errors
/// Fails when the directory cannot be created or an appender cannot open its file.
pub fn build_config(
    dir: &Path,
    level: LevelFilter,
    retention: usize,
) -> Result<Config, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(dir)?;
    let keep = u32::try_from(retention.max(1)).unwrap_or(u32::MAX);
    let app = rolling(dir, "app", PATTERN, keep)?;
    let bench = rolling(dir, "bench", "{m}{n}", keep)?;
    Ok(Config::builder()
        .appender(Appender::builder().build("app", Box::new(app)))
        .appender(Appender::builder().build("bench", Box::new(bench)))
        .logger(
            Logger::builder().appender("bench").additive(false).build(benchlog::TARGET, LevelFilter::Info),
        )
        .build(Root::builder().appender("app").build(level))?)
}

/// Install logging for the process. A second call in the same process is ignored by
/// log4rs; failures are reported on stderr and leave logging disabled.
/// - dir: base directory for logs; current directory when `None`
/// - level: off|error|warn|info|debug|trace
/// - retention: rolled files to keep (default 7)
pub fn configure_logging(dir: Option<&Path>, level: Option<&str>, retention: Option<usize>) {
    let base = dir
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    let lvl = parse_level(level.unwrap_or("info"));
    match build_config(&base, lvl, retention.unwrap_or(DEFAULT_RETENTION)) {
        Ok(config) => {
            let _ = log4rs::init_config(config);
        }
        Err(e) => eprintln!("staffdb: logging disabled: {e}"),
    }
}

/// Configure logging from `STAFFDB_LOG_DIR`, `STAFFDB_LOG_LEVEL` and
/// `STAFFDB_LOG_RETENTION`.
pub fn configure_from_env() {
    let dir = std::env::var("STAFFDB_LOG_DIR").ok().map(PathBuf::from);
    let level = std::env::var("STAFFDB_LOG_LEVEL").ok();
    let retention = std::env::var("STAFFDB_LOG_RETENTION").ok().and_then(|s| s.parse::<usize>().ok());
    configure_logging(dir.as_deref(), level.as_deref(), retention);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels() {
        assert_eq!(parse_level("WARN"), LevelFilter::Warn);
        assert_eq!(parse_level("trace"), LevelFilter::Trace);
        assert_eq!(parse_level("nonsense"), LevelFilter::Info);
    }

    #[test]
    fn config_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("logs");
        build_config(&dir, LevelFilter::Debug, 3).unwrap();
        assert!(dir.is_dir());
        assert!(dir.join("app.log").exists());
        assert!(dir.join("bench.log").exists());
    }
}
