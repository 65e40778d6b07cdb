pub const DEFAULT_LOGGER_ENV: &str = "RUST_LOG";

pub(super) const CONSOLE_APPENDER: &str = "stdout";
pub(super) const LOG_FILE_APPENDER: &str = "log_file";
pub(super) const ERR_LOG_FILE_APPENDER: &str = "err_log_file";

pub(super) const LOG_FILE_NAME: &str = "quarry.log";
pub(super) const ERR_LOG_FILE_NAME: &str = "quarry_err.log";

pub(super) const LOG_ARCHIVE_SUFFIX: &str = ".{}.gz";
pub(super) const LOG_FILE_BASE_ROLLS: u32 = 1;
pub(super) const LOG_FILE_MAX_ROLLS: u32 = 8;
pub(super) const LOG_FILE_MAX_SIZE: u64 = 100_000_000;

/// Console line pattern, UTC time denoted by the `Z` suffix
pub(super) const LOG_LINE_PATTERN_COLORED: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)(utc)}Z [{h({({l}):5.5})}] {m}{n}";
pub(super) const LOG_LINE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)(utc)}Z [{({l}):5.5}] {m}{n}";
