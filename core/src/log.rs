//! Logging facade shared by all Quarry crates.
//!
//! Crates log through the macros exported here (`quarry_core::info!` etc.) so the
//! backend can be swapped in one place. [`init_logger`] installs a log4rs backend with a
//! console appender and optional rolling file appenders.

mod appender;
mod consts;
mod logger;

pub use consts::DEFAULT_LOGGER_ENV;

#[doc(hidden)]
pub use ::log as __log;

use appender::AppenderSpec;
use consts::{CONSOLE_APPENDER, ERR_LOG_FILE_APPENDER, ERR_LOG_FILE_NAME, LOG_FILE_APPENDER, LOG_FILE_NAME};
use ::log::LevelFilter;
use log4rs::config::{Config, Root};
use logger::Builder;
use std::iter::once;
use thiserror::Error;

#[derive(Clone, Debug, Error)]
pub enum LogError {
    #[error("logger spec parsing error: {0}")]
    ParseLoggerSpec(String),

    #[error("cannot build appender {0}: {1}")]
    Appender(&'static str, String),

    #[error("invalid logger configuration: {0}")]
    Config(String),

    #[error("a global logger is already installed")]
    AlreadyInstalled,
}

pub type LogResult<T> = std::result::Result<T, LogError>;

#[macro_export]
macro_rules! trace {
    ($($t:tt)*) => (
        $crate::log::__log::trace!($($t)*)
    )
}

#[macro_export]
macro_rules! debug {
    ($($t:tt)*) => (
        $crate::log::__log::debug!($($t)*)
    )
}

#[macro_export]
macro_rules! info {
    ($($t:tt)*) => (
        $crate::log::__log::info!($($t)*)
    )
}

#[macro_export]
macro_rules! warn {
    ($($t:tt)*) => (
        $crate::log::__log::warn!($($t)*)
    )
}

#[macro_export]
macro_rules! error {
    ($($t:tt)*) => (
        $crate::log::__log::error!($($t)*)
    )
}

/// Installs the global log4rs logger.
///
/// `filters` is a comma separated list of `level` or `module=level` items, e.g.
/// `info,quarry_blockmanager=trace`. When empty, the [`DEFAULT_LOGGER_ENV`] environment
/// variable is read instead. When `log_dir` is set, all records are also written to a
/// rolling log file and warnings and errors to a second one.
pub fn init_logger(log_dir: Option<&str>, filters: &str) -> LogResult<()> {
    let loggers = if filters.is_empty() {
        Builder::new().parse_env(DEFAULT_LOGGER_ENV).build()
    } else {
        Builder::from_expression(filters).build()
    };

    let mut console = AppenderSpec::console(CONSOLE_APPENDER, None);
    let mut file = log_dir.map(|dir| AppenderSpec::roller(LOG_FILE_APPENDER, None, dir, LOG_FILE_NAME)).transpose()?;
    let mut err_file =
        log_dir.map(|dir| AppenderSpec::roller(ERR_LOG_FILE_APPENDER, Some(LevelFilter::Warn), dir, ERR_LOG_FILE_NAME)).transpose()?;

    let specs: Vec<&mut AppenderSpec> = once(&mut console).chain(file.iter_mut()).chain(err_file.iter_mut()).collect();
    let names: Vec<&'static str> = specs.iter().map(|spec| spec.name).collect();
    let appenders = specs.into_iter().map(|spec| spec.appender()).collect::<LogResult<Vec<_>>>()?;

    let config = Config::builder()
        .appenders(appenders)
        .loggers(loggers.items())
        .build(Root::builder().appenders(names).build(loggers.root_level()))
        .map_err(|err| LogError::Config(err.to_string()))?;

    log4rs::init_config(config).map_err(|_| LogError::AlreadyInstalled)?;
    Ok(())
}
