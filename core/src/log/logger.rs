use super::LogError;
use log::LevelFilter;
use log4rs::config::Logger;
use std::{collections::BTreeMap, env};

/// Per-module levels plus the root level, as parsed from a filter expression
pub(super) struct Loggers {
    loggers: BTreeMap<String, LevelFilter>,
    root_level: LevelFilter,
}

impl Loggers {
    pub fn root_level(&self) -> LevelFilter {
        self.root_level
    }

    pub fn level_of(&self, name: &str) -> Option<LevelFilter> {
        self.loggers.get(name).copied()
    }

    /// Module loggers inherit the root appenders
    pub fn items(&self) -> impl Iterator<Item = Logger> + '_ {
        self.loggers.iter().map(|(name, level)| Logger::builder().build(name.clone(), *level))
    }
}

#[derive(Default)]
pub(super) struct Builder {
    loggers: BTreeMap<String, LevelFilter>,
    root_level: Option<LevelFilter>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_expression(expression: &str) -> Self {
        let mut builder = Self::new();
        builder.parse_expression(expression);
        builder
    }

    pub fn parse_env(&mut self, var: &str) -> &mut Self {
        self.parse_expression(&env::var(var).unwrap_or_default())
    }

    /// Parses `level`, `module` or `module=level` items separated by commas.
    /// A bare module name enables every level for it. Invalid items are skipped.
    pub fn parse_expression(&mut self, expression: &str) -> &mut Self {
        for item in expression.split(',').map(str::trim).filter(|x| !x.is_empty()) {
            match parse_item(item) {
                Ok((None, level)) => {
                    self.root_level = Some(level);
                }
                Ok((Some(name), level)) => {
                    self.loggers.insert(name.to_string(), level);
                }
                Err(err) => println!("Ignoring invalid logging spec '{}': {}", item, err),
            }
        }
        self
    }

    pub fn build(&mut self) -> Loggers {
        Loggers { loggers: std::mem::take(&mut self.loggers), root_level: self.root_level.take().unwrap_or(LevelFilter::Info) }
    }
}

fn parse_item(item: &str) -> Result<(Option<&str>, LevelFilter), LogError> {
    let mut parts = item.split('=');
    match (parts.next(), parts.next().map(str::trim), parts.next()) {
        (Some(single), None, None) => match single.parse() {
            Ok(level) => Ok((None, level)),
            Err(_) => Ok((Some(single), LevelFilter::max())),
        },
        (Some(name), Some(""), None) => Ok((Some(name), LevelFilter::max())),
        (Some(name), Some(level), None) => {
            level.parse().map(|level| (Some(name), level)).map_err(|_| LogError::ParseLoggerSpec(level.to_string()))
        }
        _ => Err(LogError::ParseLoggerSpec(item.to_string())),
    }
}
