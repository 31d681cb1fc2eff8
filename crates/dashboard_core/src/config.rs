//! Runtime configuration for the dashboard core.
//!
//! # Invariants
//! - `validate()` passing means every component can be constructed from the
//!   config without further checks.

use crate::logging::{default_log_level, normalize_level, LoggingError};
use crate::mood::DEFAULT_HISTORY_CAPACITY;
use crate::timer::pomodoro::PomodoroDurations;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// SQLite file. `None` keeps everything in memory.
    pub db_path: Option<PathBuf>,
    pub log_level: String,
    /// Absolute directory for rolling log files. `None` disables file logs.
    pub log_dir: Option<PathBuf>,
    pub pomodoro: PomodoroDurations,
    pub mood_history_capacity: usize,
    pub tick_interval: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
            pomodoro: PomodoroDurations::default(),
            mood_history_capacity: DEFAULT_HISTORY_CAPACITY,
            tick_interval: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Logging(LoggingError),
    RelativeLogDir(PathBuf),
    ZeroDuration(&'static str),
    ZeroCapacity,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(err) => write!(f, "{err}"),
            Self::RelativeLogDir(path) => {
                write!(f, "log_dir must be absolute, got `{}`", path.display())
            }
            Self::ZeroDuration(field) => write!(f, "`{field}` must be greater than zero"),
            Self::ZeroCapacity => f.write_str("`mood_history_capacity` must be greater than zero"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LoggingError> for ConfigError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl DashboardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        normalize_level(&self.log_level)?;
        if let Some(dir) = &self.log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::RelativeLogDir(dir.clone()));
            }
        }
        let durations = [
            ("pomodoro", self.pomodoro.pomodoro),
            ("short_break", self.pomodoro.short_break),
            ("long_break", self.pomodoro.long_break),
        ];
        if let Some((field, _)) = durations.into_iter().find(|(_, seconds)| *seconds == 0) {
            return Err(ConfigError::ZeroDuration(field));
        }
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroDuration("tick_interval"));
        }
        if self.mood_history_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, DashboardConfig};
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn default_config_is_valid() {
        let config = DashboardConfig::default();
        config.validate().unwrap();
        assert_eq!(config.pomodoro.pomodoro, 1500);
        assert_eq!(config.mood_history_capacity, 5);
    }

    #[test]
    fn rejects_relative_log_dir_and_zero_values() {
        let relative = DashboardConfig {
            log_dir: Some(PathBuf::from("logs")),
            ..DashboardConfig::default()
        };
        assert!(matches!(
            relative.validate(),
            Err(ConfigError::RelativeLogDir(_))
        ));

        let mut zero_break = DashboardConfig::default();
        zero_break.pomodoro.short_break = 0;
        assert_eq!(
            zero_break.validate(),
            Err(ConfigError::ZeroDuration("short_break"))
        );

        let zero_tick = DashboardConfig {
            tick_interval: Duration::ZERO,
            ..DashboardConfig::default()
        };
        assert_eq!(
            zero_tick.validate(),
            Err(ConfigError::ZeroDuration("tick_interval"))
        );
    }

    #[test]
    fn rejects_unknown_log_level() {
        let config = DashboardConfig {
            log_level: "chatty".to_string(),
            ..DashboardConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Logging(_))));
    }
}
