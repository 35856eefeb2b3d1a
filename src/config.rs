//! Runtime settings for the `minipy` binary, read from the environment.
//!
//! | Variable       | Values                                      | Default |
//! |----------------|---------------------------------------------|---------|
//! | `MINIPY_LOG`   | `off`, `error`, `warn`, `info`, `debug`, `trace` | `warn`  |
//! | `MINIPY_COLOR` | `always`, `never`, `auto`                   | `auto`  |
//!
//! Unrecognised values fall back to the default.

use std::{env, fmt};
use tracing::level_filters::LevelFilter;

const LOG_ENV: &str = "MINIPY_LOG";
const COLOR_ENV: &str = "MINIPY_COLOR";

/// When to highlight driver diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    Always,
    Never,
    /// Colour only when stdout is a terminal
    #[default]
    Auto,
}

impl ColorChoice {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "always" | "1" | "true" | "yes" | "on" => Some(ColorChoice::Always),
            "never" | "0" | "false" | "no" | "off" => Some(ColorChoice::Never),
            "auto" => Some(ColorChoice::Auto),
            _ => None,
        }
    }
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorChoice::Always => write!(f, "always"),
            ColorChoice::Never => write!(f, "never"),
            ColorChoice::Auto => write!(f, "auto"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub log_level: LevelFilter,
    pub color: ColorChoice,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LevelFilter::WARN,
            color: ColorChoice::Auto,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_values(
            env::var(LOG_ENV).ok().as_deref(),
            env::var(COLOR_ENV).ok().as_deref(),
        )
    }

    /// Build a config from raw variable values; `None` means unset.
    pub fn from_values(log: Option<&str>, color: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            log_level: log.and_then(parse_level).unwrap_or(defaults.log_level),
            color: color.and_then(ColorChoice::parse).unwrap_or(defaults.color),
        }
    }

    /// Resolve [`ColorChoice::Auto`] against whether stdout is a terminal.
    pub fn use_color(&self, stdout_is_tty: bool) -> bool {
        match self.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => stdout_is_tty,
        }
    }
}

fn parse_level(value: &str) -> Option<LevelFilter> {
    match value.trim().to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::OFF),
        "error" => Some(LevelFilter::ERROR),
        "warn" | "warning" => Some(LevelFilter::WARN),
        "info" => Some(LevelFilter::INFO),
        "debug" => Some(LevelFilter::DEBUG),
        "trace" => Some(LevelFilter::TRACE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(Config::from_values(None, None), Config::default());
    }

    #[test]
    fn test_parses_values_case_insensitively() {
        let config = Config::from_values(Some(" Debug "), Some("NEVER"));

        assert_eq!(config.log_level, LevelFilter::DEBUG);
        assert_eq!(config.color, ColorChoice::Never);
    }

    #[test]
    fn test_unknown_values_fall_back() {
        let config = Config::from_values(Some("loud"), Some("rainbow"));

        assert_eq!(config.log_level, LevelFilter::WARN);
        assert_eq!(config.color, ColorChoice::Auto);
    }

    #[test]
    fn test_use_color() {
        let auto = Config::default();
        assert!(auto.use_color(true));
        assert!(!auto.use_color(false));

        let always = Config::from_values(None, Some("always"));
        assert!(always.use_color(false));

        let never = Config::from_values(None, Some("never"));
        assert!(!never.use_color(true));
    }
}
