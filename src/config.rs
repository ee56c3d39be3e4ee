use std::{str::FromStr, time::Duration};

use url::Url;

use crate::check;

pub const DEFAULT_TUTORIAL_URL: &str = "https://core.telegram.org/bots/tutorial";
const DEFAULT_POLL_TIMEOUT_SECS: u32 = 30;
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("'TELOXIDE_TOKEN' variable should be specified in environment or '.env' file")]
    MissingToken,
    #[error("'{name}' should be {expected}, got '{value}'")]
    InvalidValue {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub tutorial_url: Url,
    pub poll_timeout_secs: u32,
    /// `None` disables eviction of idle user state.
    pub idle_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup("TELOXIDE_TOKEN")
            .map(|token| token.trim().to_owned())
            .unwrap_or_default();
        check!(!token.is_empty(), ConfigError::MissingToken);

        let tutorial_url = match lookup("TUTORIAL_URL") {
            Some(value) => Url::parse(value.trim()).map_err(|_| ConfigError::InvalidValue {
                name: "TUTORIAL_URL",
                value,
                expected: "an absolute url",
            })?,
            None => Url::parse(DEFAULT_TUTORIAL_URL).map_err(|_| ConfigError::InvalidValue {
                name: "TUTORIAL_URL",
                value: DEFAULT_TUTORIAL_URL.to_owned(),
                expected: "an absolute url",
            })?,
        };

        let poll_timeout_secs = parse_number(
            &lookup,
            "POLL_TIMEOUT_SECS",
            DEFAULT_POLL_TIMEOUT_SECS,
            "a number of seconds",
        )?;
        let idle_timeout_secs = parse_number(
            &lookup,
            "SCREAM_IDLE_TIMEOUT_SECS",
            DEFAULT_IDLE_TIMEOUT_SECS,
            "a number of seconds (0 disables eviction)",
        )?;

        Ok(Self {
            token,
            tutorial_url,
            poll_timeout_secs,
            idle_timeout: (idle_timeout_secs > 0).then(|| Duration::from_secs(idle_timeout_secs)),
        })
    }
}

fn parse_number<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                name,
                value,
                expected,
            }),
        None => Ok(default),
    }
}
