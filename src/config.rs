use std::env;
use std::time::Duration;

use rand::Rng;
use thiserror::Error;

pub const TYPING_MIN_VAR: &str = "NOVA_TYPING_MIN_MS";
pub const TYPING_MAX_VAR: &str = "NOVA_TYPING_MAX_MS";

const DEFAULT_TYPING_MIN_MS: u64 = 1000;
const DEFAULT_TYPING_MAX_MS: u64 = 2000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a whole number of milliseconds, got {value:?}")]
    InvalidMillis { var: &'static str, value: String },

    #[error("typing delay minimum ({min_ms}ms) is greater than the maximum ({max_ms}ms)")]
    InvertedDelayRange { min_ms: u64, max_ms: u64 },
}

/// Range the simulated "Nova is typing" pause is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingDelay {
    min: Duration,
    max: Duration,
}

impl TypingDelay {
    pub fn new(min: Duration, max: Duration) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::InvertedDelayRange {
                min_ms: min.as_millis() as u64,
                max_ms: max.as_millis() as u64,
            });
        }
        Ok(Self { min, max })
    }

    /// No pause at all, replies are scheduled immediately.
    pub fn instant() -> Self {
        Self {
            min: Duration::ZERO,
            max: Duration::ZERO,
        }
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    /// Draw a delay uniformly from `[min, max)`, or exactly `min` when the
    /// range is empty.
    pub fn sample(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..self.max)
    }
}

impl Default for TypingDelay {
    fn default() -> Self {
        Self {
            min: Duration::from_millis(DEFAULT_TYPING_MIN_MS),
            max: Duration::from_millis(DEFAULT_TYPING_MAX_MS),
        }
    }
}

/// Runtime settings for a chat session and its terminal front end.
#[derive(Debug, Clone, Default)]
pub struct ChatConfig {
    pub typing_delay: TypingDelay,
    /// Strip `**` markers instead of rendering them with ANSI styles.
    pub plain: bool,
    /// Print the transcript as JSON in one-shot mode.
    pub json: bool,
}

impl ChatConfig {
    /// Build a configuration from the process environment (after `.env` has
    /// been loaded).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let min_ms = read_millis(&lookup, TYPING_MIN_VAR, DEFAULT_TYPING_MIN_MS)?;
        let max_ms = read_millis(&lookup, TYPING_MAX_VAR, DEFAULT_TYPING_MAX_MS)?;

        let typing_delay =
            TypingDelay::new(Duration::from_millis(min_ms), Duration::from_millis(max_ms))?;

        Ok(Self {
            typing_delay,
            ..Self::default()
        })
    }
}

fn read_millis<F>(lookup: &F, var: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidMillis { var, value }),
    }
}
