//! Game bounds and attempt budget.

use std::{fmt, str::FromStr};

use crate::error::ConfigError;

/// Lower bound used when the settings do not provide one.
pub const DEFAULT_MIN: i32 = 0;
/// Upper bound used when the settings do not provide one.
pub const DEFAULT_MAX: i32 = 100;
/// Attempt budget used when the settings do not provide one.
pub const DEFAULT_ATTEMPTS: i32 = 10;

/// Settings recognised in the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    /// Lower bound of the secret, inclusive.
    Min,
    /// Upper bound of the secret, inclusive.
    Max,
    /// Number of guesses allowed per game.
    Attempts,
}

impl ConfigKey {
    /// Every key, in file order.
    pub const ALL: [ConfigKey; 3] = [ConfigKey::Min, ConfigKey::Max, ConfigKey::Attempts];

    /// Literal name used in the settings file.
    pub fn name(self) -> &'static str {
        match self {
            ConfigKey::Min => "min",
            ConfigKey::Max => "max",
            ConfigKey::Attempts => "attempts",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConfigKey {
    type Err = ();

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.name() == input)
            .ok_or(())
    }
}

/// Immutable game configuration.
///
/// Any combination of values can be built; call [`Configuration::is_consistent`]
/// or [`Configuration::validate`] before handing one to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Configuration {
    min: i32,
    max: i32,
    attempts: i32,
}

impl Configuration {
    /// Start a builder seeded with the defaults.
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::default()
    }

    /// Lower bound, inclusive.
    pub fn min(&self) -> i32 {
        self.min
    }

    /// Upper bound, inclusive.
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Guesses allowed per game.
    pub fn attempts(&self) -> i32 {
        self.attempts
    }

    /// True when `min < max` and at least one attempt is allowed.
    pub fn is_consistent(&self) -> bool {
        self.min < self.max && self.attempts >= 1
    }

    /// Return the configuration unchanged when it is consistent.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.is_consistent() {
            Ok(self)
        } else {
            Err(ConfigError::Inconsistent(self))
        }
    }

    /// Whether `n` lies within the bounds.
    pub fn contains(&self, n: i32) -> bool {
        (self.min..=self.max).contains(&n)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] with {} attempts",
            self.min, self.max, self.attempts
        )
    }
}

/// Mutable construction step for [`Configuration`]. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigurationBuilder {
    min: Option<i32>,
    max: Option<i32>,
    attempts: Option<i32>,
}

impl ConfigurationBuilder {
    /// Override the lower bound.
    pub fn min(&mut self, value: i32) -> &mut Self {
        self.min = Some(value);
        self
    }

    /// Override the upper bound.
    pub fn max(&mut self, value: i32) -> &mut Self {
        self.max = Some(value);
        self
    }

    /// Override the attempt budget.
    pub fn attempts(&mut self, value: i32) -> &mut Self {
        self.attempts = Some(value);
        self
    }

    /// Apply the setter matching `key`.
    pub fn set(&mut self, key: ConfigKey, value: i32) -> &mut Self {
        match key {
            ConfigKey::Min => self.min(value),
            ConfigKey::Max => self.max(value),
            ConfigKey::Attempts => self.attempts(value),
        }
    }

    /// Freeze the builder, filling unset fields with the defaults.
    pub fn build(&self) -> Configuration {
        Configuration {
            min: self.min.unwrap_or(DEFAULT_MIN),
            max: self.max.unwrap_or(DEFAULT_MAX),
            attempts: self.attempts.unwrap_or(DEFAULT_ATTEMPTS),
        }
    }
}
