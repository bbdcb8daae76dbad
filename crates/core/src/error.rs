//! Error taxonomy shared by the loader, the model and the controller.

use std::{io, num::ParseIntError, path::PathBuf};

use thiserror::Error;

use crate::configuration::{ConfigKey, Configuration};

/// Problems raised while reading or validating game settings.
///
/// None of these abort startup: the controller reports them to every view
/// and falls back to [`Configuration::default`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be opened or read.
    #[error("failed to read settings from {}: {source}", .path.display())]
    Io {
        /// Path of the settings file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// Reading from a settings stream failed part way.
    #[error("failed to read settings: {0}")]
    Read(#[source] io::Error),
    /// A line is not of the form `key: value`.
    #[error("line {line}: expected `key: value`, found {content:?}")]
    Malformed {
        /// One-based line number.
        line: usize,
        /// The offending line.
        content: String,
    },
    /// A line names a setting that does not exist.
    #[error("line {line}: no matching setting for {key:?}")]
    UnknownKey {
        /// One-based line number.
        line: usize,
        /// The unrecognised key.
        key: String,
    },
    /// A recognised setting carries a value that is not a base-10 integer.
    #[error("line {line}: {value:?} is not a valid integer for {key}")]
    InvalidValue {
        /// One-based line number.
        line: usize,
        /// Setting being assigned.
        key: ConfigKey,
        /// Raw value text.
        value: String,
        /// Integer parse failure.
        #[source]
        source: ParseIntError,
    },
    /// The settings parsed but do not describe a playable game.
    #[error("the selected configuration {0} is not consistent")]
    Inconsistent(Configuration),
    /// One or more lines of the settings file were rejected.
    #[error("{}", summarize(.0))]
    Rejected(Vec<ConfigError>),
}

fn summarize(problems: &[ConfigError]) -> String {
    let details = problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    match problems.len() {
        1 => format!("invalid settings: {details}"),
        n => format!("{n} invalid settings: {details}"),
    }
}

/// A guess the model refuses to evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    /// The guess lies outside the configured bounds.
    #[error("{guess} is outside the range [{min}, {max}]")]
    OutOfRange {
        /// Submitted number.
        guess: i32,
        /// Lower bound, inclusive.
        min: i32,
        /// Upper bound, inclusive.
        max: i32,
    },
}
