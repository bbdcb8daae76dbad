//! Reader for the `key: value` settings file.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::{
    configuration::{ConfigKey, Configuration},
    error::ConfigError,
};

static SETTING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<key>[^:\s]+):\s+(?P<value>.*?)\s*$")
        .expect("failed to compile settings line regex")
});

/// Load and build the configuration stored at `path`.
///
/// The file handle is dropped before returning on every path. Per-line
/// problems are collected so that a single [`ConfigError::Rejected`] lists
/// all of them; I/O failures abort the read immediately.
pub fn load_configuration(path: impl AsRef<Path>) -> Result<Configuration, ConfigError> {
    let path = path.as_ref();
    let io_error = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(io_error)?;
    debug!(path = %path.display(), "Reading settings");
    parse_settings(BufReader::new(file)).map_err(|err| match err {
        ConfigError::Read(source) => io_error(source),
        other => other,
    })
}

/// Parse settings from any buffered reader.
pub fn parse_settings(reader: impl BufRead) -> Result<Configuration, ConfigError> {
    let mut builder = Configuration::builder();
    let mut problems = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(ConfigError::Read)?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(index + 1, &line) {
            Ok((key, value)) => {
                builder.set(key, value);
            }
            Err(err) => {
                warn!("Ignoring setting: {err}");
                problems.push(err);
            }
        }
    }

    if problems.is_empty() {
        Ok(builder.build())
    } else {
        Err(ConfigError::Rejected(problems))
    }
}

fn parse_line(line: usize, content: &str) -> Result<(ConfigKey, i32), ConfigError> {
    let caps = SETTING_RE
        .captures(content)
        .ok_or_else(|| ConfigError::Malformed {
            line,
            content: content.to_string(),
        })?;
    let raw_key = &caps["key"];
    let raw_value = &caps["value"];

    let key = raw_key
        .parse::<ConfigKey>()
        .map_err(|_| ConfigError::UnknownKey {
            line,
            key: raw_key.to_string(),
        })?;
    let value = raw_value
        .parse::<i32>()
        .map_err(|source| ConfigError::InvalidValue {
            line,
            key,
            value: raw_value.to_string(),
            source,
        })?;
    Ok((key, value))
}
