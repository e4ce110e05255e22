//! Core types for the transformation system
//!
//! This module defines the transformer capabilities, the time zone setting
//! used by date coercion, and the pipeline configuration.
//!
//! Copyright (c) 2025 Apishape Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::inflector::{EnglishInflector, Inflector};
use crate::value::{Scalar, Value};
use chrono::{FixedOffset, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Rewrites the keys of a container
///
/// Called once for every record and sequence in the tree, before the
/// container's members are visited. Implementations that only understand
/// records must return sequences unchanged.
pub trait KeyTransformer: Send + Sync {
    /// Name used in diagnostics
    fn name(&self) -> &str;

    /// Transform a container value
    fn transform_keys(&self, container: Value) -> Value;
}

/// Rewrites a leaf value
pub trait ValueTransformer: Send + Sync {
    /// Name used in diagnostics
    fn name(&self) -> &str;

    /// Transform a scalar value
    fn transform_value(&self, value: Scalar) -> Scalar;
}

/// Time zone used to interpret date strings without an explicit offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimeZoneSetting {
    /// The system's local time zone
    #[default]
    Local,
    /// Coordinated Universal Time
    Utc,
    /// A fixed offset east of UTC, in seconds
    Fixed(i32),
}

impl TimeZoneSetting {
    /// Unix timestamp of a wall-clock time in this zone
    ///
    /// Returns `None` when the time does not exist in the zone (DST gap) or
    /// the offset is out of range. Ambiguous local times resolve to the
    /// earliest instant.
    pub fn timestamp(&self, naive: &NaiveDateTime) -> Option<i64> {
        match self {
            TimeZoneSetting::Local => Local
                .from_local_datetime(naive)
                .earliest()
                .map(|dt| dt.timestamp()),
            TimeZoneSetting::Utc => Some(Utc.from_utc_datetime(naive).timestamp()),
            TimeZoneSetting::Fixed(seconds) => FixedOffset::east_opt(*seconds)?
                .from_local_datetime(naive)
                .single()
                .map(|dt| dt.timestamp()),
        }
    }
}

impl fmt::Display for TimeZoneSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeZoneSetting::Local => write!(f, "local"),
            TimeZoneSetting::Utc => write!(f, "utc"),
            TimeZoneSetting::Fixed(seconds) => {
                let sign = if *seconds < 0 { '-' } else { '+' };
                let total = seconds.unsigned_abs();
                write!(f, "{}{:02}:{:02}", sign, total / 3600, (total % 3600) / 60)
            }
        }
    }
}

impl FromStr for TimeZoneSetting {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "local" => return Ok(TimeZoneSetting::Local),
            "utc" | "z" => return Ok(TimeZoneSetting::Utc),
            _ => {}
        }

        let invalid = || Error::configuration(format!(
            "invalid time zone '{}': expected 'local', 'utc' or an offset like '+02:00'",
            s
        ));

        let (sign, rest) = match trimmed.chars().next() {
            Some('+') => (1, &trimmed[1..]),
            Some('-') => (-1, &trimmed[1..]),
            _ => return Err(invalid()),
        };
        let digits: String = rest.chars().filter(|c| *c != ':').collect();
        if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let hours: i32 = digits[..2].parse().map_err(|_| invalid())?;
        let minutes: i32 = digits[2..].parse().map_err(|_| invalid())?;
        if hours > 23 || minutes > 59 {
            return Err(invalid());
        }

        Ok(TimeZoneSetting::Fixed(sign * (hours * 3600 + minutes * 60)))
    }
}

impl TryFrom<String> for TimeZoneSetting {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TimeZoneSetting> for String {
    fn from(zone: TimeZoneSetting) -> Self {
        zone.to_string()
    }
}

/// Serializable switches for the built-in transformations
///
/// This is the part of [`PipelineConfig`] a host can load from a
/// configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Hoist the primary record's fields to the top level
    pub change_nesting: bool,
    /// Rename association keys to singular/plural table-style names
    pub change_keys: bool,
    /// Convert numeric strings to numbers
    pub cast_numbers: bool,
    /// Convert date strings to Unix timestamps
    pub change_time: bool,
    /// Zone for date strings without an explicit offset
    pub time_zone: TimeZoneSetting,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            change_nesting: true,
            change_keys: true,
            cast_numbers: true,
            change_time: true,
            time_zone: TimeZoneSetting::Local,
        }
    }
}

/// Complete configuration for one pipeline invocation
///
/// Custom transformers run after the built-ins, in the order given.
#[derive(Clone)]
pub struct PipelineConfig {
    pub change_nesting: bool,
    pub change_keys: bool,
    pub cast_numbers: bool,
    pub change_time: bool,
    pub time_zone: TimeZoneSetting,
    /// Inflector used by the association key rename
    pub inflector: Arc<dyn Inflector>,
    pub key_transformers: Vec<Arc<dyn KeyTransformer>>,
    pub value_transformers: Vec<Arc<dyn ValueTransformer>>,
}

impl PipelineConfig {
    /// Build a configuration from serializable settings, with the default
    /// inflector and no custom transformers
    pub fn from_settings(settings: &PipelineSettings) -> Self {
        Self {
            change_nesting: settings.change_nesting,
            change_keys: settings.change_keys,
            cast_numbers: settings.cast_numbers,
            change_time: settings.change_time,
            time_zone: settings.time_zone,
            inflector: Arc::new(EnglishInflector),
            key_transformers: Vec::new(),
            value_transformers: Vec::new(),
        }
    }

    /// The serializable switches of this configuration
    pub fn settings(&self) -> PipelineSettings {
        PipelineSettings {
            change_nesting: self.change_nesting,
            change_keys: self.change_keys,
            cast_numbers: self.cast_numbers,
            change_time: self.change_time,
            time_zone: self.time_zone,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from_settings(&PipelineSettings::default())
    }
}

impl fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key_names: Vec<&str> = self.key_transformers.iter().map(|t| t.name()).collect();
        let value_names: Vec<&str> = self.value_transformers.iter().map(|t| t.name()).collect();
        f.debug_struct("PipelineConfig")
            .field("change_nesting", &self.change_nesting)
            .field("change_keys", &self.change_keys)
            .field("cast_numbers", &self.cast_numbers)
            .field("change_time", &self.change_time)
            .field("time_zone", &self.time_zone)
            .field("inflector", &self.inflector)
            .field("key_transformers", &key_names)
            .field("value_transformers", &value_names)
            .finish()
    }
}
