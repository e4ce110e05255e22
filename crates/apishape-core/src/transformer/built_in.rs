//! Built-in transformers
//!
//! This module provides the transformers the pipeline enables from its
//! configuration switches: association key renaming, numeric string
//! coercion and date-to-epoch conversion, plus adapters that turn closures
//! into custom transformers.
//!
//! Copyright (c) 2025 Apishape Team
//! Licensed under the Apache-2.0 license

use super::types::{KeyTransformer, TimeZoneSetting, ValueTransformer};
use crate::inflector::Inflector;
use crate::value::{AssociationShape, Record, Scalar, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::{Arc, OnceLock};

static NUMERIC_REGEX: OnceLock<Regex> = OnceLock::new();
static DATE_PREFIX_REGEX: OnceLock<Regex> = OnceLock::new();

fn numeric_regex() -> &'static Regex {
    NUMERIC_REGEX.get_or_init(|| {
        Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
            .expect("numeric pattern is valid")
    })
}

fn date_prefix_regex() -> &'static Regex {
    DATE_PREFIX_REGEX.get_or_init(|| {
        Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("date prefix pattern is valid")
    })
}

/// Date-time layouts carrying their own UTC offset
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M:%S%.f%#z",
];

/// Trailing zone names meaning UTC
const UTC_SUFFIXES: &[&str] = &[" UTC", " GMT", "UTC", "GMT", "Z"];

/// Date-time layouts interpreted in the configured zone
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Rename association keys of a record
///
/// Keys holding a record become the singular table name of the key
/// (`Author` -> `author`), keys holding a sequence the plural table name
/// (`Comment` -> `comments`). Scalar-valued keys are left alone. A record
/// without container values is returned as is.
pub fn rename_keys(record: Record, inflector: &dyn Inflector) -> Record {
    if !record.values().any(Value::is_container) {
        return record;
    }

    let mut renamed = Record::with_capacity(record.len());
    for (key, value) in record {
        let key = match value.shape() {
            Some(AssociationShape::Single) => inflector.singularize(&inflector.tableize(&key)),
            Some(AssociationShape::Multiple) => inflector.tableize(&key),
            None => key,
        };
        // A colliding renamed key keeps the first position and the last value
        renamed.insert(key, value);
    }
    renamed
}

/// Convert a numeric string into a number
///
/// Integral numerals become integers (floats when they overflow `i64`);
/// numerals with a decimal point or exponent become floats. Everything else
/// is returned unchanged.
pub fn cast_number(value: Scalar) -> Scalar {
    let text = match value {
        Scalar::String(s) if numeric_regex().is_match(&s) => s,
        other => return other,
    };

    let is_integral = !text.contains(['.', 'e', 'E']);
    if is_integral {
        if let Ok(n) = text.parse::<i64>() {
            return Scalar::Int(n);
        }
    }

    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => Scalar::Float(n),
        _ => Scalar::String(text),
    }
}

/// Convert a `YYYY-MM-DD`-prefixed string into a Unix timestamp
///
/// Strings without the prefix, non-strings, and prefixed strings that do
/// not parse as a date or date-time are returned unchanged.
pub fn date_to_epoch(value: Scalar, zone: TimeZoneSetting) -> Scalar {
    let text = match value {
        Scalar::String(s) if date_prefix_regex().is_match(&s) => s,
        other => return other,
    };

    match parse_epoch(&text, zone) {
        Some(timestamp) => Scalar::Int(timestamp),
        None => {
            log::debug!("Leaving unparsable date string unchanged: {}", text);
            Scalar::String(text)
        }
    }
}

fn parse_epoch(text: &str, zone: TimeZoneSetting) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp());
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, format) {
            return Some(dt.timestamp());
        }
    }

    if let Some(local) = UTC_SUFFIXES
        .iter()
        .find_map(|suffix| text.strip_suffix(suffix))
    {
        return parse_naive(local.trim_end(), TimeZoneSetting::Utc);
    }

    parse_naive(text, zone)
}

fn parse_naive(text: &str, zone: TimeZoneSetting) -> Option<i64> {
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return zone.timestamp(&naive);
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(|naive| zone.timestamp(&naive))
}

/// Key transformer renaming association keys after their shape
#[derive(Debug, Clone)]
pub struct AssociationKeyRename {
    inflector: Arc<dyn Inflector>,
}

impl AssociationKeyRename {
    pub fn new(inflector: Arc<dyn Inflector>) -> Self {
        Self { inflector }
    }
}

impl KeyTransformer for AssociationKeyRename {
    fn name(&self) -> &str {
        "association_key_rename"
    }

    fn transform_keys(&self, container: Value) -> Value {
        match container {
            Value::Record(record) => Value::Record(rename_keys(record, self.inflector.as_ref())),
            other => other,
        }
    }
}

/// Value transformer converting numeric strings to numbers
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericCoercion;

impl ValueTransformer for NumericCoercion {
    fn name(&self) -> &str {
        "numeric_coercion"
    }

    fn transform_value(&self, value: Scalar) -> Scalar {
        cast_number(value)
    }
}

/// Value transformer converting date strings to Unix timestamps
#[derive(Debug, Clone, Copy, Default)]
pub struct DateToEpoch {
    zone: TimeZoneSetting,
}

impl DateToEpoch {
    pub fn new(zone: TimeZoneSetting) -> Self {
        Self { zone }
    }
}

impl ValueTransformer for DateToEpoch {
    fn name(&self) -> &str {
        "date_to_epoch"
    }

    fn transform_value(&self, value: Scalar) -> Scalar {
        date_to_epoch(value, self.zone)
    }
}

/// Custom key transformer wrapping a closure
pub struct FnKeyTransformer<F> {
    name: String,
    transform: F,
}

impl<F> KeyTransformer for FnKeyTransformer<F>
where
    F: Fn(Value) -> Value + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn transform_keys(&self, container: Value) -> Value {
        (self.transform)(container)
    }
}

/// Custom value transformer wrapping a closure
pub struct FnValueTransformer<F> {
    name: String,
    transform: F,
}

impl<F> ValueTransformer for FnValueTransformer<F>
where
    F: Fn(Scalar) -> Scalar + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn transform_value(&self, value: Scalar) -> Scalar {
        (self.transform)(value)
    }
}

/// Create a custom key transformer from a closure
pub fn key_fn<F>(name: impl Into<String>, transform: F) -> FnKeyTransformer<F>
where
    F: Fn(Value) -> Value + Send + Sync,
{
    FnKeyTransformer {
        name: name.into(),
        transform,
    }
}

/// Create a custom value transformer from a closure
pub fn value_fn<F>(name: impl Into<String>, transform: F) -> FnValueTransformer<F>
where
    F: Fn(Scalar) -> Scalar + Send + Sync,
{
    FnValueTransformer {
        name: name.into(),
        transform,
    }
}
