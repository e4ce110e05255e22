//! Nesting flattener
//!
//! Hoists the primary entity's fields to the top level of a result record
//! and keeps its associations as sibling keys.
//!
//! Copyright (c) 2025 Apishape Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::value::{Record, Value};

/// Flatten a result record around its primary alias
///
/// The primary sub-record's keys come first in their original order,
/// followed by the remaining outer keys it does not already define. On a
/// collision the primary sub-record's field wins.
pub fn flatten(mut record: Record, primary_alias: &str) -> Result<Record> {
    let mut flattened = match record.shift_remove(primary_alias) {
        Some(Value::Record(primary)) => primary,
        Some(other) => {
            tracing::debug!(
                alias = primary_alias,
                kind = other.kind(),
                "Primary alias does not hold a record"
            );
            return Err(Error::missing_primary_key(primary_alias));
        }
        None => return Err(Error::missing_primary_key(primary_alias)),
    };

    for (key, value) in record {
        flattened.entry(key).or_insert(value);
    }

    Ok(flattened)
}
