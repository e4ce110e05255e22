//! Property-based testing strategies for generating test data
//!
//! This module provides proptest strategies for generating random
//! but realistic result trees for property testing.

#![cfg(test)]

use crate::value::{Record, Scalar, Value};
use proptest::collection::vec;
use proptest::prelude::*;

/// Strategy for numeric strings as they come out of a database driver
pub fn numeric_string_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[+-]?[0-9]{1,9}",
        "[0-9]{1,6}\\.[0-9]{1,4}",
        "[0-9]{1,3}[eE][+-]?[0-9]{1,2}",
        "0[0-9]{1,4}",
    ]
}

/// Strategy for `YYYY-MM-DD` and `YYYY-MM-DD HH:MM:SS` strings
pub fn date_string_strategy() -> impl Strategy<Value = String> {
    (
        1971i32..2037,
        1u32..=12,
        1u32..=28,
        proptest::option::of((0u32..24, 0u32..60, 0u32..60)),
    )
        .prop_map(|(year, month, day, time)| match time {
            Some((hour, minute, second)) => format!(
                "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                year, month, day, hour, minute, second
            ),
            None => format!("{:04}-{:02}-{:02}", year, month, day),
        })
}

/// Strategy for leaf values
pub fn scalar_strategy() -> impl Strategy<Value = Scalar> {
    prop_oneof![
        Just(Scalar::Null),
        any::<bool>().prop_map(Scalar::Bool),
        any::<i64>().prop_map(Scalar::Int),
        (-1.0e9f64..1.0e9).prop_map(Scalar::Float),
        "[a-z0-9 .:-]{0,16}".prop_map(Scalar::String),
        numeric_string_strategy().prop_map(Scalar::String),
        date_string_strategy().prop_map(Scalar::String),
    ]
}

/// Strategy for association-style keys (`Comment`, `BlogPost`)
pub fn association_key_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{2,7}([A-Z][a-z]{2,7})?"
}

/// Strategy for field-style keys (`id`, `created_at`)
pub fn field_key_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,8}(_[a-z]{1,6})?"
}

/// Strategy for arbitrary nested trees
pub fn value_strategy() -> impl Strategy<Value = Value> {
    scalar_strategy()
        .prop_map(Value::Scalar)
        .prop_recursive(4, 48, 4, |inner| {
            prop_oneof![
                vec(inner.clone(), 0..4).prop_map(Value::Sequence),
                vec(
                    (prop_oneof![association_key_strategy(), field_key_strategy()], inner),
                    0..4
                )
                .prop_map(|entries| Value::Record(entries.into_iter().collect::<Record>())),
            ]
        })
}

/// Strategy for a record holding only scalar fields
pub fn flat_record_strategy() -> impl Strategy<Value = Record> {
    vec((field_key_strategy(), scalar_strategy().prop_map(Value::Scalar)), 0..6)
        .prop_map(|entries| entries.into_iter().collect())
}

/// Strategy for an ORM-style result record keyed by `alias`
pub fn result_record_strategy(alias: &'static str) -> impl Strategy<Value = Record> {
    (
        flat_record_strategy(),
        vec((association_key_strategy(), value_strategy()), 0..3),
    )
        .prop_map(move |(primary, associations)| {
            let mut record = Record::new();
            record.insert(alias.to_string(), Value::Record(primary));
            for (key, value) in associations {
                if key != alias {
                    record.insert(key, value);
                }
            }
            record
        })
}
