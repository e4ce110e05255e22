//! Transformation pipeline implementation
//!
//! This module contains the pipeline that normalizes input cardinality,
//! flattens each result record and runs the key and value transformers over
//! the whole tree in a single depth-first traversal.
//!
//! Copyright (c) 2025 Apishape Team
//! Licensed under the Apache-2.0 license

use super::built_in::{AssociationKeyRename, DateToEpoch, NumericCoercion};
use super::flatten::flatten;
use super::types::{KeyTransformer, PipelineConfig, ValueTransformer};
use crate::error::{Error, Result};
use crate::value::{Record, Value};
use std::sync::Arc;
use tracing::{debug, field, trace};

/// The resolved set of transformations for one configuration
///
/// Built-in transformers enabled by the configuration come first, followed
/// by the custom transformers in the order they were supplied.
#[derive(Clone)]
pub struct TransformPipeline {
    change_nesting: bool,
    key_transformers: Vec<Arc<dyn KeyTransformer>>,
    value_transformers: Vec<Arc<dyn ValueTransformer>>,
}

impl TransformPipeline {
    /// Resolve the active transformers from a configuration
    pub fn from_config(config: &PipelineConfig) -> Self {
        let mut key_transformers: Vec<Arc<dyn KeyTransformer>> = Vec::new();
        if config.change_keys {
            key_transformers.push(Arc::new(AssociationKeyRename::new(config.inflector.clone())));
        }
        key_transformers.extend(config.key_transformers.iter().cloned());

        let mut value_transformers: Vec<Arc<dyn ValueTransformer>> = Vec::new();
        if config.cast_numbers {
            value_transformers.push(Arc::new(NumericCoercion));
        }
        if config.change_time {
            value_transformers.push(Arc::new(DateToEpoch::new(config.time_zone)));
        }
        value_transformers.extend(config.value_transformers.iter().cloned());

        let pipeline = Self {
            change_nesting: config.change_nesting,
            key_transformers,
            value_transformers,
        };

        debug!(
            change_nesting = pipeline.change_nesting,
            key_transformers = ?pipeline.key_transformer_names(),
            value_transformers = ?pipeline.value_transformer_names(),
            "Resolved transformation pipeline"
        );

        pipeline
    }

    /// Names of the active key transformers, in application order
    pub fn key_transformer_names(&self) -> Vec<&str> {
        self.key_transformers.iter().map(|t| t.name()).collect()
    }

    /// Names of the active value transformers, in application order
    pub fn value_transformer_names(&self) -> Vec<&str> {
        self.value_transformers.iter().map(|t| t.name()).collect()
    }

    /// Transform a single result record or a sequence of them
    ///
    /// A record containing `primary_alias` is one logical record and yields
    /// one record; a sequence yields a sequence of the same length. Empty
    /// input is returned unchanged.
    pub fn transform(&self, input: Value, primary_alias: &str) -> Result<Value> {
        let span = tracing::debug_span!(
            "transform",
            alias = primary_alias,
            records = field::Empty,
        );
        let _enter = span.enter();

        if input.is_empty_container() {
            debug!("Empty input, nothing to transform");
            return Ok(input);
        }

        match input {
            Value::Record(record) if record.contains_key(primary_alias) => {
                span.record("records", 1);
                self.transform_record(record, primary_alias)
            }
            Value::Record(_) => Err(Error::invalid_input(format!(
                "record does not contain the primary alias '{}'",
                primary_alias
            ))),
            Value::Sequence(items) => {
                span.record("records", items.len());
                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| match item {
                        Value::Record(record) if record.contains_key(primary_alias) => {
                            trace!(index, "Transforming record");
                            self.transform_record(record, primary_alias)
                        }
                        Value::Record(_) => Err(Error::invalid_input(format!(
                            "record at index {} does not contain the primary alias '{}'",
                            index, primary_alias
                        ))),
                        other => Err(Error::invalid_input(format!(
                            "element at index {} is a {}, expected a record",
                            index,
                            other.kind()
                        ))),
                    })
                    .collect::<Result<Vec<_>>>()
                    .map(Value::Sequence)
            }
            other => Err(Error::invalid_input(format!(
                "expected a record or a sequence of records, got a {}",
                other.kind()
            ))),
        }
    }

    /// Flatten (if enabled) and traverse one result record
    pub fn transform_record(&self, record: Record, primary_alias: &str) -> Result<Value> {
        let record = if self.change_nesting {
            flatten(record, primary_alias)?
        } else {
            record
        };

        Ok(self.recurse(Value::Record(record)))
    }

    /// Run the active transformers over a value tree
    pub fn recurse(&self, value: Value) -> Value {
        recurse(value, &self.key_transformers, &self.value_transformers)
    }
}

impl std::fmt::Debug for TransformPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformPipeline")
            .field("change_nesting", &self.change_nesting)
            .field("key_transformers", &self.key_transformer_names())
            .field("value_transformers", &self.value_transformer_names())
            .finish()
    }
}

/// Apply key transformers to every container and value transformers to
/// every leaf
///
/// A container's keys are rewritten before its members are visited.
pub fn recurse(
    value: Value,
    key_transformers: &[Arc<dyn KeyTransformer>],
    value_transformers: &[Arc<dyn ValueTransformer>],
) -> Value {
    match value {
        Value::Scalar(scalar) => Value::Scalar(
            value_transformers
                .iter()
                .fold(scalar, |acc, transformer| transformer.transform_value(acc)),
        ),
        container => {
            let container = key_transformers
                .iter()
                .fold(container, |acc, transformer| transformer.transform_keys(acc));

            match container {
                Value::Record(mut record) => {
                    for member in record.values_mut() {
                        let taken = std::mem::take(member);
                        *member = recurse(taken, key_transformers, value_transformers);
                    }
                    Value::Record(record)
                }
                Value::Sequence(items) => Value::Sequence(
                    items
                        .into_iter()
                        .map(|item| recurse(item, key_transformers, value_transformers))
                        .collect(),
                ),
                // a custom key transformer collapsed the container into a leaf
                leaf => recurse(leaf, &[], value_transformers),
            }
        }
    }
}

/// Transform `input` with a one-off pipeline built from `config`
pub fn transform(input: Value, primary_alias: &str, config: &PipelineConfig) -> Result<Value> {
    TransformPipeline::from_config(config).transform(input, primary_alias)
}
