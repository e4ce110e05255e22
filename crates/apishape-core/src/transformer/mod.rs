//! Transformation system for reshaping nested result trees
//!
//! This module turns ORM-shaped results (a primary record plus associations
//! keyed by model name) into API-friendly data: the primary record's fields
//! are hoisted to the top level, association keys get conventional
//! singular/plural names, and numeric and date strings become numbers.
//!
//! # Module Organization
//!
//! - [`types`] - Transformer traits, time zone setting and configuration
//! - [`pipeline`] - Cardinality handling and recursive traversal
//! - [`flatten`] - Hoisting of the primary record
//! - [`builder`] - Fluent builder API for pipeline configurations
//! - [`built_in`] - Built-in and closure-backed transformers
//!
//! # Examples
//!
//! ```
//! use apishape_core::{transform, PipelineConfigBuilder, TimeZoneSetting, Value};
//! use serde_json::json;
//!
//! let config = PipelineConfigBuilder::new()
//!     .time_zone(TimeZoneSetting::Utc)
//!     .build();
//!
//! let input = Value::from(json!({
//!     "Post": {"id": "1", "created": "2021-01-01", "title": "Hi"},
//!     "Comment": [{"id": "2", "body": "x"}]
//! }));
//!
//! let output = transform(input, "Post", &config).unwrap();
//! assert_eq!(
//!     serde_json::Value::from(output),
//!     json!({
//!         "id": 1,
//!         "created": 1609459200,
//!         "title": "Hi",
//!         "comments": [{"id": 2, "body": "x"}]
//!     })
//! );
//! ```
//!
//! ## Custom transformers
//!
//! ```
//! use apishape_core::{PipelineConfigBuilder, Scalar};
//! use apishape_core::transformer::built_in;
//!
//! // Runs after numeric coercion and date conversion
//! let config = PipelineConfigBuilder::new()
//!     .value_transformer(built_in::value_fn("null_to_empty", |value| match value {
//!         Scalar::Null => Scalar::String(String::new()),
//!         other => other,
//!     }))
//!     .build();
//! assert_eq!(config.value_transformers.len(), 1);
//! ```
//!
//! Copyright (c) 2025 Apishape Team
//! Licensed under the Apache-2.0 license

// Core traits and configuration
pub mod types;

// Main transformation pipeline
pub mod pipeline;

// Primary record hoisting
pub mod flatten;

// Configuration builder API
pub mod builder;

// Built-in transformers
pub mod built_in;


pub use types::{
    KeyTransformer, PipelineConfig, PipelineSettings, TimeZoneSetting, ValueTransformer,
};

pub use builder::PipelineConfigBuilder;
pub use flatten::flatten;
pub use pipeline::{recurse, transform, TransformPipeline};
