//! Apishape Core - reshape ORM-style nested results into API-friendly data
//!
//! This crate provides the transformation pipeline that converts a nested
//! result tree (a primary record plus associated records keyed by model
//! name) into a flattened structure ready for serialization.
//!
//! # Main Components
//!
//! - **Value Model**: an insertion-ordered tagged tree of scalars, records and sequences
//! - **Inflector**: injectable pluralization/singularization/tableization
//! - **Transformers**: key transformers for containers, value transformers for leaves
//! - **Pipeline**: cardinality handling, nesting flattening and recursive traversal
//!
//! # Example
//!
//! ```
//! use apishape_core::{transform, PipelineConfig, Result, Value};
//! use serde_json::json;
//!
//! fn example() -> Result<()> {
//!     let input = Value::from(json!({
//!         "User": {"id": "7", "name": "Ada"},
//!         "Profile": {"bio": "Engineer"}
//!     }));
//!     let output = transform(input, "User", &PipelineConfig::default())?;
//!     assert_eq!(output.get("profile").and_then(|p| p.get("bio")).and_then(Value::as_str), Some("Engineer"));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod error;
pub mod inflector;
pub mod transformer;
pub mod value;

#[cfg(test)]
mod proptest_strategies;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use crate::inflector::{EnglishInflector, Inflector};
pub use transformer::{
    flatten, recurse, transform, KeyTransformer, PipelineConfig, PipelineConfigBuilder,
    PipelineSettings, TimeZoneSetting, TransformPipeline, ValueTransformer,
};
pub use value::{AssociationShape, Record, Scalar, Value};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
