//! Builder for pipeline configurations
//!
//! This module provides a fluent builder API for constructing a
//! [`PipelineConfig`] with custom transformers and inflection rules.
//!
//! Copyright (c) 2025 Apishape Team
//! Licensed under the Apache-2.0 license

use super::pipeline::TransformPipeline;
use super::types::{KeyTransformer, PipelineConfig, PipelineSettings, TimeZoneSetting, ValueTransformer};
use crate::inflector::Inflector;
use std::sync::Arc;

/// Builder for creating pipeline configurations
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    /// Create a builder with every built-in transformation enabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from serializable settings
    pub fn from_settings(settings: &PipelineSettings) -> Self {
        Self {
            config: PipelineConfig::from_settings(settings),
        }
    }

    /// Enable or disable hoisting of the primary record
    pub fn change_nesting(mut self, enabled: bool) -> Self {
        self.config.change_nesting = enabled;
        self
    }

    /// Enable or disable association key renaming
    pub fn change_keys(mut self, enabled: bool) -> Self {
        self.config.change_keys = enabled;
        self
    }

    /// Enable or disable numeric string coercion
    pub fn cast_numbers(mut self, enabled: bool) -> Self {
        self.config.cast_numbers = enabled;
        self
    }

    /// Enable or disable date-to-epoch conversion
    pub fn change_time(mut self, enabled: bool) -> Self {
        self.config.change_time = enabled;
        self
    }

    /// Set the zone used for dates without an explicit offset
    pub fn time_zone(mut self, zone: TimeZoneSetting) -> Self {
        self.config.time_zone = zone;
        self
    }

    /// Replace the inflector used for association key names
    pub fn inflector(mut self, inflector: impl Inflector + 'static) -> Self {
        self.config.inflector = Arc::new(inflector);
        self
    }

    /// Append a custom key transformer, run after the built-ins
    pub fn key_transformer(mut self, transformer: impl KeyTransformer + 'static) -> Self {
        self.config.key_transformers.push(Arc::new(transformer));
        self
    }

    /// Append a custom value transformer, run after the built-ins
    pub fn value_transformer(mut self, transformer: impl ValueTransformer + 'static) -> Self {
        self.config.value_transformers.push(Arc::new(transformer));
        self
    }

    /// Build the configuration
    pub fn build(self) -> PipelineConfig {
        self.config
    }

    /// Build the configuration and resolve it into a pipeline
    pub fn build_pipeline(self) -> TransformPipeline {
        TransformPipeline::from_config(&self.config)
    }
}
