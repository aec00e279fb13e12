//! Feature A: writes its configuration as-is.

use crate::{check_config, write_config_line, Feature, FeatureError};
use feature_types::{
	ConfigSchema, FeatureConfig, Field, FieldType, ImplementationRegistry, Schema, ValidationError,
};
use serde_json::Value;
use std::io;

/// Feature that keeps its configuration and writes it verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureA {
	config: FeatureConfig,
}

impl FeatureA {
	/// Creates a new FeatureA from a checked configuration.
	pub fn new(config: FeatureConfig) -> Result<Self, FeatureError> {
		check_config(Registry::NAME, &FeatureASchema, &config)?;
		Ok(Self { config })
	}
}

/// Configuration schema for FeatureA.
pub struct FeatureASchema;

impl ConfigSchema for FeatureASchema {
	fn validate(&self, config: &Value) -> Result<(), ValidationError> {
		let schema = Schema::new(
			// Required fields
			vec![Field::new(feature_types::FEATURE_TYPE_KEY, FieldType::String)],
			// Every other field is stored unchecked
			vec![],
		);

		schema.validate(config)
	}
}

impl Feature for FeatureA {
	fn feature_type(&self) -> &'static str {
		Registry::NAME
	}

	fn config(&self) -> &FeatureConfig {
		&self.config
	}

	fn print(&self, out: &mut dyn io::Write) -> io::Result<()> {
		writeln!(out, "{}", Registry::NAME)?;
		write_config_line(out, &self.config)
	}
}

/// Factory function to create feature A from configuration.
///
/// Configuration parameters:
/// - `feature_type`: must be `"A"`
/// - any other field, of any type, is kept as-is
pub fn create_feature(config: FeatureConfig) -> Result<Box<dyn Feature>, FeatureError> {
	Ok(Box::new(FeatureA::new(config)?))
}

/// Registry for feature A.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "A";
	type Factory = crate::FeatureFactory;

	fn factory() -> Self::Factory {
		create_feature
	}
}

impl crate::FeatureRegistry for Registry {}
