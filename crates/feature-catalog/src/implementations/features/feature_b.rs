//! Feature B: writes its configuration a configurable number of times.

use crate::{check_config, write_config_line, Feature, FeatureError};
use feature_types::{
	ConfigSchema, FeatureConfig, Field, FieldType, ImplementationRegistry, Schema, ValidationError,
};
use serde::Deserialize;
use serde_json::Value;
use std::io;

/// Typed view of the fields feature B reads.
#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Settings {
	#[serde(default = "default_repeat")]
	repeat: u32,
}

fn default_repeat() -> u32 {
	1
}

/// Feature whose output repeats the configuration line.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureB {
	config: FeatureConfig,
	settings: Settings,
}

impl FeatureB {
	/// Creates a new FeatureB from a checked configuration.
	pub fn new(config: FeatureConfig) -> Result<Self, FeatureError> {
		check_config(Registry::NAME, &FeatureBSchema, &config)?;

		let settings: Settings = serde_json::from_value(Value::Object(config.clone()))
			.map_err(|e| FeatureError::Deserialization(e.to_string()))?;

		Ok(Self { config, settings })
	}

	/// Number of times [`Feature::print`] writes the configuration line.
	pub fn repeat(&self) -> u32 {
		self.settings.repeat
	}
}

/// Configuration schema for FeatureB.
pub struct FeatureBSchema;

impl ConfigSchema for FeatureBSchema {
	fn validate(&self, config: &Value) -> Result<(), ValidationError> {
		let schema = Schema::new(
			// Required fields
			vec![Field::new(feature_types::FEATURE_TYPE_KEY, FieldType::String)],
			// Optional fields
			vec![Field::new(
				"repeat",
				FieldType::Integer {
					min: Some(1),
					max: Some(i64::from(u32::MAX)),
				},
			)],
		);

		schema.validate(config)
	}
}

impl Feature for FeatureB {
	fn feature_type(&self) -> &'static str {
		Registry::NAME
	}

	fn config(&self) -> &FeatureConfig {
		&self.config
	}

	fn print(&self, out: &mut dyn io::Write) -> io::Result<()> {
		writeln!(out, "{}", Registry::NAME)?;
		for _ in 0..self.settings.repeat {
			write_config_line(out, &self.config)?;
		}
		Ok(())
	}
}

/// Factory function to create feature B from configuration.
///
/// Configuration parameters:
/// - `feature_type`: must be `"B"`
/// - `repeat`: times the configuration is written, at least 1 (default: 1)
/// - any other field, of any type, is kept as-is
pub fn create_feature(config: FeatureConfig) -> Result<Box<dyn Feature>, FeatureError> {
	Ok(Box::new(FeatureB::new(config)?))
}

/// Registry for feature B.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "B";
	type Factory = crate::FeatureFactory;

	fn factory() -> Self::Factory {
		create_feature
	}
}

impl crate::FeatureRegistry for Registry {}

#[cfg(test)]
mod tests {
	use super::*;
	use feature_types::config_from_pairs;
	use serde_json::json;

	#[test]
	fn test_default_repeat() {
		let config = config_from_pairs([
			("feature_type", json!("B")),
			("some_other_config", json!("hello world B")),
		]);

		let feature = FeatureB::new(config.clone()).unwrap();
		assert_eq!(feature.repeat(), 1);
		assert_eq!(feature.config(), &config);
	}

	#[test]
	fn test_print_repeats_config() {
		let config = config_from_pairs([("feature_type", json!("B")), ("repeat", json!(3))]);
		let feature = FeatureB::new(config).unwrap();

		let mut out = Vec::new();
		feature.print(&mut out).unwrap();
		let text = String::from_utf8(out).unwrap();
		let lines: Vec<&str> = text.lines().collect();

		assert_eq!(lines.len(), 4);
		assert_eq!(lines[0], "B");
		assert!(lines[1..].iter().all(|line| *line == lines[1]));
	}

	#[test]
	fn test_accepts_non_string_extra_values() {
		let config = config_from_pairs([
			("feature_type", json!("B")),
			("some_other_config", json!(42)),
			("repeat", json!(2)),
		]);

		let feature = FeatureB::new(config.clone()).unwrap();
		assert_eq!(feature.repeat(), 2);
		assert_eq!(feature.config(), &config);
	}

	#[test]
	fn test_zero_repeat_rejected() {
		let config = config_from_pairs([("feature_type", json!("B")), ("repeat", json!(0))]);

		assert!(matches!(
			FeatureB::new(config),
			Err(FeatureError::InvalidConfig(ValidationError::InvalidValue { ref field, .. }))
				if field == "repeat"
		));
	}

	#[test]
	fn test_missing_tag_rejected() {
		let config = config_from_pairs([("repeat", json!(2))]);

		assert!(matches!(
			FeatureB::new(config),
			Err(FeatureError::InvalidConfig(ValidationError::MissingField(ref f)))
				if f == "feature_type"
		));
	}
}
