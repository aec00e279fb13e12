//! Feature catalog for the feature factory system.
//!
//! This module defines the two capability families the factory can build and
//! every concrete implementation of them:
//! - [`Feature`]: built from a full configuration mapping, which the instance
//!   keeps for its lifetime
//! - [`TaggedFeature`]: built from a bare type tag, which is its only state
//!
//! Each implementation module declares its type tag and factory with a
//! `Registry` struct; [`get_all_feature_implementations`] and
//! [`get_all_tagged_implementations`] collect them for registration.

use feature_types::{ConfigSchema, FeatureConfig, ImplementationRegistry, ValidationError};
use std::fmt;
use std::io;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod features {
		pub mod feature_a;
		pub mod feature_b;
	}
	pub mod tagged {
		pub mod variant_a;
		pub mod variant_b;
	}
}

/// Errors that can occur while constructing a feature.
#[derive(Debug, Error)]
pub enum FeatureError {
	/// The configuration does not satisfy the implementation's schema.
	#[error("Invalid configuration: {0}")]
	InvalidConfig(#[from] ValidationError),
	/// The configuration names a different implementation than the one
	/// being constructed.
	#[error("Configuration is tagged '{actual}' but was given to '{expected}'")]
	TagMismatch {
		expected: &'static str,
		actual: String,
	},
	/// Error that occurs when deserializing typed settings from a configuration.
	#[error("Deserialization error: {0}")]
	Deserialization(String),
}

/// Trait defining the interface for configuration-driven features.
///
/// An instance owns the configuration it was constructed with. The type tag
/// stored in that configuration always names the implementation that built it.
pub trait Feature: Send + Sync + fmt::Debug {
	/// Returns the type tag this feature was created under.
	fn feature_type(&self) -> &'static str;

	/// Returns the configuration this feature was constructed with.
	fn config(&self) -> &FeatureConfig;

	/// Writes the feature's name followed by its configuration.
	fn print(&self, out: &mut dyn io::Write) -> io::Result<()>;
}

/// Trait defining the interface for features built from a bare type tag.
pub trait TaggedFeature: Send + Sync + fmt::Debug {
	/// Returns the tag stamped onto this instance at creation.
	fn subclass_type(&self) -> &str;

	/// Writes the feature's name followed by its tag.
	fn print(&self, out: &mut dyn io::Write) -> io::Result<()>;
}

/// Type alias for feature factory functions.
///
/// The configuration is moved into the constructed feature.
pub type FeatureFactory = fn(FeatureConfig) -> Result<Box<dyn Feature>, FeatureError>;

/// Type alias for bare-tag factory functions.
pub type TaggedFactory = fn(&str) -> Box<dyn TaggedFeature>;

/// Registry trait for configuration-driven features.
pub trait FeatureRegistry: ImplementationRegistry<Factory = FeatureFactory> {}

/// Registry trait for bare-tag features.
pub trait TaggedRegistry: ImplementationRegistry<Factory = TaggedFactory> {}

/// Get all configuration-driven feature implementations.
///
/// Returns a vector of (type tag, factory) tuples. The order carries no
/// meaning; each entry is independent of the others.
pub fn get_all_feature_implementations() -> Vec<(&'static str, FeatureFactory)> {
	use implementations::features::{feature_a, feature_b};

	vec![
		(feature_a::Registry::NAME, feature_a::Registry::factory()),
		(feature_b::Registry::NAME, feature_b::Registry::factory()),
	]
}

/// Get all bare-tag feature implementations.
pub fn get_all_tagged_implementations() -> Vec<(&'static str, TaggedFactory)> {
	use implementations::tagged::{variant_a, variant_b};

	vec![
		(variant_a::Registry::NAME, variant_a::Registry::factory()),
		(variant_b::Registry::NAME, variant_b::Registry::factory()),
	]
}

/// Validates `config` against `schema` and checks its type tag is `expected`.
///
/// Shared by every configuration-driven constructor.
pub(crate) fn check_config(
	expected: &'static str,
	schema: &dyn ConfigSchema,
	config: &FeatureConfig,
) -> Result<(), FeatureError> {
	schema.validate(&serde_json::Value::Object(config.clone()))?;

	let actual = config
		.get(feature_types::FEATURE_TYPE_KEY)
		.and_then(|v| v.as_str())
		.unwrap_or_default();
	if actual != expected {
		return Err(FeatureError::TagMismatch {
			expected,
			actual: actual.to_string(),
		});
	}

	Ok(())
}

/// Writes `config` as a single line of JSON.
pub(crate) fn write_config_line(
	out: &mut dyn io::Write,
	config: &FeatureConfig,
) -> io::Result<()> {
	let line = serde_json::to_string(config).map_err(io::Error::other)?;
	writeln!(out, "{}", line)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashSet;

	#[test]
	fn test_feature_tags_are_unique() {
		let implementations = get_all_feature_implementations();
		let tags: HashSet<_> = implementations.iter().map(|(name, _)| *name).collect();

		assert_eq!(tags.len(), implementations.len());
		assert!(tags.contains("A"));
		assert!(tags.contains("B"));
	}

	#[test]
	fn test_tagged_tags_are_unique() {
		let implementations = get_all_tagged_implementations();
		let tags: HashSet<_> = implementations.iter().map(|(name, _)| *name).collect();

		assert_eq!(tags.len(), implementations.len());
		assert!(tags.contains("A"));
		assert!(tags.contains("B"));
	}

	#[test]
	fn test_every_factory_builds_its_own_tag() {
		for (name, factory) in get_all_feature_implementations() {
			let config =
				feature_types::config_from_pairs([(feature_types::FEATURE_TYPE_KEY, name)]);
			let feature = factory(config).unwrap();
			assert_eq!(feature.feature_type(), name);
		}

		for (name, factory) in get_all_tagged_implementations() {
			assert_eq!(factory(name).subclass_type(), name);
		}
	}

	#[test]
	fn test_every_factory_keeps_arbitrary_extras() {
		for (name, factory) in get_all_feature_implementations() {
			let config = feature_types::config_from_pairs([
				(feature_types::FEATURE_TYPE_KEY, serde_json::json!(name)),
				("some_other_config", serde_json::json!(42)),
				("nested", serde_json::json!({ "k": [1, "two", null] })),
			]);

			let feature = factory(config.clone()).unwrap();
			assert_eq!(feature.config(), &config);
		}
	}
}
