//! Configuration input module for the feature factory.
//!
//! A feature is created from one of three configuration inputs: an already
//! built mapping, a path to a serialized mapping, or a set of loose fields
//! supplied directly by the caller. This module normalizes any of them into a
//! single [`FeatureConfig`] before the factory looks at the type tag.
//!
//! ## File formats
//!
//! Files ending in `.toml` are parsed as TOML; everything else is parsed as
//! JSON. The content is deserialized as-is, so a file and an in-memory
//! mapping with the same content produce the same configuration.

mod loader;

pub use loader::load_file;

use feature_types::FeatureConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while producing a feature configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The configuration file could not be read.
	#[error("Failed to read config file {}: {source}", .path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	/// The configuration file is not valid JSON or TOML.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// The configuration parsed, but its top level is not a mapping.
	#[error("Configuration must be a mapping, got {0}")]
	NotAMapping(&'static str),
	/// Both an explicit source and loose fields were supplied.
	#[error("Configuration source and individual fields are mutually exclusive")]
	ConflictingSources,
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the input dump
		ConfigError::Parse(err.message().to_string())
	}
}

impl From<serde_json::Error> for ConfigError {
	fn from(err: serde_json::Error) -> Self {
		ConfigError::Parse(err.to_string())
	}
}

/// An explicit configuration source.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
	/// An already built mapping.
	Mapping(FeatureConfig),
	/// Path to a JSON or TOML file holding the mapping.
	Path(PathBuf),
}

/// Configuration handed to the factory.
///
/// Exactly one source is ever in play; a mapping or path can not be combined
/// with loose fields. Use [`ConfigInput::from_parts`] when both may be present.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigInput {
	/// An already built mapping, used as-is.
	Mapping(FeatureConfig),
	/// Path to a serialized mapping.
	Path(PathBuf),
	/// Fields supplied directly by the caller, used as the mapping.
	Fields(FeatureConfig),
}

impl ConfigInput {
	/// Combines an optional explicit source with loose fields.
	///
	/// Returns the source when given, otherwise the fields.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::ConflictingSources`] when a source is given
	/// together with a non-empty field set.
	pub fn from_parts(
		source: Option<ConfigSource>,
		fields: FeatureConfig,
	) -> Result<Self, ConfigError> {
		match source {
			Some(_) if !fields.is_empty() => Err(ConfigError::ConflictingSources),
			Some(source) => Ok(source.into()),
			None => Ok(ConfigInput::Fields(fields)),
		}
	}

	/// Produces the concrete mapping for this input.
	///
	/// Paths are read and parsed; mappings and fields are returned unchanged.
	pub fn normalize(self) -> Result<FeatureConfig, ConfigError> {
		match self {
			ConfigInput::Mapping(config) | ConfigInput::Fields(config) => Ok(config),
			ConfigInput::Path(path) => load_file(&path),
		}
	}
}

impl From<ConfigSource> for ConfigInput {
	fn from(source: ConfigSource) -> Self {
		match source {
			ConfigSource::Mapping(config) => ConfigInput::Mapping(config),
			ConfigSource::Path(path) => ConfigInput::Path(path),
		}
	}
}

impl From<FeatureConfig> for ConfigInput {
	fn from(config: FeatureConfig) -> Self {
		ConfigInput::Mapping(config)
	}
}

impl From<PathBuf> for ConfigInput {
	fn from(path: PathBuf) -> Self {
		ConfigInput::Path(path)
	}
}

impl From<&Path> for ConfigInput {
	fn from(path: &Path) -> Self {
		ConfigInput::Path(path.to_path_buf())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use feature_types::config_from_pairs;
	use serde_json::json;

	#[test]
	fn test_mapping_is_used_as_is() {
		let config = config_from_pairs([("feature_type", json!("A")), ("k", json!("v"))]);

		let normalized = ConfigInput::Mapping(config.clone()).normalize().unwrap();
		assert_eq!(normalized, config);
	}

	#[test]
	fn test_fields_become_mapping() {
		let fields = config_from_pairs([("feature_type", "B"), ("some_other_config", "hi")]);

		let input = ConfigInput::from_parts(None, fields.clone()).unwrap();
		assert_eq!(input, ConfigInput::Fields(fields.clone()));
		assert_eq!(input.normalize().unwrap(), fields);
	}

	#[test]
	fn test_source_with_fields_conflicts() {
		let source = ConfigSource::Mapping(config_from_pairs([("feature_type", "A")]));
		let fields = config_from_pairs([("feature_type", "B")]);

		let result = ConfigInput::from_parts(Some(source), fields);
		assert!(matches!(result, Err(ConfigError::ConflictingSources)));
	}

	#[test]
	fn test_source_without_fields() {
		let source = ConfigSource::Path(PathBuf::from("feature.json"));

		let input = ConfigInput::from_parts(Some(source), FeatureConfig::new()).unwrap();
		assert_eq!(input, ConfigInput::Path(PathBuf::from("feature.json")));
	}

	#[test]
	fn test_missing_path_is_io_error() {
		let input = ConfigInput::from(Path::new("/nonexistent/feature.json"));

		assert!(matches!(input.normalize(), Err(ConfigError::Io { .. })));
	}
}
