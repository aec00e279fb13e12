//! Creation entry point for the feature factory system.
//!
//! [`Factory::create`] turns a configuration input into a feature:
//! 1. Normalizes the input (mapping, file path or loose fields) into a mapping
//! 2. Extracts the `feature_type` tag
//! 3. Resolves the tag to a constructor through the registry
//! 4. Hands the mapping to the constructor, which keeps it
//!
//! [`Factory::create_tagged`] is the bare-tag variant: it resolves the tag and
//! stamps it onto the new instance, with no further configuration.
//!
//! The factory never mutates the registries it reads from.

pub mod registry;

pub use registry::{get_registry, initialize_registry, Registries};

use feature_catalog::{Feature, FeatureError, TaggedFeature};
use feature_config::{ConfigError, ConfigInput, ConfigSource};
use feature_types::{feature_type_value, type_str, FeatureConfig, RegistryError};
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while creating a feature.
#[derive(Debug, Error)]
pub enum FactoryError {
	/// The configuration input could not be turned into a mapping.
	#[error("Failed to load configuration: {0}")]
	ConfigLoad(#[from] ConfigError),
	/// The configuration has no `feature_type` field.
	#[error("Missing required field: feature_type")]
	MissingTypeTag,
	/// The `feature_type` field is present but is not a string.
	#[error("Field 'feature_type' must be a string, got {0}")]
	InvalidTypeTag(&'static str),
	/// No implementation is registered for the tag.
	#[error(transparent)]
	Lookup(#[from] RegistryError),
	/// The implementation rejected its configuration.
	#[error("Failed to construct feature '{tag}': {source}")]
	Construction {
		tag: String,
		#[source]
		source: FeatureError,
	},
}

impl FactoryError {
	/// Returns true if the tag was well formed but nothing is registered
	/// under it, which the caller can fix by choosing another tag.
	pub fn is_unknown_type_tag(&self) -> bool {
		matches!(
			self,
			FactoryError::Lookup(RegistryError::UnknownTypeTag { .. })
		)
	}
}

/// Creates features by type tag.
#[derive(Debug, Clone, Copy)]
pub struct Factory<'a> {
	registries: &'a Registries,
}

impl Factory<'static> {
	/// Returns a factory backed by the process-wide registries.
	pub fn global() -> Self {
		Self {
			registries: initialize_registry(),
		}
	}
}

impl<'a> Factory<'a> {
	/// Returns a factory backed by caller-provided registries.
	pub fn with_registries(registries: &'a Registries) -> Self {
		Self { registries }
	}

	/// Creates a configuration-driven feature.
	///
	/// # Errors
	///
	/// - [`FactoryError::ConfigLoad`] if a config file is missing or unparseable
	/// - [`FactoryError::MissingTypeTag`] if the mapping has no `feature_type`
	/// - [`FactoryError::InvalidTypeTag`] if `feature_type` is not a string
	/// - [`FactoryError::Lookup`] if no implementation is registered for the tag
	/// - [`FactoryError::Construction`] if the implementation rejects the mapping
	pub fn create(&self, input: impl Into<ConfigInput>) -> Result<Box<dyn Feature>, FactoryError> {
		let config = input.into().normalize()?;
		let tag = extract_type_tag(&config)?.to_string();

		let constructor = self.registries.features.resolve(&tag).inspect_err(|e| {
			tracing::warn!(feature_type = %tag, error = %e, "Unknown feature type");
		})?;

		let feature = constructor(config).map_err(|source| {
			tracing::error!(feature_type = %tag, error = %source, "Failed to construct feature");
			FactoryError::Construction {
				tag: tag.clone(),
				source,
			}
		})?;

		tracing::debug!(feature_type = %tag, "Created feature");
		Ok(feature)
	}

	/// Creates a feature from loose fields, one of which is `feature_type`.
	pub fn create_from_fields<K, V, I>(&self, fields: I) -> Result<Box<dyn Feature>, FactoryError>
	where
		K: Into<String>,
		V: Into<Value>,
		I: IntoIterator<Item = (K, V)>,
	{
		self.create(ConfigInput::Fields(feature_types::config_from_pairs(fields)))
	}

	/// Creates a feature from an optional explicit source or loose fields.
	///
	/// Supplying both a source and a non-empty field set is rejected with
	/// [`FactoryError::ConfigLoad`] wrapping [`ConfigError::ConflictingSources`].
	pub fn create_from_parts(
		&self,
		source: Option<ConfigSource>,
		fields: FeatureConfig,
	) -> Result<Box<dyn Feature>, FactoryError> {
		self.create(ConfigInput::from_parts(source, fields)?)
	}

	/// Creates a bare-tag feature whose only state is `tag`.
	pub fn create_tagged(&self, tag: &str) -> Result<Box<dyn TaggedFeature>, FactoryError> {
		let constructor = self.registries.tagged.resolve(tag).inspect_err(|e| {
			tracing::warn!(subclass_type = %tag, error = %e, "Unknown tagged feature type");
		})?;

		tracing::debug!(subclass_type = %tag, "Created tagged feature");
		Ok(constructor(tag))
	}
}

fn extract_type_tag(config: &FeatureConfig) -> Result<&str, FactoryError> {
	match feature_type_value(config) {
		None => Err(FactoryError::MissingTypeTag),
		Some(Value::String(tag)) => Ok(tag),
		Some(other) => Err(FactoryError::InvalidTypeTag(type_str(other))),
	}
}

/// Creates a configuration-driven feature using the process-wide registries.
pub fn create(input: impl Into<ConfigInput>) -> Result<Box<dyn Feature>, FactoryError> {
	Factory::global().create(input)
}

/// Creates a bare-tag feature using the process-wide registries.
pub fn create_tagged(tag: &str) -> Result<Box<dyn TaggedFeature>, FactoryError> {
	Factory::global().create_tagged(tag)
}
