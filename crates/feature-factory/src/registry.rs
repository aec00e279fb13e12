//! Process-wide registries for feature implementations.
//!
//! The global registries are populated exactly once, on first use, from the
//! implementation lists exported by `feature_catalog`. After that point they
//! are only read.

use feature_catalog::{FeatureFactory, TaggedFactory};
use feature_types::TypeRegistry;
use std::sync::OnceLock;

/// Registries for both capability families.
#[derive(Debug)]
pub struct Registries {
	/// Configuration-driven features, keyed by `feature_type`.
	pub features: TypeRegistry<FeatureFactory>,
	/// Bare-tag features.
	pub tagged: TypeRegistry<TaggedFactory>,
}

impl Registries {
	/// Create a new empty set of registries
	pub fn new() -> Self {
		Self {
			features: TypeRegistry::new("feature"),
			tagged: TypeRegistry::new("tagged"),
		}
	}

	/// Create registries holding every implementation in the catalog
	pub fn with_catalog() -> Self {
		let registries = Self::new();

		for (name, factory) in feature_catalog::get_all_feature_implementations() {
			registries.features.register(name, factory);
		}

		for (name, factory) in feature_catalog::get_all_tagged_implementations() {
			registries.tagged.register(name, factory);
		}

		registries
	}
}

impl Default for Registries {
	fn default() -> Self {
		Self::new()
	}
}

// Global registry instance
static REGISTRY: OnceLock<Registries> = OnceLock::new();

/// Initialize the global registries with all available implementations
pub fn initialize_registry() -> &'static Registries {
	REGISTRY.get_or_init(|| {
		let registries = Registries::with_catalog();
		tracing::info!(
			features = ?registries.features.tags(),
			tagged = ?registries.tagged.tags(),
			"Initialized feature registry"
		);
		registries
	})
}

/// Get the global registries
pub fn get_registry() -> &'static Registries {
	initialize_registry()
}
