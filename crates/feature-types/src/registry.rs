//! Type tag registry for self-registering implementations.
//!
//! Each capability family owns one [`TypeRegistry`], mapping a type tag to the
//! constructor of the concrete implementation declared under it. Every
//! implementation module exposes a unit struct implementing
//! [`ImplementationRegistry`] so that its tag and constructor live next to
//! its definition.

use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;

/// Base trait for implementation registries.
///
/// Each concrete implementation must provide a `Registry` struct that
/// implements this trait, declaring the type tag it is created under and the
/// factory function that builds it.
pub trait ImplementationRegistry {
	/// The type tag used in configuration to select this implementation.
	///
	/// This is the value expected under the `feature_type` key, for example
	/// `"A"` or `"B"`.
	const NAME: &'static str;

	/// The factory function type this implementation provides.
	type Factory;

	/// Get the factory function for this implementation.
	fn factory() -> Self::Factory;
}

/// Errors that can occur during registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
	/// No implementation is registered under the requested tag.
	#[error(
		"No implementation registered for type tag '{tag}'. Available: [{}]",
		.available.join(", ")
	)]
	UnknownTypeTag {
		/// The tag that was looked up.
		tag: String,
		/// Sorted list of tags that are registered.
		available: Vec<String>,
	},
	/// Strict registration found the tag already taken.
	#[error("Type tag '{0}' is already registered")]
	DuplicateTypeTag(String),
}

/// Process-wide mapping from type tag to implementation descriptor.
///
/// Registration goes through `&self` so a registry can live in a `static`.
/// Lookups take a shared lock and never mutate the mapping.
pub struct TypeRegistry<D> {
	/// Capability family name, used in log output.
	family: &'static str,
	entries: RwLock<HashMap<String, D>>,
}

impl<D: Clone> TypeRegistry<D> {
	/// Creates an empty registry for the given capability family.
	pub fn new(family: &'static str) -> Self {
		Self {
			family,
			entries: RwLock::new(HashMap::new()),
		}
	}

	/// Inserts or replaces the descriptor for `tag`.
	///
	/// Re-registering a tag keeps the last descriptor written.
	pub fn register(&self, tag: impl Into<String>, descriptor: D) {
		let tag = tag.into();
		let replaced = self.write().insert(tag.clone(), descriptor).is_some();

		if replaced {
			tracing::warn!(
				registry = self.family,
				feature_type = %tag,
				"Replaced existing registration"
			);
		} else {
			tracing::debug!(registry = self.family, feature_type = %tag, "Registered");
		}
	}

	/// Inserts the descriptor for `tag`, failing if the tag is taken.
	///
	/// The existing entry is left untouched on failure.
	pub fn try_register(&self, tag: impl Into<String>, descriptor: D) -> Result<(), RegistryError> {
		let tag = tag.into();
		let mut entries = self.write();

		if entries.contains_key(&tag) {
			return Err(RegistryError::DuplicateTypeTag(tag));
		}

		tracing::debug!(registry = self.family, feature_type = %tag, "Registered");
		entries.insert(tag, descriptor);
		Ok(())
	}

	/// Looks up the descriptor registered under `tag`.
	pub fn resolve(&self, tag: &str) -> Result<D, RegistryError> {
		let entries = self.read();
		match entries.get(tag) {
			Some(descriptor) => Ok(descriptor.clone()),
			None => Err(RegistryError::UnknownTypeTag {
				tag: tag.to_string(),
				available: sorted_keys(&entries),
			}),
		}
	}

	/// Returns true if an implementation is registered under `tag`.
	pub fn contains(&self, tag: &str) -> bool {
		self.read().contains_key(tag)
	}

	/// Returns all registered tags in sorted order.
	pub fn tags(&self) -> Vec<String> {
		sorted_keys(&self.read())
	}

	/// Returns the number of registered tags.
	pub fn len(&self) -> usize {
		self.read().len()
	}

	/// Returns true if nothing has been registered yet.
	pub fn is_empty(&self) -> bool {
		self.read().is_empty()
	}

	// A poisoned lock still holds a consistent map: writers only ever do a
	// single insert.
	fn read(&self) -> RwLockReadGuard<'_, HashMap<String, D>> {
		self.entries.read().unwrap_or_else(PoisonError::into_inner)
	}

	fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, D>> {
		self.entries.write().unwrap_or_else(PoisonError::into_inner)
	}
}

impl<D: Clone> fmt::Debug for TypeRegistry<D> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TypeRegistry")
			.field("family", &self.family)
			.field("tags", &self.tags())
			.finish()
	}
}

fn sorted_keys<D>(entries: &HashMap<String, D>) -> Vec<String> {
	let mut keys: Vec<String> = entries.keys().cloned().collect();
	keys.sort();
	keys
}
