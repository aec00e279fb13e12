//! Bare-tag variant A.

use crate::TaggedFeature;
use feature_types::ImplementationRegistry;
use std::io;

/// Variant whose only state is the tag it was created under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantA {
	subclass_type: String,
}

impl VariantA {
	pub fn new(subclass_type: impl Into<String>) -> Self {
		Self {
			subclass_type: subclass_type.into(),
		}
	}
}

impl TaggedFeature for VariantA {
	fn subclass_type(&self) -> &str {
		&self.subclass_type
	}

	fn print(&self, out: &mut dyn io::Write) -> io::Result<()> {
		writeln!(out, "VariantA")?;
		writeln!(out, "{}", self.subclass_type)
	}
}

/// Factory function to create variant A, stamping `tag` onto it.
pub fn create_variant(tag: &str) -> Box<dyn TaggedFeature> {
	Box::new(VariantA::new(tag))
}

/// Registry for variant A.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "A";
	type Factory = crate::TaggedFactory;

	fn factory() -> Self::Factory {
		create_variant
	}
}

impl crate::TaggedRegistry for Registry {}
