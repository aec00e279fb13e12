//! Bare-tag variant B.

use crate::TaggedFeature;
use feature_types::ImplementationRegistry;
use std::io;

/// Variant that writes its tag in upper case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantB {
	subclass_type: String,
}

impl TaggedFeature for VariantB {
	fn subclass_type(&self) -> &str {
		&self.subclass_type
	}

	fn print(&self, out: &mut dyn io::Write) -> io::Result<()> {
		writeln!(out, "VariantB")?;
		writeln!(out, "{}", self.subclass_type.to_uppercase())
	}
}

/// Factory function to create variant B, stamping `tag` onto it.
pub fn create_variant(tag: &str) -> Box<dyn TaggedFeature> {
	Box::new(VariantB {
		subclass_type: tag.to_string(),
	})
}

/// Registry for variant B.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "B";
	type Factory = crate::TaggedFactory;

	fn factory() -> Self::Factory {
		create_variant
	}
}

impl crate::TaggedRegistry for Registry {}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_factory_stamps_tag() {
		let variant = (Registry::factory())(Registry::NAME);
		assert_eq!(variant.subclass_type(), "B");
	}

	#[test]
	fn test_print_output() {
		let mut out = Vec::new();
		create_variant("b").print(&mut out).unwrap();

		assert_eq!(String::from_utf8(out).unwrap(), "VariantB\nB\n");
	}
}
