//! Configuration mapping passed to feature constructors.

use serde_json::Value;

/// Reserved configuration key carrying the type tag.
pub const FEATURE_TYPE_KEY: &str = "feature_type";

/// A flat mapping of string keys to arbitrary JSON values.
///
/// Every configuration handed to a feature constructor carries the type tag
/// under [`FEATURE_TYPE_KEY`] alongside implementation-specific fields. The
/// constructed feature takes ownership of the mapping it was built with.
pub type FeatureConfig = serde_json::Map<String, Value>;

/// Returns the raw type tag value stored in a configuration, if any.
pub fn feature_type_value(config: &FeatureConfig) -> Option<&Value> {
	config.get(FEATURE_TYPE_KEY)
}

/// Builds a configuration from key/value pairs.
///
/// Later pairs overwrite earlier ones with the same key.
pub fn config_from_pairs<K, V, I>(pairs: I) -> FeatureConfig
where
	K: Into<String>,
	V: Into<Value>,
	I: IntoIterator<Item = (K, V)>,
{
	pairs
		.into_iter()
		.map(|(key, value)| (key.into(), value.into()))
		.collect()
}
