//! Reads a feature configuration from disk.

use crate::ConfigError;
use feature_types::{type_str, FeatureConfig};
use serde_json::Value;
use std::path::Path;

/// Loads a configuration file into a mapping.
///
/// The file is read once and parsed as TOML when the extension is `toml`,
/// JSON otherwise. Values are kept exactly as written.
///
/// # Errors
///
/// - [`ConfigError::Io`] if the file can not be read
/// - [`ConfigError::Parse`] if the content does not parse
/// - [`ConfigError::NotAMapping`] if the top-level value is not an object
pub fn load_file(path: &Path) -> Result<FeatureConfig, ConfigError> {
	let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
		path: path.to_path_buf(),
		source,
	})?;

	let is_toml = path
		.extension()
		.and_then(|ext| ext.to_str())
		.is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

	let config = if is_toml {
		parse_toml(&content)?
	} else {
		parse_json(&content)?
	};

	tracing::debug!(path = %path.display(), fields = config.len(), "Loaded feature config");
	Ok(config)
}

fn parse_json(content: &str) -> Result<FeatureConfig, ConfigError> {
	match serde_json::from_str::<Value>(content)? {
		Value::Object(map) => Ok(map),
		other => Err(ConfigError::NotAMapping(type_str(&other))),
	}
}

fn parse_toml(content: &str) -> Result<FeatureConfig, ConfigError> {
	let table: toml::Table = toml::from_str(content)?;
	table
		.into_iter()
		.map(|(key, value)| Ok((key, toml_to_json(value)?)))
		.collect()
}

// Datetimes become their RFC 3339 text instead of serde's private wrapper
// object; non-finite floats have no JSON form.
fn toml_to_json(value: toml::Value) -> Result<Value, ConfigError> {
	Ok(match value {
		toml::Value::String(s) => Value::String(s),
		toml::Value::Integer(i) => Value::from(i),
		toml::Value::Float(f) => serde_json::Number::from_f64(f)
			.map(Value::Number)
			.ok_or_else(|| ConfigError::Parse(format!("Float {} has no JSON representation", f)))?,
		toml::Value::Boolean(b) => Value::Bool(b),
		toml::Value::Datetime(dt) => Value::String(dt.to_string()),
		toml::Value::Array(items) => Value::Array(
			items
				.into_iter()
				.map(toml_to_json)
				.collect::<Result<_, _>>()?,
		),
		toml::Value::Table(table) => Value::Object(
			table
				.into_iter()
				.map(|(key, value)| Ok((key, toml_to_json(value)?)))
				.collect::<Result<_, ConfigError>>()?,
		),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;
	use std::fs;
	use tempfile::TempDir;

	#[test]
	fn test_load_json_file() {
		let temp_dir = TempDir::new().unwrap();
		let path = temp_dir.path().join("feature.json");
		fs::write(&path, r#"{"feature_type": "A", "k": "v", "n": [1, 2]}"#).unwrap();

		let config = load_file(&path).unwrap();
		assert_eq!(config.len(), 3);
		assert_eq!(config["feature_type"], json!("A"));
		assert_eq!(config["n"], json!([1, 2]));
	}

	#[test]
	fn test_load_toml_file() {
		let temp_dir = TempDir::new().unwrap();
		let path = temp_dir.path().join("feature.toml");
		fs::write(
			&path,
			r#"
feature_type = "B"
repeat = 2

[nested]
enabled = true
"#,
		)
		.unwrap();

		let config = load_file(&path).unwrap();
		assert_eq!(config["feature_type"], json!("B"));
		assert_eq!(config["repeat"], json!(2));
		assert_eq!(config["nested"], json!({ "enabled": true }));
	}

	#[test]
	fn test_unknown_extension_parses_as_json() {
		let temp_dir = TempDir::new().unwrap();
		let path = temp_dir.path().join("feature.conf");
		fs::write(&path, r#"{"feature_type": "A"}"#).unwrap();

		assert_eq!(load_file(&path).unwrap()["feature_type"], json!("A"));
	}

	#[test]
	fn test_invalid_json_is_parse_error() {
		let temp_dir = TempDir::new().unwrap();
		let path = temp_dir.path().join("broken.json");
		fs::write(&path, r#"{"feature_type": "A""#).unwrap();

		assert!(matches!(load_file(&path), Err(ConfigError::Parse(_))));
	}

	#[test]
	fn test_invalid_toml_is_parse_error() {
		let temp_dir = TempDir::new().unwrap();
		let path = temp_dir.path().join("broken.toml");
		fs::write(&path, "feature_type = ").unwrap();

		assert!(matches!(load_file(&path), Err(ConfigError::Parse(_))));
	}

	#[test]
	fn test_non_mapping_json_rejected() {
		let temp_dir = TempDir::new().unwrap();
		let path = temp_dir.path().join("list.json");
		fs::write(&path, r#"["feature_type", "A"]"#).unwrap();

		assert!(matches!(
			load_file(&path),
			Err(ConfigError::NotAMapping("array"))
		));
	}

	#[test]
	fn test_missing_file() {
		let temp_dir = TempDir::new().unwrap();
		let path = temp_dir.path().join("missing.json");

		let err = load_file(&path).unwrap_err();
		assert!(matches!(err, ConfigError::Io { .. }));
		assert!(err.to_string().contains("missing.json"));
	}

	#[test]
	fn test_dollar_references_kept_literally() {
		std::env::set_var("FEATURE_LOADER_TEST_GREETING", "hello from env");

		let temp_dir = TempDir::new().unwrap();
		let path = temp_dir.path().join("feature.json");
		fs::write(
			&path,
			r#"{
				"feature_type": "A",
				"k": "${HOME}",
				"g": "${FEATURE_LOADER_TEST_GREETING}",
				"u": "${FEATURE_LOADER_NEVER_SET}"
			}"#,
		)
		.unwrap();

		let config = load_file(&path).unwrap();
		assert_eq!(config["feature_type"], json!("A"));
		assert_eq!(config["k"], json!("${HOME}"));
		assert_eq!(config["g"], json!("${FEATURE_LOADER_TEST_GREETING}"));
		assert_eq!(config["u"], json!("${FEATURE_LOADER_NEVER_SET}"));

		std::env::remove_var("FEATURE_LOADER_TEST_GREETING");
	}

	#[test]
	fn test_env_value_can_not_retag_file() {
		std::env::set_var("FEATURE_LOADER_TEST_INJECT", r#"x", "feature_type": "B"#);

		let temp_dir = TempDir::new().unwrap();
		let path = temp_dir.path().join("feature.json");
		fs::write(&path, r#"{"feature_type": "A", "k": "${FEATURE_LOADER_TEST_INJECT}"}"#)
			.unwrap();

		let config = load_file(&path).unwrap();
		assert_eq!(config.len(), 2);
		assert_eq!(config["feature_type"], json!("A"));

		std::env::remove_var("FEATURE_LOADER_TEST_INJECT");
	}

	#[test]
	fn test_toml_datetimes_become_strings() {
		let temp_dir = TempDir::new().unwrap();
		let path = temp_dir.path().join("feature.toml");
		fs::write(
			&path,
			r#"
feature_type = "A"
created = 1979-05-27T07:32:00Z
day = 1979-05-27

[window]
opens = 07:32:00
"#,
		)
		.unwrap();

		let config = load_file(&path).unwrap();
		assert_eq!(config["created"], json!("1979-05-27T07:32:00Z"));
		assert_eq!(config["day"], json!("1979-05-27"));
		assert_eq!(config["window"], json!({ "opens": "07:32:00" }));
	}

	#[test]
	fn test_toml_non_finite_float_rejected() {
		let temp_dir = TempDir::new().unwrap();
		let path = temp_dir.path().join("feature.toml");
		fs::write(&path, "feature_type = \"A\"\nratio = nan\n").unwrap();

		assert!(matches!(load_file(&path), Err(ConfigError::Parse(_))));
	}
}
