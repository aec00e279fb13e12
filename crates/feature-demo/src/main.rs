//! Main entry point for the feature factory demo.
//!
//! Builds features through the factory and prints them. With no arguments it
//! creates one of each registered implementation; otherwise the feature is
//! described by a config file, by `--set` fields, or by a bare `--tag`.

use clap::Parser;
use feature_config::ConfigSource;
use feature_factory::Factory;
use feature_types::{FeatureConfig, FEATURE_TYPE_KEY};
use serde_json::Value;
use std::io::{self, Write};
use std::path::PathBuf;

/// Command-line arguments for the feature demo.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to a JSON or TOML feature configuration
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Configuration field as key=value; the value is parsed as JSON when possible
	#[arg(short = 's', long = "set", value_parser = parse_field)]
	fields: Vec<(String, Value)>,

	/// Create a bare-tag feature instead of a configured one
	#[arg(short, long, conflicts_with_all = ["config", "fields"])]
	tag: Option<String>,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "warn")]
	log_level: String,
}

/// Parses a `key=value` argument.
///
/// The value is read as JSON so `repeat=2` yields a number; anything that is
/// not valid JSON is kept as a plain string.
fn parse_field(raw: &str) -> Result<(String, Value), String> {
	let (key, value) = raw
		.split_once('=')
		.ok_or_else(|| format!("expected key=value, got '{}'", raw))?;

	if key.is_empty() {
		return Err(format!("empty key in '{}'", raw));
	}

	let value =
		serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
	Ok((key.to_string(), value))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

	fmt()
		.with_env_filter(env_filter)
		.with_target(true)
		.with_writer(io::stderr)
		.init();

	let factory = Factory::global();
	let stdout = io::stdout();
	let mut out = stdout.lock();

	run(&args, factory, &mut out)?;
	out.flush()?;
	Ok(())
}

/// Creates and prints the features requested by `args`.
fn run(
	args: &Args,
	factory: Factory<'_>,
	out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
	if let Some(tag) = &args.tag {
		factory.create_tagged(tag)?.print(out)?;
		return Ok(());
	}

	if args.config.is_none() && args.fields.is_empty() {
		return run_showcase(factory, out);
	}

	let source = args.config.clone().map(ConfigSource::Path);
	let fields: FeatureConfig = args.fields.iter().cloned().collect();

	let feature = factory.create_from_parts(source, fields)?;
	tracing::info!(feature_type = feature.feature_type(), "Created feature");
	feature.print(out)?;
	Ok(())
}

/// Creates one instance of every registered implementation.
fn run_showcase(
	factory: Factory<'_>,
	out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
	let registries = feature_factory::get_registry();

	for tag in registries.features.tags() {
		let feature = factory.create_from_fields([
			(FEATURE_TYPE_KEY, Value::String(tag.clone())),
			(
				"some_other_config",
				Value::String(format!("hello world {}", tag)),
			),
		])?;
		feature.print(out)?;
	}

	for tag in registries.tagged.tags() {
		factory.create_tagged(&tag)?.print(out)?;
	}

	Ok(())
}
