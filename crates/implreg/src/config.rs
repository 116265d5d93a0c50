//! Resolver configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Suffix tried first when resolving a name, before the bare name itself.
pub const DEFAULT_FACTORY_SUFFIX: &str = "$Factory";

/// Separator between a restriction type's package and a relative name.
pub const DEFAULT_PACKAGE_SEPARATOR: &str = ".";

/// Maximum number of alias hops followed by a single lookup.
pub const DEFAULT_MAX_ALIAS_DEPTH: usize = 8;

/// Errors from parsing a [`ResolverConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("failed to parse resolver config: {0}")]
	Parse(#[from] toml::de::Error),
	#[error("invalid resolver config: {0}")]
	Invalid(String),
}

/// Knobs for the name-resolution ladder.
///
/// ```toml
/// factory_suffix = "$Factory"
/// package_separator = "."
/// max_alias_depth = 8
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
	/// Appended to a name for the factory-convention attempts.
	pub factory_suffix: String,
	/// Joins the restriction type's package with a relative name.
	pub package_separator: String,
	/// Alias hops followed before a lookup gives up.
	pub max_alias_depth: usize,
}

impl Default for ResolverConfig {
	fn default() -> Self {
		Self {
			factory_suffix: DEFAULT_FACTORY_SUFFIX.to_owned(),
			package_separator: DEFAULT_PACKAGE_SEPARATOR.to_owned(),
			max_alias_depth: DEFAULT_MAX_ALIAS_DEPTH,
		}
	}
}

impl ResolverConfig {
	/// Parses a TOML document; missing keys keep their defaults.
	pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(content)?;
		if config.package_separator.is_empty() {
			return Err(ConfigError::Invalid("package_separator must not be empty".into()));
		}
		Ok(config)
	}
}
