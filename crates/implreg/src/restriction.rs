//! Restriction types: the abstract capabilities implementations are resolved against.

use std::fmt;
use std::sync::Arc;

/// Identifier for an abstract capability (an interface or base type).
///
/// Only used as a registry key and as the package root for relative name
/// lookups. Cloning is cheap; both components are reference counted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RestrictionType {
	package: Arc<str>,
	name: Arc<str>,
}

impl RestrictionType {
	/// Creates a restriction type from its package path and simple name.
	pub fn new(package: impl Into<Arc<str>>, name: impl Into<Arc<str>>) -> Self {
		Self {
			package: package.into(),
			name: name.into(),
		}
	}

	/// Splits a dotted, fully-qualified name at its last `.`.
	///
	/// A name without a dot lands in the empty (root) package.
	pub fn parse(qualified: &str) -> Self {
		match qualified.rsplit_once('.') {
			Some((package, name)) => Self::new(package, name),
			None => Self::new("", qualified),
		}
	}

	/// Package the restriction type lives in, e.g. `algo`.
	pub fn package(&self) -> &str {
		&self.package
	}

	/// Simple name, e.g. `Algorithm`.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Dotted name, e.g. `algo.Algorithm`.
	pub fn qualified_name(&self) -> String {
		self.to_string()
	}
}

impl fmt::Display for RestrictionType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.package.is_empty() {
			f.write_str(&self.name)
		} else {
			write!(f, "{}.{}", self.package, self.name)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_splits_at_last_dot() {
		let restriction = RestrictionType::parse("data.clustering.Algorithm");
		assert_eq!(restriction.package(), "data.clustering");
		assert_eq!(restriction.name(), "Algorithm");
		assert_eq!(restriction.qualified_name(), "data.clustering.Algorithm");
	}

	#[test]
	fn root_package_displays_bare_name() {
		let restriction = RestrictionType::parse("Algorithm");
		assert_eq!(restriction.package(), "");
		assert_eq!(restriction.to_string(), "Algorithm");
	}
}
