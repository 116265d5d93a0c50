use crate::RestrictionType;

/// Failure reported by a [`TypeLoader`](crate::TypeLoader).
///
/// The registry never propagates these: during name resolution a failed load
/// just moves on to the next candidate name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
	/// No type is known under this name.
	#[error("no type named {name:?}")]
	NotFound { name: String },
	/// The type exists but could not be loaded.
	#[error("failed to load {name:?}: {reason}")]
	Failed { name: String, reason: String },
}

impl LoadError {
	pub fn not_found(name: impl Into<String>) -> Self {
		Self::NotFound { name: name.into() }
	}

	/// Name the load was attempted for.
	pub fn name(&self) -> &str {
		match self {
			Self::NotFound { name } | Self::Failed { name, .. } => name,
		}
	}
}

/// Registration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	/// An alias was registered before anything else for its restriction type.
	#[error("no registry entry for restriction type {restriction}")]
	UnknownRestriction { restriction: RestrictionType },
}
