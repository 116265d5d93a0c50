//! Loaded implementation types.
//!
//! A [`TypeHandle`] is what a [`TypeLoader`](crate::TypeLoader) hands back for a
//! name: the canonical name of the implementation, the restriction types it can
//! stand in for, and the aliases it declares. Handles compare by identity, so two
//! names that load the same handle count as one implementation.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::RestrictionType;

struct TypeInfo {
	canonical_name: Box<str>,
	supertypes: Vec<RestrictionType>,
	aliases: Vec<Box<str>>,
}

/// Shared handle to a loaded implementation type.
#[derive(Clone)]
pub struct TypeHandle(Arc<TypeInfo>);

impl TypeHandle {
	/// Starts building a handle with the given canonical name.
	pub fn builder(canonical_name: impl Into<Box<str>>) -> TypeHandleBuilder {
		TypeHandleBuilder {
			canonical_name: canonical_name.into(),
			supertypes: Vec::new(),
			aliases: Vec::new(),
		}
	}

	/// Fully-qualified name the implementation is registered under.
	pub fn canonical_name(&self) -> &str {
		&self.0.canonical_name
	}

	/// Aliases declared by the implementation, in declaration order.
	pub fn aliases(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
		self.0.aliases.iter().map(|alias| &**alias)
	}

	/// Restriction types this implementation satisfies.
	pub fn supertypes(&self) -> &[RestrictionType] {
		&self.0.supertypes
	}

	/// Returns true if the implementation may be used where `restriction` is expected.
	pub fn is_assignable_to(&self, restriction: &RestrictionType) -> bool {
		self.0.supertypes.iter().any(|ty| ty == restriction)
	}
}

impl PartialEq for TypeHandle {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

impl Eq for TypeHandle {}

impl Hash for TypeHandle {
	fn hash<H: Hasher>(&self, state: &mut H) {
		Arc::as_ptr(&self.0).hash(state);
	}
}

impl fmt::Debug for TypeHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("TypeHandle").field(&self.0.canonical_name).finish()
	}
}

impl fmt::Display for TypeHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0.canonical_name)
	}
}

/// Builder for [`TypeHandle`].
#[derive(Debug, Clone)]
pub struct TypeHandleBuilder {
	canonical_name: Box<str>,
	supertypes: Vec<RestrictionType>,
	aliases: Vec<Box<str>>,
}

impl TypeHandleBuilder {
	/// Declares that the implementation satisfies `restriction`.
	pub fn implements(mut self, restriction: &RestrictionType) -> Self {
		self.supertypes.push(restriction.clone());
		self
	}

	/// Adds a nickname for the implementation.
	pub fn alias(mut self, alias: impl Into<Box<str>>) -> Self {
		self.aliases.push(alias.into());
		self
	}

	pub fn build(self) -> TypeHandle {
		TypeHandle(Arc::new(TypeInfo {
			canonical_name: self.canonical_name,
			supertypes: self.supertypes,
			aliases: self.aliases,
		}))
	}
}
