//! Load-by-name capability consumed by the registry.

use rustc_hash::FxHashMap as HashMap;

use crate::{LoadError, TypeHandle};

/// Turns a fully-qualified name into a loaded [`TypeHandle`].
///
/// Implementations must be idempotent for repeated calls with the same name and
/// must not leave partial state behind on failure.
pub trait TypeLoader {
	fn load(&self, name: &str) -> Result<TypeHandle, LoadError>;
}

impl<F> TypeLoader for F
where
	F: Fn(&str) -> Result<TypeHandle, LoadError>,
{
	fn load(&self, name: &str) -> Result<TypeHandle, LoadError> {
		self(name)
	}
}

/// In-memory [`TypeLoader`] over a fixed set of named handles.
///
/// Hosts that enumerate their implementations statically register every handle
/// here once and hand the catalog to the registry.
#[derive(Debug, Default, Clone)]
pub struct TypeCatalog {
	types: HashMap<Box<str>, TypeHandle>,
}

impl TypeCatalog {
	/// Creates an empty catalog.
	pub fn new() -> Self {
		Self::default()
	}

	/// Makes `handle` loadable under its canonical name.
	///
	/// Returns the handle previously stored under that name, if any.
	pub fn insert(&mut self, handle: TypeHandle) -> Option<TypeHandle> {
		self.types.insert(handle.canonical_name().into(), handle)
	}

	/// Makes `handle` loadable under an additional name.
	pub fn insert_as(&mut self, name: impl Into<Box<str>>, handle: TypeHandle) -> Option<TypeHandle> {
		self.types.insert(name.into(), handle)
	}

	/// Builder-style [`insert`](Self::insert).
	pub fn with(mut self, handle: TypeHandle) -> Self {
		self.insert(handle);
		self
	}

	pub fn len(&self) -> usize {
		self.types.len()
	}

	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}
}

impl TypeLoader for TypeCatalog {
	fn load(&self, name: &str) -> Result<TypeHandle, LoadError> {
		self.types.get(name).cloned().ok_or_else(|| LoadError::not_found(name))
	}
}
