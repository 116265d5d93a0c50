use parking_lot::Mutex;

use crate::{LoadError, RestrictionType, TypeCatalog, TypeHandle, TypeLoader};

/// Catalog-backed loader that records every name it is asked for.
#[derive(Default)]
pub(crate) struct RecordingLoader {
	catalog: TypeCatalog,
	attempts: Mutex<Vec<String>>,
}

impl RecordingLoader {
	pub(crate) fn new(catalog: TypeCatalog) -> Self {
		Self {
			catalog,
			attempts: Mutex::new(Vec::new()),
		}
	}

	pub(crate) fn attempts(&self) -> Vec<String> {
		self.attempts.lock().clone()
	}

	pub(crate) fn attempt_count(&self) -> usize {
		self.attempts.lock().len()
	}

	pub(crate) fn clear(&self) {
		self.attempts.lock().clear();
	}
}

impl TypeLoader for RecordingLoader {
	fn load(&self, name: &str) -> Result<TypeHandle, LoadError> {
		self.attempts.lock().push(name.to_owned());
		self.catalog.load(name)
	}
}

pub(crate) fn algorithm() -> RestrictionType {
	RestrictionType::new("algo", "Algorithm")
}

pub(crate) fn distance() -> RestrictionType {
	RestrictionType::new("algo.distance", "Distance")
}

pub(crate) fn implementing(name: &str, restriction: &RestrictionType) -> TypeHandle {
	TypeHandle::builder(name).implements(restriction).build()
}
