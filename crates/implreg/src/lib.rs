//! Dynamic implementation registry.
//!
//! # Purpose
//!
//! Maps a textual name to the concrete implementation of an abstract capability
//! (a [`RestrictionType`]). Names come from user input and configuration, so
//! they may be fully qualified, relative to the restriction type's package, or
//! a case-insensitive nickname.
//!
//! # Mental Model
//!
//! 1. **Startup:** subsystems register candidates per restriction type, either
//!    by name (loaded lazily) or as already loaded [`TypeHandle`]s together
//!    with their aliases.
//! 2. **Lookup:** [`ImplementationRegistry::find_implementation`] checks the
//!    per-type cache, then walks a fixed ladder of name conventions through the
//!    injected [`TypeLoader`], then follows aliases.
//! 3. **Caching:** every outcome is written back under the exact string looked
//!    up, including failures. A failed slot is never retried.
//!
//! # Key Types
//!
//! | Type | Role |
//! |------|------|
//! | [`ImplementationRegistry`] | Owns all per-restriction-type caches. |
//! | [`RestrictionType`] | Key naming the capability and its package. |
//! | [`TypeHandle`] | Loaded implementation; compared by identity. |
//! | [`TypeLoader`] | Injected load-by-name capability. |
//! | [`TypeCatalog`] | In-memory [`TypeLoader`]. |
//! | [`ResolverConfig`] | Factory suffix, package separator, alias depth. |
//!
//! # Invariants
//!
//! - Cache scans are case-sensitive; alias scans are case-insensitive.
//! - A slot settles once (resolved or failed) and never reverts.
//! - A resolved handle always implements the restriction type it is cached
//!   under; anything else is cached as failed and warned about once.

mod config;
mod entry;
mod error;
mod handle;
mod loader;
mod registry;
mod resolver;
mod restriction;

pub use config::{ConfigError, DEFAULT_FACTORY_SUFFIX, DEFAULT_MAX_ALIAS_DEPTH, DEFAULT_PACKAGE_SEPARATOR, ResolverConfig};
pub use error::{LoadError, RegistryError};
pub use handle::{TypeHandle, TypeHandleBuilder};
pub use loader::{TypeCatalog, TypeLoader};
pub use registry::ImplementationRegistry;
pub use restriction::RestrictionType;

#[cfg(test)]
pub(crate) mod test_fixtures;
