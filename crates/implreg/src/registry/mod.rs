//! Restriction-type keyed implementation registry.
//!
//! # Lifecycle
//!
//! 1. **Registration:** startup code records candidates by name
//!    ([`ImplementationRegistry::register_name`]), by loaded handle
//!    ([`ImplementationRegistry::register_type`]) and by alias. These take
//!    `&mut self`, so the tables are complete before the registry is shared.
//! 2. **Lookup:** any number of threads resolve user-supplied strings through a
//!    shared `&ImplementationRegistry`. Every outcome, including "not found", is
//!    written back under the exact string that was looked up.
//!
//! # Concurrency
//!
//! - Cache probes take the read lock.
//! - Loads run with no lock held, so loaders may call back into the registry.
//! - Write-back takes the write lock and only settles unresolved slots. Two
//!   lookups racing on the same value may both load; the first write wins.

use parking_lot::RwLock;
use rustc_hash::FxHashMap as HashMap;
use tracing::{debug, trace, warn};

use crate::entry::{Entry, SlotState};
use crate::resolver::{CacheUpdate, Probe, Resolver};
use crate::{RegistryError, ResolverConfig, RestrictionType, TypeHandle, TypeLoader};


/// Registry of available implementations, keyed by restriction type.
pub struct ImplementationRegistry<L> {
	loader: L,
	config: ResolverConfig,
	entries: RwLock<HashMap<RestrictionType, Entry>>,
}

impl<L: TypeLoader> ImplementationRegistry<L> {
	/// Creates an empty registry with the default [`ResolverConfig`].
	pub fn new(loader: L) -> Self {
		Self::with_config(loader, ResolverConfig::default())
	}

	pub fn with_config(loader: L, config: ResolverConfig) -> Self {
		Self {
			loader,
			config,
			entries: RwLock::new(HashMap::default()),
		}
	}

	pub fn config(&self) -> &ResolverConfig {
		&self.config
	}

	pub fn loader(&self) -> &L {
		&self.loader
	}

	/// Records `name` as an unresolved candidate for `restriction`.
	///
	/// Nothing is loaded until the name is first looked up.
	pub fn register_name(&mut self, restriction: &RestrictionType, name: impl Into<Box<str>>) {
		self.entry_mut(restriction).add_name(name);
	}

	/// Records an already loaded implementation and the aliases it declares.
	///
	/// A handle that does not implement `restriction` is cached as failed, so
	/// its name and aliases never resolve.
	pub fn register_type(&mut self, restriction: &RestrictionType, handle: TypeHandle) {
		let entry = self.entry_mut(restriction);
		let canonical = handle.canonical_name();
		if handle.is_assignable_to(restriction) {
			entry.add_hit(canonical, handle.clone());
		} else {
			warn!(
				domain = "implreg",
				restriction = %restriction,
				name = canonical,
				"registered type does not implement restriction type",
			);
			entry.push(canonical.into(), SlotState::Failed);
		}
		for alias in handle.aliases() {
			entry.add_alias(alias, canonical);
		}
	}

	/// Maps `alias` to `canonical_name` for `restriction`.
	///
	/// # Panics
	///
	/// Panics if nothing has been registered for `restriction` yet. Aliases
	/// must be registered after the implementations they point at.
	pub fn register_alias(&mut self, restriction: &RestrictionType, alias: impl Into<Box<str>>, canonical_name: impl Into<Box<str>>) {
		if let Err(error) = self.try_register_alias(restriction, alias, canonical_name) {
			panic!("{error}");
		}
	}

	/// Fallible [`register_alias`](Self::register_alias).
	pub fn try_register_alias(
		&mut self,
		restriction: &RestrictionType,
		alias: impl Into<Box<str>>,
		canonical_name: impl Into<Box<str>>,
	) -> Result<(), RegistryError> {
		let entry = self.entries.get_mut().get_mut(restriction).ok_or_else(|| RegistryError::UnknownRestriction {
			restriction: restriction.clone(),
		})?;
		entry.add_alias(alias, canonical_name);
		Ok(())
	}

	/// Resolves `value` to an implementation of `restriction`.
	///
	/// `value` may be a fully-qualified name, a name relative to the
	/// restriction type's package (with or without the factory suffix), or an
	/// alias. Returns `None` when nothing matches or the match does not
	/// implement `restriction`; both outcomes are cached.
	pub fn find_implementation(&self, restriction: &RestrictionType, value: &str) -> Option<TypeHandle> {
		self.find_at_depth(restriction, value, 0)
	}

	fn find_at_depth(&self, restriction: &RestrictionType, value: &str, depth: usize) -> Option<TypeHandle> {
		let probe = Probe::capture(self.entries.read().get(restriction), value);
		if !probe.registered {
			trace!(domain = "implreg", restriction = %restriction, value, "lookup on unregistered restriction type");
		}

		let resolution = Resolver::new(&self.loader, &self.config).resolve(restriction, value, &probe, |target| {
			if depth >= self.config.max_alias_depth {
				warn!(
					domain = "implreg",
					restriction = %restriction,
					value,
					alias_target = target,
					max_depth = self.config.max_alias_depth,
					"alias chain too deep; giving up",
				);
				return None;
			}
			self.find_at_depth(restriction, target, depth + 1)
		});

		self.write_back(restriction, resolution.update);
		resolution.outcome
	}

	fn write_back(&self, restriction: &RestrictionType, update: CacheUpdate) {
		if update == CacheUpdate::None {
			return;
		}
		let mut entries = self.entries.write();
		match update {
			CacheUpdate::None => {}
			CacheUpdate::Overwrite { slot, state } => {
				let Some(entry) = entries.get_mut(restriction) else {
					return;
				};
				let resolved = state_label(&state);
				if entry.settle(slot, state) {
					debug!(domain = "implreg", restriction = %restriction, slot, resolved, "cached lookup");
				}
			}
			CacheUpdate::Append { name, state } => {
				let entry = entries.entry(restriction.clone()).or_default();
				match entry.find(&name).map(|(slot, existing)| (slot, existing.is_settled())) {
					// Another lookup cached this value since the probe.
					Some((_, true)) => {}
					Some((slot, false)) => {
						entry.settle(slot, state);
					}
					None => {
						debug!(domain = "implreg", restriction = %restriction, value = &*name, resolved = state_label(&state), "cached lookup");
						entry.push(name, state);
					}
				}
			}
		}
	}

	/// Returns every implementation known for `restriction`.
	///
	/// Unresolved candidates are loaded by their registered name; failures are
	/// logged and never retried. Each handle appears once, in candidate order.
	pub fn find_all_implementations(&self, restriction: &RestrictionType) -> Vec<TypeHandle> {
		let pending: Vec<(usize, Box<str>)> = match self.entries.read().get(restriction) {
			Some(entry) => entry.unresolved().map(|(slot, name)| (slot, name.into())).collect(),
			None => return Vec::new(),
		};
		let loaded: Vec<(usize, SlotState)> = pending
			.into_iter()
			.map(|(slot, name)| (slot, self.load_registered(restriction, &name)))
			.collect();

		let mut entries = self.entries.write();
		let Some(entry) = entries.get_mut(restriction) else {
			return Vec::new();
		};
		for (slot, state) in loaded {
			entry.settle(slot, state);
		}

		let mut found: Vec<TypeHandle> = Vec::with_capacity(entry.candidates().len());
		for candidate in entry.candidates() {
			if let SlotState::Resolved(handle) = &candidate.state
				&& !found.contains(handle)
			{
				found.push(handle.clone());
			}
		}
		found
	}

	fn load_registered(&self, restriction: &RestrictionType, name: &str) -> SlotState {
		match self.loader.load(name) {
			Ok(handle) if handle.is_assignable_to(restriction) => SlotState::Resolved(handle),
			Ok(handle) => {
				warn!(
					domain = "implreg",
					restriction = %restriction,
					name,
					resolved = handle.canonical_name(),
					"registered type does not implement restriction type",
				);
				SlotState::Failed
			}
			Err(error) => {
				warn!(domain = "implreg", restriction = %restriction, name, %error, "failed to load registered implementation");
				SlotState::Failed
			}
		}
	}

	/// Returns true once anything has been registered or cached for `restriction`.
	pub fn contains(&self, restriction: &RestrictionType) -> bool {
		self.entries.read().contains_key(restriction)
	}

	fn entry_mut(&mut self, restriction: &RestrictionType) -> &mut Entry {
		self.entries.get_mut().entry(restriction.clone()).or_default()
	}
}

fn state_label(state: &SlotState) -> &'static str {
	match state {
		SlotState::Unresolved => "unresolved",
		SlotState::Resolved(_) => "resolved",
		SlotState::Failed => "failed",
	}
}

impl<L> std::fmt::Debug for ImplementationRegistry<L> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let entries = self.entries.read();
		f.debug_struct("ImplementationRegistry")
			.field("config", &self.config)
			.field("restriction_types", &entries.len())
			.finish_non_exhaustive()
	}
}
