//! Name resolution ladder.
//!
//! # Resolution Order
//!
//! 1. Cache: the exact-match slot probed from the entry, if already settled.
//! 2. Convention-based loads, first success wins:
//!    1. `value + factory_suffix`
//!    2. `value`
//!    3. `package + separator + value + factory_suffix`
//!    4. `package + separator + value`
//! 3. Alias indirection: the canonical name paired with the first alias that
//!    matches `value` ignoring case, resolved by the caller.
//! 4. Not found.
//!
//! Whatever comes out of steps 2-4 is checked against the restriction type and
//! handed back together with a [`CacheUpdate`] for the registry to apply. The
//! resolver itself never touches the entry map.

use tracing::{trace, warn};

use crate::entry::{Entry, SlotState};
use crate::{ResolverConfig, RestrictionType, TypeHandle, TypeLoader};


/// What a lookup saw in the cache before resolving.
///
/// Taken under the read lock so resolution can run without holding it.
#[derive(Debug, Clone, Default)]
pub(crate) struct Probe {
	/// An entry exists for the restriction type.
	pub(crate) registered: bool,
	/// First slot named exactly like the value, with its state at probe time.
	pub(crate) slot: Option<(usize, SlotState)>,
	/// Canonical name behind the first alias matching the value.
	pub(crate) alias_target: Option<Box<str>>,
}

impl Probe {
	pub(crate) fn capture(entry: Option<&Entry>, value: &str) -> Self {
		let Some(entry) = entry else {
			return Self::default();
		};
		Self {
			registered: true,
			slot: entry.find(value).map(|(slot, state)| (slot, state.clone())),
			alias_target: entry.has_aliases().then(|| entry.find_alias(value)).flatten().map(Into::into),
		}
	}
}

/// Cache write produced by a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CacheUpdate {
	/// The probed slot was already settled.
	None,
	/// Settle the probed slot.
	Overwrite { slot: usize, state: SlotState },
	/// Record the outcome under a new slot for the looked-up value.
	Append { name: Box<str>, state: SlotState },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Resolution {
	pub(crate) outcome: Option<TypeHandle>,
	pub(crate) update: CacheUpdate,
}

/// Stateless resolver over an injected loader.
pub(crate) struct Resolver<'a, L> {
	loader: &'a L,
	config: &'a ResolverConfig,
}

impl<'a, L: TypeLoader> Resolver<'a, L> {
	pub(crate) fn new(loader: &'a L, config: &'a ResolverConfig) -> Self {
		Self { loader, config }
	}

	/// Resolves `value` for `restriction`.
	///
	/// `via_alias` is called at most once, with the alias target from `probe`,
	/// and only when every convention-based load failed.
	pub(crate) fn resolve<F>(&self, restriction: &RestrictionType, value: &str, probe: &Probe, via_alias: F) -> Resolution
	where
		F: FnOnce(&str) -> Option<TypeHandle>,
	{
		match &probe.slot {
			Some((_, SlotState::Resolved(handle))) => {
				return Resolution {
					outcome: Some(handle.clone()),
					update: CacheUpdate::None,
				};
			}
			Some((_, SlotState::Failed)) => {
				return Resolution {
					outcome: None,
					update: CacheUpdate::None,
				};
			}
			Some((_, SlotState::Unresolved)) | None => {}
		}

		let mut found = self.load_by_convention(restriction, value);
		if found.is_none()
			&& let Some(target) = probe.alias_target.as_deref()
		{
			found = via_alias(target);
		}

		let state = match found {
			Some(handle) if handle.is_assignable_to(restriction) => SlotState::Resolved(handle),
			Some(handle) => {
				warn!(
					domain = "implreg",
					restriction = %restriction,
					value,
					resolved = handle.canonical_name(),
					"resolved type does not implement restriction type; pinning as failed",
				);
				SlotState::Failed
			}
			None => SlotState::Failed,
		};

		let outcome = match &state {
			SlotState::Resolved(handle) => Some(handle.clone()),
			_ => None,
		};
		let update = match probe.slot {
			Some((slot, _)) => CacheUpdate::Overwrite { slot, state },
			None => CacheUpdate::Append { name: value.into(), state },
		};
		Resolution { outcome, update }
	}

	/// Names tried for `value`, in order.
	///
	/// Package-relative names are skipped for restriction types in the root
	/// package; they would only repeat the bare attempts behind a separator.
	pub(crate) fn candidate_names(&self, restriction: &RestrictionType, value: &str) -> Vec<String> {
		let suffix = &self.config.factory_suffix;
		let mut names = vec![format!("{value}{suffix}"), value.to_owned()];
		let package = restriction.package();
		if !package.is_empty() {
			let sep = &self.config.package_separator;
			names.push(format!("{package}{sep}{value}{suffix}"));
			names.push(format!("{package}{sep}{value}"));
		}
		names
	}

	fn load_by_convention(&self, restriction: &RestrictionType, value: &str) -> Option<TypeHandle> {
		self.candidate_names(restriction, value).into_iter().find_map(|name| match self.loader.load(&name) {
			Ok(handle) => {
				trace!(domain = "implreg", restriction = %restriction, name = %name, "load hit");
				Some(handle)
			}
			Err(error) => {
				trace!(domain = "implreg", restriction = %restriction, %error, "load miss");
				None
			}
		})
	}
}
