//! Per-restriction-type candidate and alias storage.

use crate::TypeHandle;

/// Resolution state of one cached name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum SlotState {
	/// Registered by name; no load attempted yet.
	#[default]
	Unresolved,
	Resolved(TypeHandle),
	/// Never retried.
	Failed,
}

impl SlotState {
	pub(crate) fn is_settled(&self) -> bool {
		!matches!(self, Self::Unresolved)
	}
}

#[derive(Debug, Clone)]
pub(crate) struct Candidate {
	pub(crate) name: Box<str>,
	pub(crate) state: SlotState,
}

/// Append-only cache for one restriction type.
///
/// Names match case-sensitively and the first match wins, so a later slot with
/// the same name is shadowed forever. Aliases match case-insensitively.
#[derive(Debug, Default)]
pub(crate) struct Entry {
	candidates: Vec<Candidate>,
	aliases: Vec<(Box<str>, Box<str>)>,
}

impl Entry {
	pub(crate) fn add_name(&mut self, name: impl Into<Box<str>>) {
		self.push(name.into(), SlotState::Unresolved);
	}

	pub(crate) fn add_hit(&mut self, name: impl Into<Box<str>>, handle: TypeHandle) {
		self.push(name.into(), SlotState::Resolved(handle));
	}

	pub(crate) fn push(&mut self, name: Box<str>, state: SlotState) {
		self.candidates.push(Candidate { name, state });
	}

	pub(crate) fn add_alias(&mut self, alias: impl Into<Box<str>>, canonical_name: impl Into<Box<str>>) {
		self.aliases.push((alias.into(), canonical_name.into()));
	}

	/// First slot whose name equals `value` exactly.
	pub(crate) fn find(&self, value: &str) -> Option<(usize, &SlotState)> {
		self.candidates
			.iter()
			.position(|candidate| &*candidate.name == value)
			.map(|slot| (slot, &self.candidates[slot].state))
	}

	/// Canonical name paired with the first alias matching `value`, ignoring case.
	pub(crate) fn find_alias(&self, value: &str) -> Option<&str> {
		self.aliases
			.iter()
			.find(|(alias, _)| eq_ignore_case(alias, value))
			.map(|(_, canonical)| &**canonical)
	}

	pub(crate) fn has_aliases(&self) -> bool {
		!self.aliases.is_empty()
	}

	/// Moves an unresolved slot to `state`.
	///
	/// Returns false and leaves the slot alone if it was already settled.
	pub(crate) fn settle(&mut self, slot: usize, state: SlotState) -> bool {
		let Some(candidate) = self.candidates.get_mut(slot) else {
			return false;
		};
		if candidate.state.is_settled() {
			return false;
		}
		candidate.state = state;
		true
	}

	pub(crate) fn candidates(&self) -> &[Candidate] {
		&self.candidates
	}

	pub(crate) fn unresolved(&self) -> impl Iterator<Item = (usize, &str)> {
		self.candidates
			.iter()
			.enumerate()
			.filter(|(_, candidate)| !candidate.state.is_settled())
			.map(|(slot, candidate)| (slot, &*candidate.name))
	}
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
	a.eq_ignore_ascii_case(b) || a.chars().flat_map(char::to_lowercase).eq(b.chars().flat_map(char::to_lowercase))
}
