//! Primary table plus scoped overlays, merged into cached aggregate views.
//!
//! # Mental Model
//!
//! A [`NameRegistry`] owns one primary [`NameTable`] and an ordered set of
//! overlay tables. Overlays are independent namespaces used for transient,
//! scoped renamings. Every read path that is not explicitly local goes
//! through the merged aggregate views.
//!
//! # Precedence Contract
//!
//! On key collision across tables:
//! 1. The primary table wins.
//! 2. Among overlays, the one registered earlier wins.
//!
//! Both aggregate name lists are sorted longest-first because substitution
//! tries candidates in list order.
//!
//! # Invalidation
//!
//! The six aggregate slots are invalidated together by every mutation that
//! goes through the registry. Dropping the registry drops every table it
//! owns.

mod cache;

use colname_primitives::ColumnType;
use serde_json::Value;

use crate::config::EncoderConfig;
use crate::error::Result;
use crate::table::{NameTable, lookup_name, lookup_token};

use self::cache::AggregateCache;

/// Handle of an overlay table registered in a [`NameRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OverlayId(u32);

impl std::fmt::Display for OverlayId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "overlay#{}", self.0)
	}
}

/// Context object holding every name table of one analysis session.
#[derive(Debug)]
pub struct NameRegistry {
	primary: NameTable,
	/// In registration order.
	overlays: Vec<(OverlayId, NameTable)>,
	next_overlay: u32,
	cache: AggregateCache,
}

impl Default for NameRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl NameRegistry {
	/// Creates a registry with an empty primary table using default affixes.
	pub fn new() -> Self {
		Self::with_config(&EncoderConfig::default())
	}

	/// Creates a registry whose primary table uses the configured affixes.
	pub fn with_config(config: &EncoderConfig) -> Self {
		Self {
			primary: NameTable::new(config.prefix.clone(), config.postfix.clone()),
			overlays: Vec::new(),
			next_overlay: 0,
			cache: AggregateCache::default(),
		}
	}

	/// Returns the primary table.
	pub fn primary(&self) -> &NameTable {
		&self.primary
	}

	/// Rebuilds the primary table from the current column names.
	pub fn rebuild_primary<I, S>(&mut self, names: I, type_variants: bool)
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		self.primary.rebuild(names, type_variants);
		self.invalidate_all();
	}

	/// Rebuilds the primary table from the `encodeThis` entries declared in
	/// `options[".meta"]`.
	pub fn rebuild_primary_from_meta(&mut self, options: &Value) {
		let names = crate::tree::collect_meta_encodings(options);
		self.rebuild_primary(names, false);
	}

	/// Adds an overlay table to the merge set. Earlier overlays take
	/// precedence over later ones.
	pub fn register_overlay(&mut self, table: NameTable) -> OverlayId {
		let id = OverlayId(self.next_overlay);
		self.next_overlay += 1;

		if table.prefix() == self.primary.prefix() && table.postfix() == self.primary.postfix() {
			tracing::warn!(
				overlay = %id,
				prefix = %table.prefix(),
				"overlay shares the primary token affixes; its tokens are shadowed"
			);
		}
		tracing::trace!(overlay = %id, entries = table.len(), "registered overlay");

		self.overlays.push((id, table));
		self.invalidate_all();
		id
	}

	/// Removes an overlay from the merge set and hands it back.
	pub fn unregister_overlay(&mut self, id: OverlayId) -> Option<NameTable> {
		let index = self.overlays.iter().position(|(other, _)| *other == id)?;
		let (_, table) = self.overlays.remove(index);
		tracing::trace!(overlay = %id, "unregistered overlay");
		self.invalidate_all();
		Some(table)
	}

	/// Returns a registered overlay.
	pub fn overlay(&self, id: OverlayId) -> Option<&NameTable> {
		self.overlays.iter().find(|(other, _)| *other == id).map(|(_, table)| table)
	}

	/// Rebuilds a registered overlay. Returns false if `id` is not registered.
	pub fn rebuild_overlay<I, S>(&mut self, id: OverlayId, names: I, type_variants: bool) -> bool
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let Some((_, table)) = self.overlays.iter_mut().find(|(other, _)| *other == id) else {
			return false;
		};
		table.rebuild(names, type_variants);
		self.invalidate_all();
		true
	}

	/// Runs `f` with `table` registered as an overlay, then removes it again.
	pub fn with_overlay<R>(&mut self, table: NameTable, f: impl FnOnce(&Self) -> R) -> (R, NameTable) {
		let index = self.overlays.len();
		let id = self.register_overlay(table);
		let result = f(self);

		// `f` only borrows the registry, so the overlay is still last.
		let (popped, table) = self.overlays.remove(index);
		debug_assert_eq!(popped, id);
		tracing::trace!(overlay = %id, "unregistered overlay");
		self.invalidate_all();
		(result, table)
	}

	/// Number of registered overlays.
	pub fn overlay_count(&self) -> usize {
		self.overlays.len()
	}

	/// Marks every aggregate view stale.
	pub fn invalidate_all(&mut self) {
		self.cache.invalidate();
	}

	/// Primary first, then overlays in registration order.
	fn tables(&self) -> impl Iterator<Item = &NameTable> {
		std::iter::once(&self.primary).chain(self.overlays.iter().map(|(_, table)| table))
	}

	/// Returns the token of `name` in any table.
	pub fn encode(&self, name: &str) -> Result<&str> {
		lookup_name(self.aggregate_encode_map(), name)
	}

	/// Returns the original name of `token` in any table.
	pub fn decode(&self, token: &str) -> Result<&str> {
		lookup_token(self.aggregate_decode_map(), token)
	}

	/// Returns the type qualified by `token`, or [`ColumnType::Unknown`].
	pub fn type_of(&self, token: &str) -> ColumnType {
		self.aggregate_decode_type_map().get(token).copied().unwrap_or_default()
	}

	/// Original names of the primary table only.
	pub fn column_names(&self) -> &[String] {
		self.primary.original_names()
	}

	/// Tokens of the primary table only.
	pub fn column_names_encoded(&self) -> &[String] {
		self.primary.encoded_names()
	}
}

#[cfg(test)]
mod tests;
