use std::cell::OnceCell;

use colname_primitives::escape_html;
use rustc_hash::FxHashMap;

use super::NameRegistry;
use crate::substitute::NameMap;
use crate::table::{NameTable, TypeMap, sort_longest_first};

/// Merged views over every table of a registry.
///
/// Each slot is filled on first read and emptied as a unit by
/// [`AggregateCache::invalidate`].
#[derive(Debug, Default)]
pub(super) struct AggregateCache {
	pub encoding: OnceCell<NameMap>,
	pub decoding: OnceCell<NameMap>,
	pub decoding_html_safe: OnceCell<NameMap>,
	pub decoding_types: OnceCell<TypeMap>,
	pub original_names: OnceCell<Vec<String>>,
	pub encoded_names: OnceCell<Vec<String>>,
}

impl AggregateCache {
	pub fn invalidate(&mut self) {
		*self = Self::default();
	}
}

/// Merges per-table maps; the first table to define a key keeps it.
fn merge_maps<'a, V, F>(slot: &'static str, tables: impl Iterator<Item = &'a NameTable>, map: F) -> FxHashMap<String, V>
where
	V: Clone + 'a,
	F: Fn(&'a NameTable) -> &'a FxHashMap<String, V>,
{
	let mut merged = FxHashMap::default();
	for table in tables {
		for (key, value) in map(table) {
			merged.entry(key.clone()).or_insert_with(|| value.clone());
		}
	}
	tracing::trace!(slot, entries = merged.len(), "recomputed aggregate map");
	merged
}

fn merge_lists<'a, F>(slot: &'static str, tables: impl Iterator<Item = &'a NameTable>, list: F) -> Vec<String>
where
	F: Fn(&'a NameTable) -> &'a [String],
{
	let mut merged: Vec<String> = tables.flat_map(|table| list(table).iter().cloned()).collect();
	sort_longest_first(&mut merged);
	tracing::trace!(slot, entries = merged.len(), "recomputed aggregate list");
	merged
}

impl NameRegistry {
	/// Original name to token, over all tables.
	pub fn aggregate_encode_map(&self) -> &NameMap {
		self.cache.encoding.get_or_init(|| merge_maps("encode", self.tables(), NameTable::encoding_map))
	}

	/// Token to original name, over all tables.
	pub fn aggregate_decode_map(&self) -> &NameMap {
		self.cache.decoding.get_or_init(|| merge_maps("decode", self.tables(), NameTable::decoding_map))
	}

	/// Token to HTML-escaped original name, square brackets included.
	pub fn aggregate_decode_map_html_safe(&self) -> &NameMap {
		self.cache.decoding_html_safe.get_or_init(|| {
			let safe: NameMap = self
				.aggregate_decode_map()
				.iter()
				.map(|(token, name)| (token.clone(), escape_html(name, true)))
				.collect();
			tracing::trace!(slot = "decode_html_safe", entries = safe.len(), "recomputed aggregate map");
			safe
		})
	}

	/// Token to qualifying column type, over all tables.
	pub fn aggregate_decode_type_map(&self) -> &TypeMap {
		self.cache.decoding_types.get_or_init(|| merge_maps("decode_types", self.tables(), NameTable::decoding_types))
	}

	/// Every original name of every table, longest first.
	///
	/// Names of equal length keep primary-first registration order.
	pub fn aggregate_original_names(&self) -> &[String] {
		self.cache
			.original_names
			.get_or_init(|| merge_lists("original_names", self.tables(), NameTable::original_names))
	}

	/// Every token of every table, longest first.
	pub fn aggregate_encoded_names(&self) -> &[String] {
		self.cache
			.encoded_names
			.get_or_init(|| merge_lists("encoded_names", self.tables(), NameTable::encoded_names))
	}
}
