//! Bidirectional mapping between original column names and tokens.
//!
//! Tokens are synthesized as `prefix + counter + postfix`. The counter starts
//! at zero on every rebuild and increases monotonically, so tokens within one
//! table never collide. The affixes keep them valid identifiers in generated
//! script text and unlike anything a user would name a column.
//!
//! With type variants enabled each base name `n` also gets `n.scale`,
//! `n.ordinal` and `n.nominal`. Those pseudo-names have their own tokens,
//! which decode back to `n` and record the qualifying type separately.

use std::collections::BTreeMap;

use colname_primitives::ColumnType;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{EncodeError, Result};
use crate::substitute::NameMap;

/// Mapping from a token to the column type it qualifies.
pub type TypeMap = FxHashMap<String, ColumnType>;

/// Affixes of the one-off renaming table built by [`NameTable::for_renames`].
pub const RENAME_PREFIX: &str = "JASPColumn_";
/// See [`RENAME_PREFIX`].
pub const RENAME_POSTFIX: &str = "_For_Replacement";

/// One encoder namespace.
#[derive(Debug, Clone)]
pub struct NameTable {
	prefix: String,
	postfix: String,
	encoding: NameMap,
	decoding: NameMap,
	decoding_types: TypeMap,
	/// Sorted longest-first.
	original_names: Vec<String>,
	/// In counter order.
	encoded_names: Vec<String>,
}

impl NameTable {
	/// Creates an empty table with the given token affixes.
	pub fn new(prefix: impl Into<String>, postfix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
			postfix: postfix.into(),
			encoding: NameMap::default(),
			decoding: NameMap::default(),
			decoding_types: TypeMap::default(),
			original_names: Vec::new(),
			encoded_names: Vec::new(),
		}
	}

	/// Builds a scratch table that renames columns.
	///
	/// Every key of `renames` is registered as an original name, but its token
	/// decodes to the mapped value instead of back to the key. Encoding script
	/// text and then decoding it therefore renames the columns with the same
	/// boundary and quote rules as normal encoding.
	pub fn for_renames(renames: &BTreeMap<String, String>) -> Self {
		let mut table = Self::new(RENAME_PREFIX, RENAME_POSTFIX);
		table.rebuild(renames.keys(), false);

		for (token, original) in table.decoding.iter_mut() {
			if let Some(renamed) = renames.get(original.as_str()) {
				tracing::trace!(token = %token, from = %original, to = %renamed, "rename target");
				*original = renamed.clone();
			}
		}

		table
	}

	/// Replaces all entries, registering `names` in order.
	///
	/// Empty and repeated names are skipped so every original name maps to
	/// exactly one token. A qualified pseudo-name that is already registered
	/// as a base name is skipped as well.
	pub fn rebuild<I, S>(&mut self, names: I, type_variants: bool)
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		self.encoding.clear();
		self.decoding.clear();
		self.decoding_types.clear();
		self.original_names.clear();
		self.encoded_names.clear();

		let mut seen = FxHashSet::default();
		let mut skipped = 0usize;
		let base: Vec<String> = names
			.into_iter()
			.filter_map(|name| {
				let name = name.as_ref();
				if name.is_empty() || !seen.insert(name.to_string()) {
					skipped += 1;
					return None;
				}
				Some(name.to_string())
			})
			.collect();

		let mut counter = 0usize;
		for name in &base {
			let token = self.next_token(&mut counter);
			self.insert(name.clone(), token, name.clone(), None);
		}

		if type_variants {
			for name in &base {
				for ty in ColumnType::QUALIFIERS {
					let qualified = ty.qualify(name);
					if self.encoding.contains_key(&qualified) {
						skipped += 1;
						continue;
					}
					let token = self.next_token(&mut counter);
					self.insert(qualified, token, name.clone(), Some(ty));
				}
			}
		}

		sort_longest_first(&mut self.original_names);

		tracing::debug!(
			prefix = %self.prefix,
			names = base.len(),
			entries = self.encoded_names.len(),
			type_variants,
			skipped,
			"rebuilt name table"
		);
	}

	fn next_token(&self, counter: &mut usize) -> String {
		let token = format!("{}{}{}", self.prefix, counter, self.postfix);
		*counter += 1;
		token
	}

	fn insert(&mut self, original: String, token: String, decodes_to: String, ty: Option<ColumnType>) {
		self.encoding.insert(original.clone(), token.clone());
		self.decoding.insert(token.clone(), decodes_to);
		if let Some(ty) = ty {
			self.decoding_types.insert(token.clone(), ty);
		}
		self.original_names.push(original);
		self.encoded_names.push(token);
	}

	/// Returns the token of `name`. Empty input yields empty output.
	pub fn encode<'a>(&'a self, name: &str) -> Result<&'a str> {
		lookup_name(&self.encoding, name)
	}

	/// Returns the original name `token` decodes to. Empty input yields empty output.
	pub fn decode<'a>(&'a self, token: &str) -> Result<&'a str> {
		lookup_token(&self.decoding, token)
	}

	/// Returns the type recorded for `token`, or [`ColumnType::Unknown`].
	pub fn type_of(&self, token: &str) -> ColumnType {
		self.decoding_types.get(token).copied().unwrap_or_default()
	}

	/// Returns true if this table, ignoring any other table, knows `name`.
	#[inline]
	pub fn local_contains(&self, name: &str) -> bool {
		self.encoding.contains_key(name)
	}

	/// Returns true if this table, ignoring any other table, knows `token`.
	#[inline]
	pub fn local_contains_encoded(&self, token: &str) -> bool {
		self.decoding.contains_key(token)
	}

	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	pub fn postfix(&self) -> &str {
		&self.postfix
	}

	pub fn encoding_map(&self) -> &NameMap {
		&self.encoding
	}

	pub fn decoding_map(&self) -> &NameMap {
		&self.decoding
	}

	pub fn decoding_types(&self) -> &TypeMap {
		&self.decoding_types
	}

	/// Original names, including qualified pseudo-names, longest first.
	pub fn original_names(&self) -> &[String] {
		&self.original_names
	}

	/// Tokens in the order they were generated.
	pub fn encoded_names(&self) -> &[String] {
		&self.encoded_names
	}

	/// Number of registered original names.
	pub fn len(&self) -> usize {
		self.original_names.len()
	}

	pub fn is_empty(&self) -> bool {
		self.original_names.is_empty()
	}
}

pub(crate) fn lookup_name<'a>(map: &'a NameMap, name: &str) -> Result<&'a str> {
	if name.is_empty() {
		return Ok("");
	}
	map.get(name)
		.map(String::as_str)
		.ok_or_else(|| EncodeError::UnknownName(name.to_string()))
}

pub(crate) fn lookup_token<'a>(map: &'a NameMap, token: &str) -> Result<&'a str> {
	if token.is_empty() {
		return Ok("");
	}
	map.get(token)
		.map(String::as_str)
		.ok_or_else(|| EncodeError::UnknownToken(token.to_string()))
}

/// Stable sort by descending byte length.
pub(crate) fn sort_longest_first(names: &mut [String]) {
	names.sort_by_key(|name| std::cmp::Reverse(name.len()));
}

#[cfg(test)]
mod tests;
