//! Name substitution over nested option values.
//!
//! Option trees are [`serde_json::Value`]s. Arrays and objects are walked
//! depth-first and strings are rewritten. Numbers, booleans and null are
//! never touched. Neither array lengths nor object member counts change;
//! with key renaming enabled only the spelling of member keys does.
//!
//! Object members are renamed in two phases. All children are processed
//! first while renames are staged in a side list, then every staged member
//! is taken out before any is put back under its new key. A rename onto a
//! key that is still taken keeps the member under its old key.
//!
//! Encoding can also be driven by the `.meta` side channel; see
//! [`NameRegistry::apply_meta_policy`].

mod legacy;
mod meta;

use rustc_hash::FxHashSet;
use serde_json::{Map, Value};

pub use self::legacy::{PreloadMode, TypedColumns, normalize_legacy_value_type_pairs};
pub use self::meta::{META_KEY, collect_meta_encodings};
use crate::registry::NameRegistry;
use crate::substitute::{NameMap, replace_exact, replace_scan};

/// How strings in a tree are matched against the replacement map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matching {
	/// Whole-string match only.
	Exact,
	/// Leftmost-earliest scan over the candidate list.
	Scan,
}

#[derive(Clone, Copy)]
struct Substitution<'a> {
	map: &'a NameMap,
	names: &'a [String],
	matching: Matching,
}

impl Substitution<'_> {
	fn apply(&self, text: &str) -> String {
		match self.matching {
			Matching::Exact => replace_exact(text, self.map),
			Matching::Scan => replace_scan(text, self.map, self.names),
		}
	}

	fn walk(&self, value: &mut Value, rename_keys: bool) {
		match value {
			Value::Array(items) => {
				for item in items {
					self.walk(item, rename_keys);
				}
			}
			Value::Object(members) => {
				let mut staged = Vec::new();

				for (key, child) in members.iter_mut() {
					self.walk(child, rename_keys);

					if rename_keys {
						let renamed = self.apply(key);
						if renamed != *key {
							staged.push((key.clone(), renamed));
						}
					}
				}

				apply_staged_renames(members, staged);
			}
			Value::String(text) => *text = self.apply(text),
			Value::Null | Value::Bool(_) | Value::Number(_) => {}
		}
	}
}

struct StagedRename {
	old: String,
	target: String,
	child: Value,
}

/// Moves renamed members to their new keys.
///
/// A rename whose new key is held by a member that keeps its key, or is
/// claimed by an earlier rename, falls back to the old key. Falling back can
/// in turn block renames onto that old key, so blocking is repeated until no
/// rename changes. Every member survives.
fn apply_staged_renames(members: &mut Map<String, Value>, staged: Vec<(String, String)>) {
	let mut moved: Vec<StagedRename> = staged
		.into_iter()
		.filter_map(|(old, target)| members.remove(&old).map(|child| StagedRename { old, target, child }))
		.collect();

	loop {
		let mut claimed: FxHashSet<&str> = moved
			.iter()
			.filter(|rename| rename.target == rename.old)
			.map(|rename| rename.old.as_str())
			.collect();
		let mut blocked = Vec::new();

		for (i, rename) in moved.iter().enumerate() {
			if rename.target == rename.old {
				continue;
			}
			if members.contains_key(&rename.target) || !claimed.insert(rename.target.as_str()) {
				blocked.push(i);
			}
		}

		if blocked.is_empty() {
			break;
		}
		for i in blocked {
			let rename = &mut moved[i];
			tracing::warn!(from = %rename.old, to = %rename.target, "member key already taken; keeping the old key");
			rename.target = rename.old.clone();
		}
	}

	members.extend(moved.into_iter().map(|rename| (rename.target, rename.child)));
}

/// Rewrites every string, and optionally every member key, of `value`.
///
/// `names` is only consulted for [`Matching::Scan`] and must be sorted
/// longest-first.
pub fn substitute_tree(value: &mut Value, map: &NameMap, names: &[String], rename_keys: bool, matching: Matching) {
	Substitution { map, names, matching }.walk(value, rename_keys);
}

impl NameRegistry {
	/// Replaces original names with tokens throughout `value`.
	pub fn encode_tree(&self, value: &mut Value, rename_keys: bool, matching: Matching) {
		substitute_tree(
			value,
			self.aggregate_encode_map(),
			self.aggregate_original_names(),
			rename_keys,
			matching,
		);
	}

	/// Replaces tokens with original names throughout `value`. Strings
	/// without tokens are left as they are.
	pub fn decode_tree(&self, value: &mut Value, rename_keys: bool) {
		substitute_tree(
			value,
			self.aggregate_decode_map(),
			self.aggregate_encoded_names(),
			rename_keys,
			Matching::Scan,
		);
	}

	/// Like [`decode_tree`](Self::decode_tree) with keys renamed, but
	/// inserts HTML-escaped names for render contexts.
	pub fn decode_tree_html_safe(&self, value: &mut Value) {
		substitute_tree(
			value,
			self.aggregate_decode_map_html_safe(),
			self.aggregate_encoded_names(),
			true,
			Matching::Scan,
		);
	}
}
