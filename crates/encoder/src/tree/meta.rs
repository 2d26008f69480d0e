//! Encoding driven by the `.meta` side channel of an option tree.
//!
//! The meta tree parallels the options it annotates. A meta node may carry
//! two flags:
//!
//! - `shouldEncode`: the option already holds column names. Every string
//!   below an array or object is replaced by exact match; a string option
//!   itself is scanned, so names inside it are replaced as well.
//! - `rCode`: the option holds script text; every string below it goes
//!   through the script-aware replacer.
//!
//! Missing or malformed meta simply stops the walk at that node.

use serde_json::Value;

use super::Matching;
use crate::registry::NameRegistry;
use crate::substitute::replace_scan;

/// Reserved member carrying the meta tree of an option object.
pub const META_KEY: &str = ".meta";

fn flag(meta: &Value, name: &str) -> bool {
	meta.get(name).and_then(Value::as_bool).unwrap_or(false)
}

impl NameRegistry {
	/// Encodes the parts of `options` that `meta` marks as name-bearing.
	///
	/// Precedence at every node:
	/// 1. `shouldEncode` on an array or object encodes the whole subtree.
	/// 2. An array meta node is matched element-wise with an array option.
	/// 3. `rCode` script-encodes every string below the node.
	/// 4. Otherwise only object members that also appear in `meta` are
	///    visited, each with its own meta node. The `.meta` member itself is
	///    never visited.
	///
	/// A string node is script-encoded under `rCode` and scanned for every
	/// registered name under `shouldEncode`.
	pub fn apply_meta_policy(&self, options: &mut Value, meta: &Value) {
		if meta.is_null() {
			return;
		}

		let should_encode = flag(meta, "shouldEncode");
		let r_code = flag(meta, "rCode");

		if should_encode && (options.is_array() || options.is_object()) {
			self.encode_tree(options, false, Matching::Exact);
			return;
		}

		match options {
			Value::Array(items) => {
				if let Value::Array(metas) = meta {
					for (item, item_meta) in items.iter_mut().zip(metas) {
						self.apply_meta_policy(item, item_meta);
					}
				} else if r_code {
					for item in items {
						self.encode_script_strings(item);
					}
				}
			}
			Value::Object(members) => {
				if r_code {
					for (name, child) in members.iter_mut() {
						if name != META_KEY {
							self.encode_script_strings(child);
						}
					}
				} else if let Value::Object(meta_members) = meta {
					for (name, child) in members.iter_mut() {
						if name == META_KEY {
							continue;
						}
						if let Some(child_meta) = meta_members.get(name) {
							self.apply_meta_policy(child, child_meta);
						}
					}
				}
			}
			Value::String(text) => {
				if r_code {
					*text = self.encode_script_text(text, None);
				} else if should_encode {
					*text = replace_scan(text, self.aggregate_encode_map(), self.aggregate_original_names());
				}
			}
			Value::Null | Value::Bool(_) | Value::Number(_) => {}
		}
	}

	fn encode_script_strings(&self, value: &mut Value) {
		match value {
			Value::String(text) => *text = self.encode_script_text(text, None),
			Value::Array(items) => {
				for item in items {
					self.encode_script_strings(item);
				}
			}
			Value::Object(members) => {
				for (name, child) in members.iter_mut() {
					if name != META_KEY {
						self.encode_script_strings(child);
					}
				}
			}
			Value::Null | Value::Bool(_) | Value::Number(_) => {}
		}
	}
}

/// Collects the names declared by `encodeThis` entries anywhere in
/// `options[".meta"]`.
///
/// `encodeThis` may hold a single string or an array of strings. A meta
/// object that declares `encodeThis` is not searched any further.
pub fn collect_meta_encodings(options: &Value) -> Vec<String> {
	let mut names = Vec::new();
	if let Some(meta) = options.get(META_KEY) {
		collect_into(meta, &mut names);
	}
	names
}

fn collect_into(meta: &Value, names: &mut Vec<String>) {
	match meta {
		Value::Array(items) => {
			for item in items {
				collect_into(item, names);
			}
		}
		Value::Object(members) => match members.get("encodeThis") {
			Some(Value::String(name)) => names.push(name.clone()),
			Some(Value::Array(list)) => {
				names.extend(list.iter().filter_map(Value::as_str).map(str::to_string));
			}
			Some(_) => {}
			None => {
				for child in members.values() {
					collect_into(child, names);
				}
			}
		},
		_ => {}
	}
}
